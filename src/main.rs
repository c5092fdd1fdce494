// src/main.rs
//
// Calculatrice sûre: point d’entrée NATIF + WEB (WASM)
// -----------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : CLI (clap) -> calculatrice, lanceur, eval, maj
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas> (calculatrice seule)
//
// La page web fournit <canvas id="the_canvas_id">. Le lanceur (git + processus) n’existe qu’en natif.

#![cfg_attr(target_arch = "wasm32", allow(unused_imports, dead_code))]

use eframe::egui;

mod app;
mod noyau;

#[cfg(not(target_arch = "wasm32"))]
mod cli;
#[cfg(not(target_arch = "wasm32"))]
mod lanceur;

use app::AppCalc;

/// Titres des fenêtres (natif + web).
const TITRE_APP: &str = "Calculatrice";
#[cfg(not(target_arch = "wasm32"))]
const TITRE_LANCEUR: &str = "Lanceur";

/* ------------------------ Natif ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = cli::run() {
        eprintln!("Erreur : {err:#}");
        #[allow(clippy::exit)]
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn fenetre_calculatrice(theme: cli::Theme) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([360.0, 460.0])
            .with_min_inner_size(app::TAILLE_MIN),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |cc| {
            // Thème résolu une fois, avant la première frame.
            theme.appliquer(&cc.egui_ctx);
            Ok(Box::<AppCalc>::default())
        }),
    )
    .map_err(|e| anyhow::anyhow!("fenêtre calculatrice : {e}"))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn fenetre_lanceur(theme: cli::Theme, config: lanceur::ConfigLanceur) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_LANCEUR)
            .with_inner_size([520.0, 200.0])
            .with_min_inner_size([420.0, 160.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_LANCEUR,
        options,
        Box::new(move |cc| {
            theme.appliquer(&cc.egui_ctx);
            Ok(Box::new(lanceur::AppLanceur::new(config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("fenêtre lanceur : {e}"))
}

/* ------------------------ Web (wasm32) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // rien : le navigateur appelle `web::demarrer()`
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::HtmlCanvasElement;

    const ID_CANVAS: &str = "the_canvas_id";

    /// Calculatrice seule dans le navigateur (pas de lanceur : ni git ni processus).
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn demarrer() -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("document indisponible"))?;
        document.set_title(TITRE_APP);

        let canvas = document
            .get_element_by_id(ID_CANVAS)
            .ok_or_else(|| JsValue::from_str(&format!("aucun élément #{ID_CANVAS}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{ID_CANVAS} n’est pas un <canvas>")))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }
}
