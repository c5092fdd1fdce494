// src/app.rs
//
// Calculatrice: module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier global (l’affichage est en lecture seule, rien n’a le focus texte) :
// - texte tapé : chiffres . ( ) + - * / % ^ ajoutés, '=' évalue
// - Enter = évaluer, Backspace = DEL, Escape = C

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

/// Taille minimale de la fenêtre calculatrice.
pub const TAILLE_MIN: [f32; 2] = [320.0, 360.0];

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (texte, entree, retour, echap) = ctx.input(|i| {
            let mut texte = String::new();
            for ev in &i.events {
                if let egui::Event::Text(t) = ev {
                    texte.push_str(t);
                }
            }
            (
                texte,
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Backspace),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if echap {
            self.effacer();
        }
        if retour {
            self.retour_arriere();
        }
        if !texte.is_empty() {
            self.saisie_clavier(&texte);
        }
        if entree {
            self.egal();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
