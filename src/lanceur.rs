// src/lanceur.rs
//
// Lanceur: fenêtre qui synchronise le dépôt compagnon puis démarre la calculatrice
// --------------------------------------------------------------------------------
// Rôle:
// - Sous-modules : reglages.rs (URL + chemins), depot.rs (séquence git)
// - AppLanceur : statut, spinner, boutons Vérifier / Lancer / Quitter
// - Vérification automatique peu après l’ouverture ; --autorun lance la calculatrice ensuite
//
// La synchro git tourne dans un thread ; l’UI lit le résultat par canal à chaque frame.

pub mod depot;
pub mod reglages;

use anyhow::{Context, Result};
use eframe::egui;
use log::{error, info};

use std::path::PathBuf;
use std::process::Command;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use depot::{assurer_depot, Git, Synchro};

/// Délai avant la vérification automatique.
const DELAI_AUTO: Duration = Duration::from_millis(250);

pub const STATUT_PRET: &str = "Prêt";
pub const STATUT_VERIFICATION: &str = "Vérification en cours…";
pub const STATUT_LANCEE: &str = "Calculatrice lancée";

/// Configuration résolue une fois au démarrage (CLI).
#[derive(Clone, Debug)]
pub struct ConfigLanceur {
    pub base: PathBuf,
    pub reglages: PathBuf,
    pub autorun: bool,
}

/// Message de statut d’une synchronisation terminée.
pub fn statut_synchro(resultat: &Result<Synchro>) -> String {
    match resultat {
        Ok(s) if s.change => format!("OK : {}", s.message),
        Ok(s) => s.message.clone(),
        Err(e) => format!("Erreur : {e:#}"),
    }
}

/// Démarre la calculatrice dans un processus séparé.
///
/// Préfère un binaire compilé dans le dépôt synchronisé (target/release), sinon l’exécutable courant.
pub fn lancer_calculatrice(config: &ConfigLanceur) -> Result<PathBuf> {
    let (_url, depot) = reglages::chemin_depot(&config.base, &config.reglages)?;
    let candidat = depot.join("target").join("release").join(format!(
        "{}{}",
        env!("CARGO_PKG_NAME"),
        std::env::consts::EXE_SUFFIX
    ));

    let exe = if candidat.is_file() {
        candidat
    } else {
        std::env::current_exe().context("exécutable courant introuvable")?
    };

    Command::new(&exe)
        .arg("calculatrice")
        .spawn()
        .with_context(|| format!("lancement de {}", exe.display()))?;

    info!("calculatrice lancée: {}", exe.display());
    Ok(exe)
}

pub struct AppLanceur {
    config: ConfigLanceur,
    statut: String,
    recepteur: Option<Receiver<String>>,
    ouvert_le: Instant,
    auto_faite: bool,
}

impl AppLanceur {
    pub fn new(config: ConfigLanceur) -> Self {
        Self {
            config,
            statut: STATUT_PRET.to_string(),
            recepteur: None,
            ouvert_le: Instant::now(),
            auto_faite: false,
        }
    }

    fn en_cours(&self) -> bool {
        self.recepteur.is_some()
    }

    fn demarrer_maj(&mut self, ctx: &egui::Context) {
        if self.en_cours() {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let base = self.config.base.clone();
        let reglages = self.config.reglages.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let resultat = assurer_depot(&Git, &base, &reglages);
            if let Err(e) = &resultat {
                error!("synchronisation: {e:#}");
            }
            // fenêtre fermée entre-temps : personne n’écoute, on ignore
            let _ = tx.send(statut_synchro(&resultat));
            ctx.request_repaint();
        });

        self.statut = STATUT_VERIFICATION.to_string();
        self.recepteur = Some(rx);
    }

    fn lancer(&mut self) {
        self.statut = match lancer_calculatrice(&self.config) {
            Ok(_) => STATUT_LANCEE.to_string(),
            Err(e) => format!("Lancement impossible : {e:#}"),
        };
    }

    /// Relève le résultat de la synchro, s’il est arrivé.
    fn relever(&mut self) {
        let recu = match &self.recepteur {
            Some(rx) => rx.try_recv(),
            None => return,
        };

        match recu {
            Ok(msg) => self.statut = msg,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.statut = "Erreur : tâche de synchronisation interrompue".to_string();
            }
        }

        self.recepteur = None;
        if self.config.autorun {
            self.lancer();
        }
    }
}

impl eframe::App for AppLanceur {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.auto_faite {
            let ecoule = self.ouvert_le.elapsed();
            if ecoule >= DELAI_AUTO {
                self.auto_faite = true;
                self.demarrer_maj(ctx);
            } else {
                ctx.request_repaint_after(DELAI_AUTO - ecoule);
            }
        }

        self.relever();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Lanceur");
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label("Statut :");
                ui.label(self.statut.as_str());
                if self.en_cours() {
                    ui.add(egui::Spinner::new());
                }
            });

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                let maj = ui.add_enabled(
                    !self.en_cours(),
                    egui::Button::new("Vérifier / mettre à jour"),
                );
                if maj.clicked() {
                    self.demarrer_maj(ctx);
                }

                if ui.button("Lancer la calculatrice").clicked() {
                    self.lancer();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Quitter").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }
}
