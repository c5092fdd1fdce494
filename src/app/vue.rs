// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Affichage lecture seule : on tape au pavé ou au clavier (géré dans app.rs)
// - Pavé 4 colonnes, dernière rangée : % + un “=” large (3 colonnes)
//
// Note :
// - egui::Grid n’a pas de colspan : la dernière rangée est un horizontal() aux largeurs calculées.

use eframe::egui;
use eframe::egui::{Color32, RichText};

use super::etat::AppCalc;

const LARGEUR_TOUCHE: f32 = 64.0;
const HAUTEUR_TOUCHE: f32 = 44.0;
const ESPACE: f32 = 6.0;

#[derive(Clone, Copy, Debug)]
enum Genre {
    Chiffre,
    Operateur,
    Secondaire,
    Alerte,
    Danger,
    Primaire,
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Ajouter(&'static str),
    Effacer,
    RetourArriere,
    Egal,
}

#[derive(Clone, Copy, Debug)]
struct Touche {
    texte: &'static str,
    genre: Genre,
    action: Action,
}

const fn chiffre(texte: &'static str) -> Touche {
    Touche {
        texte,
        genre: Genre::Chiffre,
        action: Action::Ajouter(texte),
    }
}

const fn op(texte: &'static str, genre: Genre) -> Touche {
    Touche {
        texte,
        genre,
        action: Action::Ajouter(texte),
    }
}

const PAVE: [[Touche; 4]; 5] = [
    [
        Touche {
            texte: "C",
            genre: Genre::Danger,
            action: Action::Effacer,
        },
        Touche {
            texte: "DEL",
            genre: Genre::Alerte,
            action: Action::RetourArriere,
        },
        op("(", Genre::Secondaire),
        op(")", Genre::Secondaire),
    ],
    [chiffre("7"), chiffre("8"), chiffre("9"), op("÷", Genre::Operateur)],
    [chiffre("4"), chiffre("5"), chiffre("6"), op("×", Genre::Operateur)],
    [chiffre("1"), chiffre("2"), chiffre("3"), op("-", Genre::Operateur)],
    [chiffre("0"), chiffre("."), op("^", Genre::Secondaire), op("+", Genre::Operateur)],
];

const POURCENT: Touche = op("%", Genre::Secondaire);

const EGAL: Touche = Touche {
    texte: "=",
    genre: Genre::Primaire,
    action: Action::Egal,
};

/// Palette “flat” : None = bouton egui par défaut (chiffres).
fn couleur(genre: Genre) -> Option<Color32> {
    match genre {
        Genre::Chiffre => None,
        Genre::Operateur => Some(Color32::from_rgb(52, 152, 219)),
        Genre::Secondaire => Some(Color32::from_rgb(127, 140, 141)),
        Genre::Alerte => Some(Color32::from_rgb(243, 156, 18)),
        Genre::Danger => Some(Color32::from_rgb(231, 76, 60)),
        Genre::Primaire => Some(Color32::from_rgb(44, 62, 80)),
    }
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(ESPACE, ESPACE);

        ui.heading("Calculatrice");
        ui.add_space(6.0);

        self.ui_affichage(ui);

        ui.horizontal(|ui| {
            ui.label("Statut :");
            ui.label(self.statut.as_str());
        });

        ui.add_space(8.0);

        self.ui_pave(ui);
    }

    fn ui_affichage(&self, ui: &mut egui::Ui) {
        // Lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                let texte = if self.entree.is_empty() {
                    " "
                } else {
                    self.entree.as_str()
                };
                ui.label(RichText::new(texte).monospace().size(24.0));
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([ESPACE, ESPACE])
            .show(ui, |ui| {
                for rang in &PAVE {
                    for t in rang {
                        self.touche(ui, t, LARGEUR_TOUCHE);
                    }
                    ui.end_row();
                }
            });

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = ESPACE;
            self.touche(ui, &POURCENT, LARGEUR_TOUCHE);
            self.touche(ui, &EGAL, 3.0 * LARGEUR_TOUCHE + 2.0 * ESPACE);
        });
    }

    fn touche(&mut self, ui: &mut egui::Ui, t: &Touche, largeur: f32) {
        let texte = RichText::new(t.texte).size(18.0);
        let bouton = match couleur(t.genre) {
            Some(fond) => egui::Button::new(texte.color(Color32::WHITE)).fill(fond),
            None => egui::Button::new(texte),
        };

        if ui.add_sized([largeur, HAUTEUR_TOUCHE], bouton).clicked() {
            match t.action {
                Action::Ajouter(s) => self.ajouter(s),
                Action::Effacer => self.effacer(),
                Action::RetourArriere => self.retour_arriere(),
                Action::Egal => self.egal(),
            }
        }
    }
}
