//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (expression affichée, statut) et offrir les actions
//! du pavé (ajout, C, DEL, =) sans logique d’affichage.
//!
//! Contrats :
//! - La seule évaluation passe par `noyau::evaluer`.
//! - Sur échec, l’expression reste intacte (l’utilisateur corrige), seul le statut change.
//! - Actions déterministes, sans effet de bord caché.

use log::info;

use crate::noyau::{evaluer, ErreurCalcul};

pub const STATUT_PRET: &str = "Prêt";
pub const STATUT_EFFACE: &str = "Effacé";
pub const STATUT_OK: &str = "OK";
pub const STATUT_DIVISION_ZERO: &str = "Division par zéro impossible";
pub const STATUT_ERREUR: &str = "Erreur dans l’expression";

/// Caractères acceptés au clavier (en plus de '=' qui évalue).
const TOUCHES_CLAVIER: &str = "0123456789.()+-*/%^";

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur (affichage lecture seule) ---
    pub entree: String,

    // --- sortie ---
    pub statut: String,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            statut: STATUT_PRET.to_string(),
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” ------------------------ */

    /// Touche de pavé : ajoute le texte tel quel (les glyphes × ÷ ^ seront normalisés au calcul).
    pub fn ajouter(&mut self, s: &str) {
        self.statut = STATUT_PRET.to_string();
        self.entree.push_str(s);
    }

    /// C : vide l’expression.
    pub fn effacer(&mut self) {
        self.entree.clear();
        self.statut = STATUT_EFFACE.to_string();
    }

    /// DEL : retire le dernier caractère (rien à faire si vide).
    pub fn retour_arriere(&mut self) {
        self.entree.pop();
    }

    /// = : évalue via le noyau.
    pub fn egal(&mut self) {
        match evaluer(&self.entree) {
            Ok(resultat) => {
                self.entree = resultat.to_string();
                self.statut = STATUT_OK.to_string();
            }
            Err(ErreurCalcul::DivisionParZero) => {
                info!("division par zéro: {:?}", self.entree);
                self.statut = STATUT_DIVISION_ZERO.to_string();
            }
            Err(e) => {
                info!("refus de {:?}: {e}", self.entree);
                self.statut = STATUT_ERREUR.to_string();
            }
        }
    }

    /* ------------------------ Clavier ------------------------ */

    /// Texte tapé au clavier : chaque caractère reconnu est ajouté, '=' évalue, le reste est ignoré.
    pub fn saisie_clavier(&mut self, texte: &str) {
        for c in texte.chars() {
            if c == '=' {
                self.egal();
            } else if TOUCHES_CLAVIER.contains(c) {
                let mut tampon = [0u8; 4];
                self.ajouter(c.encode_utf8(&mut tampon));
            }
        }
    }
}
