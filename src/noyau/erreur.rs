// src/noyau/erreur.rs
//
// Deux familles d’échec seulement, distinguables par l’appelant :
// - ExpressionInvalide : tout ce qui n’est pas une expression arithmétique “liste blanche”
// - DivisionParZero    : diviseur (ou modulo, ou 0 ** négatif) exactement nul

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurCalcul {
    /// Syntaxe malformée, construction interdite, ou résultat non représentable.
    /// Le texte est un motif lisible (journaux, CLI), jamais analysé par l’appelant.
    #[error("expression invalide : {0}")]
    ExpressionInvalide(String),

    #[error("division par zéro")]
    DivisionParZero,
}

impl ErreurCalcul {
    pub fn invalide(motif: impl Into<String>) -> Self {
        ErreurCalcul::ExpressionInvalide(motif.into())
    }
}
