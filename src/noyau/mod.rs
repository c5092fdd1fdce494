//! Noyau sûr
//!
//! Organisation interne :
//! - erreur.rs  : ErreurCalcul (ExpressionInvalide / DivisionParZero)
//! - nombre.rs  : Nombre (entier exact ou f64) + arithmétique
//! - jetons.rs  : tokenisation liste blanche
//! - rpn.rs     : shunting-yard + construction Expr (profondeur bornée)
//! - expr.rs    : arbre fermé + évaluation récursive
//! - eval.rs    : pipeline complet

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod jetons;
pub mod nombre;
pub mod rpn;

#[cfg(test)]
mod tests_securite;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::{evaluer, normaliser};
pub use nombre::Nombre;
