//! Noyau: évaluation (pipeline réel)
//!
//! normaliser -> tokenize -> RPN -> Expr -> évaluation récursive -> normalisation du résultat
//!
//! Chaque appel est indépendant : l’arbre est construit puis jeté, aucun état partagé.

use log::debug;

use super::erreur::ErreurCalcul;
use super::jetons::{format_tokens, tokenize};
use super::nombre::Nombre;
use super::rpn::{format_rpn, from_rpn, to_rpn};

/// Remplace les glyphes de l’interface par les opérateurs canoniques, puis retire les espaces
/// de bord. Purement textuel, sans erreur possible.
pub fn normaliser(expr_str: &str) -> String {
    expr_str
        .replace('×', "*")
        .replace('÷', "/")
        .replace('^', "**")
        .trim()
        .to_string()
}

/// API publique : évalue une expression arithmétique “liste blanche”.
///
/// - chaîne vide (après normalisation) => 0, sans passer par le parseur
/// - flottant sans partie fractionnaire => entier (4/2 => 2)
pub fn evaluer(expr_str: &str) -> Result<Nombre, ErreurCalcul> {
    let s = normaliser(expr_str);
    if s.is_empty() {
        return Ok(Nombre::zero());
    }

    // 1) Jetons
    let jetons = tokenize(&s)?;
    debug!("jetons: {}", format_tokens(&jetons));

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    debug!("rpn: {}", format_rpn(&rpn));

    // 3) AST (Expr)
    let expr = from_rpn(&rpn)?;
    debug!("arbre: {expr}");

    // 4) Évaluation + normalisation
    let resultat = expr.evaluer().map(Nombre::normalise);
    match &resultat {
        Ok(v) => debug!("{s} = {v}"),
        Err(e) => debug!("{s} : {e}"),
    }
    resultat
}
