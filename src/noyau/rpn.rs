// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la syntaxe au passage
// - Puis reconstruire Expr (profondeur bornée)
//
// Règles:
// - '+' / '-' arrivant quand on attend une valeur => opérateur unaire (préfixe)
// - précédences : ** (4) > unaire (3) > * / % (2) > + - (1)
//   => -2**2 = -(2**2) ; 2**-1 accepté (unaire à droite de **)
// - ** associatif à droite, le reste à gauche
// - deux valeurs côte à côte (2 3, 2(3), (1)(2)) => refus : pas d’appel, pas de juxtaposition

use super::erreur::ErreurCalcul;
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::jetons::Tok;
use super::nombre::Nombre;

/// Garde-fou : profondeur max de l’arbre (la descente d’évaluation est récursive).
pub const PROFONDEUR_MAX: usize = 1000;

/// Élément de sortie RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum ElemRpn {
    Valeur(Nombre),
    Unaire(OpUnaire),
    Binaire(OpBinaire),
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Pile {
    LPar,
    Unaire(OpUnaire),
    Binaire(OpBinaire),
}

fn precedence(p: &Pile) -> i32 {
    match p {
        Pile::Binaire(OpBinaire::Add | OpBinaire::Sub) => 1,
        Pile::Binaire(OpBinaire::Mul | OpBinaire::Div | OpBinaire::Mod) => 2,
        Pile::Unaire(_) => 3,
        Pile::Binaire(OpBinaire::Pow) => 4,
        Pile::LPar => 0,
    }
}

fn is_right_associative(op: OpBinaire) -> bool {
    matches!(op, OpBinaire::Pow)
}

fn vers_rpn(p: Pile) -> Option<ElemRpn> {
    match p {
        Pile::LPar => None,
        Pile::Unaire(op) => Some(ElemRpn::Unaire(op)),
        Pile::Binaire(op) => Some(ElemRpn::Binaire(op)),
    }
}

fn op_binaire(tok: &Tok) -> Option<OpBinaire> {
    match tok {
        Tok::Plus => Some(OpBinaire::Add),
        Tok::Minus => Some(OpBinaire::Sub),
        Tok::Star => Some(OpBinaire::Mul),
        Tok::Slash => Some(OpBinaire::Div),
        Tok::Percent => Some(OpBinaire::Mod),
        Tok::StarStar => Some(OpBinaire::Pow),
        Tok::Num(_) | Tok::LPar | Tok::RPar => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Minus, Num(2), StarStar, Num(2)]
///   rpn:    [Valeur(2), Valeur(2), Binaire(Pow), Unaire(Moins)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<ElemRpn>, ErreurCalcul> {
    let mut out: Vec<ElemRpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();

    // true tant qu’il manque une valeur (début, après un opérateur, après '(').
    let mut attend_valeur = true;

    for tok in tokens {
        match tok {
            Tok::Num(n) => {
                if !attend_valeur {
                    return Err(ErreurCalcul::invalide("deux valeurs sans opérateur"));
                }
                out.push(ElemRpn::Valeur(n.clone()));
                attend_valeur = false;
            }

            Tok::LPar => {
                if !attend_valeur {
                    // "2(3)" / "(1)(2)" : syntaxe d’appel, refusée
                    return Err(ErreurCalcul::invalide("parenthèse ouvrante inattendue"));
                }
                ops.push(Pile::LPar);
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(ErreurCalcul::invalide("parenthèses vides ou opérande manquant"));
                }
                // dépile jusqu’à '('
                let mut fermee = false;
                while let Some(top) = ops.pop() {
                    match vers_rpn(top) {
                        Some(e) => out.push(e),
                        None => {
                            fermee = true;
                            break;
                        }
                    }
                }
                if !fermee {
                    return Err(ErreurCalcul::invalide("parenthèse fermante sans ouvrante"));
                }
            }

            Tok::Plus | Tok::Minus if attend_valeur => {
                // préfixe : rien à dépiler, il n’a pas d’opérande gauche
                let op = if matches!(tok, Tok::Minus) {
                    OpUnaire::Moins
                } else {
                    OpUnaire::Plus
                };
                ops.push(Pile::Unaire(op));
            }

            _ => {
                let op = op_binaire(tok)
                    .ok_or_else(|| ErreurCalcul::invalide("jeton inattendu"))?;
                if attend_valeur {
                    return Err(ErreurCalcul::invalide(format!(
                        "opérateur '{}' sans opérande",
                        op.symbole()
                    )));
                }

                let p_tok = precedence(&Pile::Binaire(op));
                while let Some(top) = ops.last() {
                    if matches!(top, Pile::LPar) {
                        break;
                    }
                    let p_top = precedence(top);
                    let doit_pop = if is_right_associative(op) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop {
                        break;
                    }
                    if let Some(e) = ops.pop().and_then(vers_rpn) {
                        out.push(e);
                    }
                }

                ops.push(Pile::Binaire(op));
                attend_valeur = true;
            }
        }
    }

    if attend_valeur {
        return Err(ErreurCalcul::invalide("expression incomplète"));
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        match vers_rpn(top) {
            Some(e) => out.push(e),
            None => return Err(ErreurCalcul::invalide("parenthèses non fermées")),
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN, en bornant la profondeur.
pub fn from_rpn(rpn: &[ElemRpn]) -> Result<Expr, ErreurCalcul> {
    // (sous-arbre, profondeur)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for elem in rpn {
        let (e, profondeur) = match elem {
            ElemRpn::Valeur(n) => (Expr::Nombre(n.clone()), 1),

            ElemRpn::Unaire(op) => {
                let (x, px) = st.pop().ok_or_else(|| ErreurCalcul::invalide("expression invalide"))?;
                (Expr::Unaire(*op, Box::new(x)), px + 1)
            }

            ElemRpn::Binaire(op) => {
                let (b, pb) = st.pop().ok_or_else(|| ErreurCalcul::invalide("expression invalide"))?;
                let (a, pa) = st.pop().ok_or_else(|| ErreurCalcul::invalide("expression invalide"))?;
                (Expr::Binaire(*op, Box::new(a), Box::new(b)), pa.max(pb) + 1)
            }
        };

        if profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalcul::invalide("expression trop imbriquée"));
        }
        st.push((e, profondeur));
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(ErreurCalcul::invalide("expression invalide")),
    }
}

/// Format utilitaire (journaux) : RPN en texte.
pub fn format_rpn(rpn: &[ElemRpn]) -> String {
    let mut out = Vec::new();
    for e in rpn {
        out.push(match e {
            ElemRpn::Valeur(n) => n.to_string(),
            ElemRpn::Unaire(OpUnaire::Moins) => "neg".to_string(),
            ElemRpn::Unaire(OpUnaire::Plus) => "pos".to_string(),
            ElemRpn::Binaire(op) => op.symbole().to_string(),
        });
    }
    out.join(" ")
}
