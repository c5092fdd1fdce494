// src/noyau/expr.rs
//
// Arbre d’expression fermé : Nombre | Unaire | Binaire.
//
// IMPORTANT (SAFE):
// - Aucune variante “nom”, “appel”, “attribut”, “comparaison” n’existe : une construction interdite
//   ne peut tout simplement pas être représentée. Le match exhaustif de evaluer() tient lieu de
//   filet de sécurité structurel.
// - La profondeur est bornée à la construction (rpn.rs), donc la descente récursive aussi.

use log::trace;

use std::fmt;

use super::erreur::ErreurCalcul;
use super::nombre::Nombre;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Plus,
    Moins,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl OpBinaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
            OpBinaire::Mod => "%",
            OpBinaire::Pow => "**",
        }
    }
}

impl OpUnaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpUnaire::Plus => "+",
            OpUnaire::Moins => "-",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(Nombre),
    Unaire(OpUnaire, Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Évaluation : une seule descente récursive, opérande gauche avant droite.
    pub fn evaluer(&self) -> Result<Nombre, ErreurCalcul> {
        match self {
            Expr::Nombre(n) => Ok(n.clone()),

            Expr::Unaire(op, x) => {
                let v = x.evaluer()?;
                Ok(match op {
                    OpUnaire::Plus => v,
                    OpUnaire::Moins => v.oppose(),
                })
            }

            Expr::Binaire(op, a, b) => {
                let gauche = a.evaluer()?;
                let droite = b.evaluer()?;
                let r = match op {
                    OpBinaire::Add => gauche.plus(&droite),
                    OpBinaire::Sub => gauche.moins(&droite),
                    OpBinaire::Mul => gauche.fois(&droite),
                    OpBinaire::Div => gauche.divise(&droite),
                    OpBinaire::Mod => gauche.modulo(&droite),
                    OpBinaire::Pow => gauche.puissance(&droite),
                };
                if let Err(e) = &r {
                    trace!("échec {gauche} {} {droite}: {e}", op.symbole());
                }
                r
            }
        }
    }
}

/// Rendu entièrement parenthésé (journaux) : l’ordre d’évaluation se lit directement.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(n) => write!(f, "{n}"),
            Expr::Unaire(op, x) => write!(f, "({}{x})", op.symbole()),
            Expr::Binaire(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
        }
    }
}
