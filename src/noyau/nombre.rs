// src/noyau/nombre.rs
//
// Nombre = entier exact (BigInt) OU flottant IEEE-754 (f64).
//
// Convention numérique (une seule, appliquée partout) :
// - entier ∘ entier reste entier pour + - * % ** (exposant >= 0)
// - dès qu’un flottant intervient, l’opération se fait en f64
// - la division “/” est toujours vraie (résultat flottant)
// - modulo plancher : le reste prend le signe du diviseur
// - pas de complexes : base négative ** exposant fractionnaire => refus
//
// Garde-fous : un entier trop grand pour f64, ou une puissance entière démesurée,
// sont refusés (ExpressionInvalide) au lieu de geler l’interface.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use std::fmt;

use super::erreur::ErreurCalcul;

/// Borne sur la taille d’un résultat `entier ** entier` (en bits).
const BITS_PUISSANCE_MAX: u64 = 1 << 20;

#[derive(Clone, Debug, PartialEq)]
pub enum Nombre {
    Entier(BigInt),
    Reel(f64),
}

impl Nombre {
    pub fn entier(n: i64) -> Self {
        Nombre::Entier(BigInt::from(n))
    }

    pub fn zero() -> Self {
        Nombre::Entier(BigInt::zero())
    }

    pub fn est_zero(&self) -> bool {
        match self {
            Nombre::Entier(n) => n.is_zero(),
            Nombre::Reel(x) => *x == 0.0,
        }
    }

    /// Un flottant fini sans partie fractionnaire devient un entier (4/2 => 2).
    pub fn normalise(self) -> Nombre {
        match self {
            Nombre::Reel(x) if x.is_finite() && x.fract() == 0.0 => match BigInt::from_f64(x) {
                Some(n) => Nombre::Entier(n),
                None => Nombre::Reel(x),
            },
            autre => autre,
        }
    }

    pub fn oppose(self) -> Nombre {
        match self {
            Nombre::Entier(n) => Nombre::Entier(-n),
            Nombre::Reel(x) => Nombre::Reel(-x),
        }
    }

    pub fn plus(&self, autre: &Nombre) -> Result<Nombre, ErreurCalcul> {
        match (self, autre) {
            (Nombre::Entier(a), Nombre::Entier(b)) => Ok(Nombre::Entier(a + b)),
            _ => Ok(Nombre::Reel(self.vers_reel()? + autre.vers_reel()?)),
        }
    }

    pub fn moins(&self, autre: &Nombre) -> Result<Nombre, ErreurCalcul> {
        match (self, autre) {
            (Nombre::Entier(a), Nombre::Entier(b)) => Ok(Nombre::Entier(a - b)),
            _ => Ok(Nombre::Reel(self.vers_reel()? - autre.vers_reel()?)),
        }
    }

    pub fn fois(&self, autre: &Nombre) -> Result<Nombre, ErreurCalcul> {
        match (self, autre) {
            (Nombre::Entier(a), Nombre::Entier(b)) => Ok(Nombre::Entier(a * b)),
            _ => Ok(Nombre::Reel(self.vers_reel()? * autre.vers_reel()?)),
        }
    }

    /// Division vraie. Entier / entier passe par un rationnel exact avant l’arrondi f64.
    pub fn divise(&self, autre: &Nombre) -> Result<Nombre, ErreurCalcul> {
        if autre.est_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }
        match (self, autre) {
            (Nombre::Entier(a), Nombre::Entier(b)) => {
                let q = BigRational::new(a.clone(), b.clone());
                match q.to_f64() {
                    Some(x) if x.is_finite() => Ok(Nombre::Reel(x)),
                    _ => Err(depassement()),
                }
            }
            _ => Ok(Nombre::Reel(self.vers_reel()? / autre.vers_reel()?)),
        }
    }

    /// Modulo plancher (signe du diviseur).
    pub fn modulo(&self, autre: &Nombre) -> Result<Nombre, ErreurCalcul> {
        if autre.est_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }
        match (self, autre) {
            (Nombre::Entier(a), Nombre::Entier(b)) => {
                let r = a % b;
                if !r.is_zero() && r.is_negative() != b.is_negative() {
                    Ok(Nombre::Entier(r + b))
                } else {
                    Ok(Nombre::Entier(r))
                }
            }
            _ => Ok(Nombre::Reel(modulo_reel(
                self.vers_reel()?,
                autre.vers_reel()?,
            ))),
        }
    }

    pub fn puissance(&self, autre: &Nombre) -> Result<Nombre, ErreurCalcul> {
        match (self, autre) {
            (Nombre::Entier(a), Nombre::Entier(b)) => puissance_entiere(a, b),
            _ => puissance_reelle(self.vers_reel()?, autre.vers_reel()?).map(Nombre::Reel),
        }
    }

    fn vers_reel(&self) -> Result<f64, ErreurCalcul> {
        match self {
            Nombre::Reel(x) => Ok(*x),
            Nombre::Entier(n) => match n.to_f64() {
                Some(x) if x.is_finite() => Ok(x),
                _ => Err(ErreurCalcul::invalide("entier trop grand pour un flottant")),
            },
        }
    }
}

fn depassement() -> ErreurCalcul {
    ErreurCalcul::invalide("dépassement de capacité")
}

fn modulo_reel(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r == 0.0 {
        0.0_f64.copysign(b)
    } else if (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

fn puissance_entiere(a: &BigInt, b: &BigInt) -> Result<Nombre, ErreurCalcul> {
    if b.is_negative() {
        if a.is_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }
        let x = Nombre::Entier(a.clone()).vers_reel()?;
        let y = Nombre::Entier(b.clone()).vers_reel()?;
        return puissance_reelle(x, y).map(Nombre::Reel);
    }

    if b.is_zero() {
        return Ok(Nombre::Entier(BigInt::one()));
    }

    // |a| <= 1 : résultat trivial, même pour un exposant énorme
    if a.is_zero() || a.is_one() {
        return Ok(Nombre::Entier(a.clone()));
    }
    if *a == BigInt::from(-1) {
        let pair = (b % BigInt::from(2)).is_zero();
        return Ok(Nombre::entier(if pair { 1 } else { -1 }));
    }

    let e = b.to_u32().ok_or_else(depassement)?;
    if a.bits().saturating_mul(u64::from(e)) > BITS_PUISSANCE_MAX {
        return Err(depassement());
    }
    Ok(Nombre::Entier(a.pow(e)))
}

fn puissance_reelle(x: f64, y: f64) -> Result<f64, ErreurCalcul> {
    if x == 0.0 && y < 0.0 {
        return Err(ErreurCalcul::DivisionParZero);
    }
    if x < 0.0 && x.is_finite() && y.is_finite() && y.fract() != 0.0 {
        return Err(ErreurCalcul::invalide("résultat complexe"));
    }
    let r = x.powf(y);
    if r.is_infinite() && x.is_finite() && y.is_finite() {
        return Err(depassement());
    }
    Ok(r)
}

impl fmt::Display for Nombre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nombre::Entier(n) => write!(f, "{n}"),
            Nombre::Reel(x) if x.is_nan() => write!(f, "nan"),
            Nombre::Reel(x) if x.is_infinite() => {
                write!(f, "{}", if *x > 0.0 { "inf" } else { "-inf" })
            }
            Nombre::Reel(x) => write!(f, "{x}"),
        }
    }
}
