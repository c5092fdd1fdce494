// src/noyau/jetons.rs
//
// Tokenisation “liste blanche” : chiffres, point décimal, + - * / % **, ( ).
// Tout autre caractère (lettre, guillemet, crochet, virgule, =, <, &, ~, _ …) est refusé ici,
// avant même la construction de l’arbre.

use num_bigint::BigInt;

use super::erreur::ErreurCalcul;
use super::nombre::Nombre;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(Nombre),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar, // ** (puissance)

    LPar,
    RPar,
}

/// Tokenize une chaîne normalisée en jetons.
/// Supporte:
/// - entiers (ex: 12) ; zéros en tête refusés (012), sauf pour 0 / 00
/// - décimaux (ex: 1.5, .5, 5.)
/// - opérateurs + - * / % **
/// - parenthèses ( )
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" d’un seul tenant = puissance ; "* *" = deux multiplications
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::StarStar);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '%' => {
                out.push(Tok::Percent);
                i += 1;
                continue;
            }
            _ => {}
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let litteral: String = chars[start..i].iter().collect();
            out.push(Tok::Num(lire_litteral(&litteral)?));
            continue;
        }

        return Err(ErreurCalcul::invalide(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

fn lire_litteral(s: &str) -> Result<Nombre, ErreurCalcul> {
    let points = s.matches('.').count();
    let chiffres = s.chars().filter(char::is_ascii_digit).count();

    if chiffres == 0 || points > 1 {
        return Err(ErreurCalcul::invalide(format!("nombre invalide: {s}")));
    }

    if points == 1 {
        return s
            .parse::<f64>()
            .map(Nombre::Reel)
            .map_err(|_| ErreurCalcul::invalide(format!("nombre invalide: {s}")));
    }

    // Entier : "0", "00" acceptés ; "012" refusé (ambigu, style octal)
    if s.len() > 1 && s.starts_with('0') && s.chars().any(|c| c != '0') {
        return Err(ErreurCalcul::invalide(format!("zéros en tête: {s}")));
    }

    BigInt::parse_bytes(s.as_bytes(), 10)
        .map(Nombre::Entier)
        .ok_or_else(|| ErreurCalcul::invalide(format!("nombre invalide: {s}")))
}

/// Format utilitaire (journaux) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(n) => n.to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::StarStar => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
