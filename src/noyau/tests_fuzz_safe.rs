//! Campagne aléatoire sur le pipeline complet (graine fixe, temps borné).
//!
//! Vérifie :
//! - même entrée => même sortie
//! - seules deux familles d’erreurs existent ; pas de panique, jamais
//! - une entrée contenant un caractère hors liste blanche n’est jamais évaluée
//! - les grandes expressions restent sous la borne de profondeur

use std::time::{Duration, Instant};

use super::{evaluer, ErreurCalcul};

/// xorshift64 : reproductible d’une exécution à l’autre.
struct Alea(u64);

impl Alea {
    fn suivant(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn sous(&mut self, n: usize) -> usize {
        (self.suivant() % n.max(1) as u64) as usize
    }

    fn pile_ou_face(&mut self) -> bool {
        self.suivant() & 1 == 1
    }
}

fn hors_delai(debut: Instant, max_ms: u64) {
    let ecoule = debut.elapsed();
    assert!(
        ecoule <= Duration::from_millis(max_ms),
        "campagne trop lente: {ecoule:?} > {max_ms} ms"
    );
}

fn nombre(alea: &mut Alea) -> String {
    // 0 inclus : les divisions par zéro font partie du tirage
    let a = alea.sous(10);
    match alea.sous(4) {
        0 => format!("{a}.5"),
        1 => format!(".{a}"),
        _ => a.to_string(),
    }
}

const OPERATEURS: [&str; 8] = ["+", "-", "*", "/", "%", "^", "×", "÷"];

fn expression(alea: &mut Alea, niveaux: usize) -> String {
    if niveaux == 0 {
        return nombre(alea);
    }
    match alea.sous(5) {
        0 => nombre(alea),
        1 => format!("-{}", expression(alea, niveaux - 1)),
        2 => format!("({})", expression(alea, niveaux - 1)),
        _ => {
            let gauche = expression(alea, niveaux - 1);
            let droite = expression(alea, niveaux - 1);
            let op = OPERATEURS[alea.sous(OPERATEURS.len())];
            let sep = if alea.pile_ou_face() { " " } else { "" };
            format!("{gauche}{sep}{op}{sep}{droite}")
        }
    }
}

const INTERDITS: [char; 8] = ['x', '_', '\'', ',', '=', '<', '[', ']'];

fn bruit(alea: &mut Alea, longueur: usize) -> String {
    const PERMIS: &str = "120.+-*/%^() ÷×";
    let permis: Vec<char> = PERMIS.chars().chain(INTERDITS).collect();
    (0..longueur).map(|_| permis[alea.sous(permis.len())]).collect()
}

/// n copies de `terme` additionnées par paires : profondeur log2(n) au lieu de n.
fn somme_par_paires(terme: &str, n: usize) -> String {
    let mut niveau: Vec<String> = vec![terme.to_string(); n];
    while niveau.len() > 1 {
        niveau = niveau
            .chunks(2)
            .map(|paire| match paire {
                [a, b] => format!("({a}+{b})"),
                [seul] => seul.clone(),
                _ => String::new(),
            })
            .collect();
    }
    niveau.pop().unwrap_or_else(|| "0".to_string())
}

#[test]
fn fuzz_deterministe_et_deux_familles_d_erreurs() {
    let debut = Instant::now();
    let mut alea = Alea(0xC0FF_EE00_1234_5678);

    let (mut succes, mut div0) = (0usize, 0usize);

    for _ in 0..300 {
        let expr = expression(&mut alea, 4);
        let r1 = evaluer(&expr);
        let r2 = evaluer(&expr);

        match (&r1, &r2) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.to_string(), b.to_string(), "expr={expr:?}");
                succes += 1;
            }
            (Err(ErreurCalcul::DivisionParZero), Err(ErreurCalcul::DivisionParZero)) => div0 += 1,
            (Err(ErreurCalcul::ExpressionInvalide(a)), Err(ErreurCalcul::ExpressionInvalide(b))) => {
                // grammaire toujours valide ici : seuls les refus numériques sont admis
                assert_eq!(a, b, "expr={expr:?}");
                assert!(
                    a.contains("complexe") || a.contains("dépassement") || a.contains("trop grand"),
                    "refus inattendu: expr={expr:?} err={a}"
                );
            }
            _ => panic!("résultats divergents: expr={expr:?} {r1:?} / {r2:?}"),
        }
    }
    hors_delai(debut, 2000);

    assert!(succes > 50, "trop peu de succès: {succes}");
    assert!(div0 > 0, "aucune division par zéro tirée");
}

#[test]
fn fuzz_parentheses_exterieures_neutres() {
    let debut = Instant::now();
    let mut alea = Alea(0x0BAD_C0DE);

    for _ in 0..150 {
        let expr = expression(&mut alea, 3);
        let nu = evaluer(&expr).map(|n| n.to_string());
        let entoure = evaluer(&format!("({expr})")).map(|n| n.to_string());
        assert_eq!(nu, entoure, "expr={expr:?}");
    }
    hors_delai(debut, 1000);
}

#[test]
fn fuzz_bruit_interdit_jamais_evalue() {
    let debut = Instant::now();
    let mut alea = Alea(0x5EC);

    for _ in 0..400 {
        let longueur = 1 + alea.sous(12);
        let texte = bruit(&mut alea, longueur);
        if !texte.chars().any(|c| INTERDITS.contains(&c)) {
            continue;
        }
        let r = evaluer(&texte);
        assert!(
            matches!(r, Err(ErreurCalcul::ExpressionInvalide(_))),
            "bruit={texte:?} aurait dû être refusé, obtenu {r:?}"
        );
    }
    hors_delai(debut, 1000);
}

#[test]
fn somme_par_paires_de_800_demis() {
    let debut = Instant::now();
    let expr = somme_par_paires("1/2", 800);
    let r = evaluer(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    hors_delai(debut, 1000);

    assert_eq!(r.to_string(), "400");
}

#[test]
fn chaine_longue_sous_la_borne() {
    // 1+1+...+1 : associativité gauche => profondeur = nombre de termes
    let expr = vec!["1"; 900].join("+");
    let r = evaluer(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(r.to_string(), "900");

    let trop = vec!["1"; 1200].join("+");
    assert!(matches!(
        evaluer(&trop),
        Err(ErreurCalcul::ExpressionInvalide(_))
    ));
}
