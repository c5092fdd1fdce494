//! Tests de sécurité : tentatives d’injection.
//!
//! Invariant : aucune de ces entrées n’est évaluée. Toutes finissent en ExpressionInvalide,
//! quelle que soit l’astuce syntaxique.

use super::{evaluer, ErreurCalcul};

fn assert_refuse(expr: &str) {
    match evaluer(expr) {
        Err(ErreurCalcul::ExpressionInvalide(_)) => {}
        autre => panic!("expr={expr:?} aurait dû être refusée, obtenu {autre:?}"),
    }
}

#[test]
fn sec_imports_et_appels() {
    assert_refuse("import os");
    assert_refuse("__import__('os')");
    assert_refuse("__import__(\"os\").system(\"ls\")");
    assert_refuse("eval('1+1')");
    assert_refuse("exec('x=1')");
    assert_refuse("open('/etc/passwd').read()");
    assert_refuse("print(1)");
    assert_refuse("abs(-1)");
}

#[test]
fn sec_noms_et_attributs() {
    assert_refuse("x");
    assert_refuse("x + 1");
    assert_refuse("os.system");
    assert_refuse("(1).real");
    assert_refuse("1 .real");
    assert_refuse("True");
    assert_refuse("None");
    assert_refuse("pi");
}

#[test]
fn sec_litteraux_non_numeriques() {
    assert_refuse("'a'");
    assert_refuse("\"a\" * 3");
    assert_refuse("[1, 2]");
    assert_refuse("(1, 2)");
    assert_refuse("{1: 2}");
    assert_refuse("b'x'");
    assert_refuse("2j");
    assert_refuse("1e308");
}

#[test]
fn sec_comparaisons_et_logique() {
    assert_refuse("1 < 2");
    assert_refuse("1 == 1");
    assert_refuse("1 != 2");
    assert_refuse("1 and 2");
    assert_refuse("not 1");
    assert_refuse("1 if 1 else 2");
    assert_refuse("1 | 2");
    assert_refuse("1 & 2");
    assert_refuse("1 ^^ 2");
    assert_refuse("~1");
    assert_refuse("1 << 2");
    assert_refuse("1 @ 2");
}

#[test]
fn sec_instructions_multiples() {
    assert_refuse("1; 2");
    assert_refuse("x = 1");
    assert_refuse("1\n2");
    assert_refuse("lambda: 1");
    assert_refuse("(x := 1)");
}

#[test]
fn sec_operateurs_hors_liste() {
    assert_refuse("7 // 2");
    assert_refuse("2 *** 2");
    assert_refuse("2 +* 3");
}

#[test]
fn sec_aucun_etat_entre_appels() {
    // Une entrée refusée ne pollue pas l’appel suivant.
    assert_refuse("__import__('os')");
    assert_eq!(evaluer("1+1").map(|n| n.to_string()), Ok("2".to_string()));
    assert_eq!(evaluer("5/0"), Err(ErreurCalcul::DivisionParZero));
    assert_eq!(evaluer("1+1").map(|n| n.to_string()), Ok("2".to_string()));
}
