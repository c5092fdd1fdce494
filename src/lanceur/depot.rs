// src/lanceur/depot.rs
//
// Synchronisation du dépôt compagnon via git (clone / fetch / pull).
//
// Séquence :
//   git --version                         (git présent ?)
//   pas de <depot>/.git  -> git clone
//   sinon                -> git fetch --prune
//                           branche  : rev-parse --abbrev-ref HEAD           (défaut: main)
//                           amont    : rev-parse --abbrev-ref --symbolic-full-name @{u}
//                                                                           (défaut: origin/<branche>)
//                           retard   : rev-list --count HEAD..<amont>
//                           retard>0 -> pull --rebase
//   si rev-list échoue : comparaison ls-remote (distant) / rev-parse HEAD (local)
//
// L’exécution passe par le trait Executeur : Git (réel) en production, un script en test.

use anyhow::{Context, Result};
use log::{info, warn};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::reglages::chemin_depot;

/// Code retourné quand l’exécutable git est introuvable.
pub const CODE_INTROUVABLE: i32 = 127;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sortie {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Sortie {
    pub fn reussie(&self) -> bool {
        self.code == 0
    }

    /// stderr si non vide, sinon stdout (pour les messages d’erreur).
    pub fn detail(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

pub trait Executeur {
    fn executer(&self, args: &[&str], dossier: Option<&Path>) -> Sortie;
}

/// Exécuteur réel : lance `git <args>`.
pub struct Git;

impl Executeur for Git {
    fn executer(&self, args: &[&str], dossier: Option<&Path>) -> Sortie {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(d) = dossier {
            cmd.current_dir(d);
        }

        match cmd.output() {
            Ok(o) => Sortie {
                code: o.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&o.stdout).trim().to_string(),
                stderr: String::from_utf8_lossy(&o.stderr).trim().to_string(),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Sortie {
                code: CODE_INTROUVABLE,
                stdout: String::new(),
                stderr: e.to_string(),
            },
            Err(e) => Sortie {
                code: -1,
                stdout: String::new(),
                stderr: e.to_string(),
            },
        }
    }
}

/// Bilan d’une synchronisation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synchro {
    /// true si cloné ou mis à jour
    pub change: bool,
    /// emplacement (réel ou visé) du dépôt
    pub chemin: PathBuf,
    pub message: String,
}

impl Synchro {
    fn new(change: bool, chemin: &Path, message: impl Into<String>) -> Self {
        Self {
            change,
            chemin: chemin.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Garantit que le dépôt décrit par les réglages existe localement et est à jour.
///
/// Les échecs git ne sont pas des erreurs Rust : ils finissent dans `Synchro::message`.
/// Seules les erreurs d’E/S locales (réglages illisibles, répertoire impossible à créer) remontent.
pub fn assurer_depot(exec: &dyn Executeur, base: &Path, reglages: &Path) -> Result<Synchro> {
    let (url, depot) = chemin_depot(base, reglages)?;
    let Some(url) = url else {
        let nom = reglages
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        warn!("aucune URL de dépôt dans {}", reglages.display());
        return Ok(Synchro::new(
            false,
            &depot,
            format!("URL du dépôt introuvable dans {nom}"),
        ));
    };

    let version = exec.executer(&["--version"], None);
    if !version.reussie() {
        warn!("git indisponible: {}", version.detail());
        return Ok(Synchro::new(
            false,
            &depot,
            format!(
                "Git n’est pas installé ou absent du PATH (erreur : {})",
                version.detail()
            ),
        ));
    }

    if !depot.join(".git").is_dir() {
        return cloner(exec, &url, &depot);
    }

    let fetch = exec.executer(&["fetch", "--prune"], Some(&depot));
    if !fetch.reussie() {
        return Ok(Synchro::new(
            false,
            &depot,
            format!("Erreur fetch : {}", fetch.detail()),
        ));
    }

    let tete = exec.executer(&["rev-parse", "--abbrev-ref", "HEAD"], Some(&depot));
    let branche = if tete.reussie() && !tete.stdout.is_empty() {
        tete.stdout
    } else {
        "main".to_string()
    };

    let amont = exec.executer(
        &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"],
        Some(&depot),
    );
    let amont = if amont.reussie() && !amont.stdout.is_empty() {
        amont.stdout
    } else {
        format!("origin/{branche}")
    };

    let plage = format!("HEAD..{amont}");
    let retard = exec.executer(&["rev-list", "--count", &plage], Some(&depot));
    if !retard.reussie() {
        return comparer_distant(exec, &depot, &branche, &retard);
    }

    let n: u64 = retard.stdout.trim().parse().unwrap_or(0);
    info!("{} : {n} commit(s) de retard sur {amont}", depot.display());
    if n == 0 {
        return Ok(Synchro::new(false, &depot, "Déjà à jour"));
    }

    let pull = exec.executer(&["pull", "--rebase"], Some(&depot));
    if !pull.reussie() {
        return Ok(Synchro::new(
            false,
            &depot,
            format!("Mise à jour impossible : {}", pull.detail()),
        ));
    }
    Ok(Synchro::new(true, &depot, "Dépôt mis à jour"))
}

fn cloner(exec: &dyn Executeur, url: &str, depot: &Path) -> Result<Synchro> {
    if let Some(parent) = depot.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("création de {}", parent.display()))?;
    }

    let cible = depot.to_string_lossy();
    let clone = exec.executer(&["clone", url, &cible], None);
    if !clone.reussie() {
        warn!("clone de {url} impossible: {}", clone.detail());
        return Ok(Synchro::new(
            false,
            depot,
            format!("Clonage impossible : {}", clone.detail()),
        ));
    }

    info!("{url} cloné dans {}", depot.display());
    Ok(Synchro::new(true, depot, "Dépôt cloné"))
}

/// Repli quand `rev-list` échoue : compare le sommet distant de la branche au HEAD local.
fn comparer_distant(
    exec: &dyn Executeur,
    depot: &Path,
    branche: &str,
    retard: &Sortie,
) -> Result<Synchro> {
    let distant = exec.executer(&["ls-remote", "--heads", "origin", branche], Some(depot));
    if !distant.reussie() || distant.stdout.is_empty() {
        return Ok(Synchro::new(
            false,
            depot,
            format!("Comparaison de versions impossible : {}", retard.detail()),
        ));
    }

    let sha_distant = distant.stdout.split_whitespace().next().unwrap_or_default();
    let local = exec.executer(&["rev-parse", "HEAD"], Some(depot));
    if local.reussie() && !local.stdout.is_empty() && local.stdout != sha_distant {
        let pull = exec.executer(&["pull", "--rebase"], Some(depot));
        if pull.reussie() {
            return Ok(Synchro::new(true, depot, "Dépôt mis à jour"));
        }
        return Ok(Synchro::new(
            false,
            depot,
            format!("Erreur pull : {}", pull.detail()),
        ));
    }

    Ok(Synchro::new(false, depot, "Déjà à jour"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanceur::reglages::FICHIER_REGLAGES;

    use std::cell::RefCell;
    use std::fs;

    /// Exécuteur scripté : première réponse dont la clé préfixe la commande, sinon succès vide.
    struct Script {
        reponses: Vec<(&'static str, Sortie)>,
        appels: RefCell<Vec<String>>,
    }

    impl Script {
        fn new(reponses: Vec<(&'static str, Sortie)>) -> Self {
            Self {
                reponses,
                appels: RefCell::new(Vec::new()),
            }
        }

        fn appels(&self) -> Vec<String> {
            self.appels.borrow().clone()
        }
    }

    impl Executeur for Script {
        fn executer(&self, args: &[&str], _dossier: Option<&Path>) -> Sortie {
            let ligne = args.join(" ");
            self.appels.borrow_mut().push(ligne.clone());
            self.reponses
                .iter()
                .find(|(cle, _)| ligne.starts_with(cle))
                .map(|(_, s)| s.clone())
                .unwrap_or_default()
        }
    }

    fn ok(stdout: &str) -> Sortie {
        Sortie {
            code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    fn echec(code: i32, stderr: &str) -> Sortie {
        Sortie {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    /// base temporaire + réglages pointant vers calc-sure ; `existant` crée calc-sure/.git
    fn preparer(existant: bool) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let reglages = dir.path().join(FICHIER_REGLAGES);
        fs::write(&reglages, "https://github.com/ecole/calc-sure.git").unwrap();
        if existant {
            fs::create_dir_all(dir.path().join("calc-sure").join(".git")).unwrap();
        }
        (dir, reglages)
    }

    #[test]
    fn sans_url_rien_a_faire() {
        let dir = tempfile::tempdir().unwrap();
        let script = Script::new(vec![]);
        let s = assurer_depot(&script, dir.path(), &dir.path().join(FICHIER_REGLAGES)).unwrap();
        assert!(!s.change);
        assert!(s.message.contains(FICHIER_REGLAGES));
        assert!(script.appels().is_empty());
    }

    #[test]
    fn git_absent() {
        let (dir, reglages) = preparer(false);
        let script = Script::new(vec![("--version", echec(CODE_INTROUVABLE, "No such file"))]);
        let s = assurer_depot(&script, dir.path(), &reglages).unwrap();
        assert!(!s.change);
        assert!(s.message.contains("No such file"));
        assert_eq!(script.appels(), vec!["--version"]);
    }

    #[test]
    fn clone_si_absent() {
        let (dir, reglages) = preparer(false);
        let script = Script::new(vec![]);
        let s = assurer_depot(&script, dir.path(), &reglages).unwrap();
        assert!(s.change);
        assert_eq!(s.message, "Dépôt cloné");
        assert_eq!(s.chemin, dir.path().join("calc-sure"));

        let appels = script.appels();
        assert_eq!(appels.len(), 2);
        assert!(appels[1].starts_with("clone https://github.com/ecole/calc-sure.git "));
    }

    #[test]
    fn clone_en_echec() {
        let (dir, reglages) = preparer(false);
        let script = Script::new(vec![("clone", echec(128, "repository not found"))]);
        let s = assurer_depot(&script, dir.path(), &reglages).unwrap();
        assert!(!s.change);
        assert_eq!(s.message, "Clonage impossible : repository not found");
    }

    #[test]
    fn deja_a_jour() {
        let (dir, reglages) = preparer(true);
        let script = Script::new(vec![
            ("rev-parse --abbrev-ref HEAD", ok("main")),
            ("rev-parse --abbrev-ref --symbolic-full-name", ok("origin/main")),
            ("rev-list", ok("0")),
        ]);
        let s = assurer_depot(&script, dir.path(), &reglages).unwrap();
        assert!(!s.change);
        assert_eq!(s.message, "Déjà à jour");
        assert!(!script.appels().iter().any(|a| a.starts_with("pull")));
    }

    #[test]
    fn en_retard_pull() {
        let (dir, reglages) = preparer(true);
        let script = Script::new(vec![
            ("rev-parse --abbrev-ref HEAD", ok("dev")),
            ("rev-parse --abbrev-ref --symbolic-full-name", echec(128, "no upstream")),
            ("rev-list", ok("3")),
        ]);
        let s = assurer_depot(&script, dir.path(), &reglages).unwrap();
        assert!(s.change);
        assert_eq!(s.message, "Dépôt mis à jour");

        let appels = script.appels();
        // amont par défaut : origin/<branche>
        assert!(appels.contains(&"rev-list --count HEAD..origin/dev".to_string()));
        assert_eq!(appels.last().map(String::as_str), Some("pull --rebase"));
    }

    #[test]
    fn fetch_en_echec() {
        let (dir, reglages) = preparer(true);
        let script = Script::new(vec![("fetch", echec(1, "network down"))]);
        let s = assurer_depot(&script, dir.path(), &reglages).unwrap();
        assert!(!s.change);
        assert_eq!(s.message, "Erreur fetch : network down");
    }

    #[test]
    fn repli_ls_remote_sha_different() {
        let (dir, reglages) = preparer(true);
        let script = Script::new(vec![
            ("rev-parse --abbrev-ref HEAD", ok("main")),
            ("rev-list", echec(128, "bad revision")),
            ("ls-remote", ok("abc123\trefs/heads/main")),
            ("rev-parse HEAD", ok("def456")),
        ]);
        let s = assurer_depot(&script, dir.path(), &reglages).unwrap();
        assert!(s.change);
        assert_eq!(
            script.appels().last().map(String::as_str),
            Some("pull --rebase")
        );
    }

    #[test]
    fn repli_ls_remote_meme_sha() {
        let (dir, reglages) = preparer(true);
        let script = Script::new(vec![
            ("rev-list", echec(128, "bad revision")),
            ("ls-remote", ok("abc123\trefs/heads/main")),
            ("rev-parse HEAD", ok("abc123")),
        ]);
        let s = assurer_depot(&script, dir.path(), &reglages).unwrap();
        assert!(!s.change);
        assert_eq!(s.message, "Déjà à jour");
    }

    #[test]
    fn repli_impossible() {
        let (dir, reglages) = preparer(true);
        let script = Script::new(vec![
            ("rev-list", echec(128, "bad revision")),
            ("ls-remote", echec(2, "")),
        ]);
        let s = assurer_depot(&script, dir.path(), &reglages).unwrap();
        assert!(!s.change);
        assert_eq!(s.message, "Comparaison de versions impossible : bad revision");
    }

    #[test]
    fn detail_prefere_stderr() {
        let s = Sortie {
            code: 1,
            stdout: "out".into(),
            stderr: "err".into(),
        };
        assert_eq!(s.detail(), "err");
        assert_eq!(ok("out").detail(), "out");
    }
}
