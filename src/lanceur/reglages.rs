// src/lanceur/reglages.rs
//
// Réglages du lanceur : URL du dépôt compagnon + emplacement local.
//
// - L’URL est la première occurrence de https://github.com/<[\w\-./]+>.git dans le fichier
//   de réglages (markdown libre, l’URL peut être noyée dans du texte).
// - Le dépôt vit dans <base>/<nom du dépôt>, avec repli vers ~/.local/share/calculatrice_sure
//   quand la base n’est pas inscriptible (installation système en lecture seule).

use anyhow::{Context, Result};
use log::{debug, warn};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Nom par défaut du fichier de réglages (à côté de l’exécutable).
pub const FICHIER_REGLAGES: &str = "githubSettings.md";

const PREFIXE_URL: &str = "https://github.com/";
const NOM_REPLI: &str = "calculatrice_sure";
const SONDE: &str = ".calculatrice_sure_sonde";

fn caractere_url(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
}

/// Première URL GitHub “.git” du texte, ou None.
pub fn extraire_url_depot(contenu: &str) -> Option<String> {
    let mut debut = 0;
    while let Some(pos) = contenu[debut..].find(PREFIXE_URL) {
        let depart = debut + pos + PREFIXE_URL.len();
        let reste = &contenu[depart..];
        let fin = reste
            .char_indices()
            .find(|(_, c)| !caractere_url(*c))
            .map_or(reste.len(), |(i, _)| i);
        let chemin = &reste[..fin];

        // au moins un caractère avant ".git" ; le plus long suffixe gagne
        if let Some(i) = chemin.rfind(".git") {
            if i >= 1 {
                return Some(format!("{PREFIXE_URL}{}", &chemin[..i + 4]));
            }
        }
        debut = depart;
    }
    None
}

/// Lit le fichier de réglages. Fichier absent => Ok(None).
pub fn lire_url_depot(reglages: &Path) -> Result<Option<String>> {
    match fs::read_to_string(reglages) {
        Ok(contenu) => Ok(extraire_url_depot(&contenu)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("réglages absents: {}", reglages.display());
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("lecture de {}", reglages.display())),
    }
}

fn est_inscriptible(dossier: &Path) -> bool {
    if !dossier.is_dir() {
        return false;
    }
    let sonde = dossier.join(SONDE);
    match fs::OpenOptions::new().write(true).create_new(true).open(&sonde) {
        Ok(_) => {
            let _ = fs::remove_file(&sonde);
            true
        }
        // une sonde oubliée par un lancement précédent prouve qu’on a pu écrire
        Err(e) if e.kind() == ErrorKind::AlreadyExists => true,
        Err(_) => false,
    }
}

/// Base inscriptible : `base` si possible, sinon le repli dans le répertoire personnel (créé).
pub fn repertoire_effectif(base: &Path) -> Result<PathBuf> {
    if est_inscriptible(base) {
        return Ok(base.to_path_buf());
    }

    let perso = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .context("répertoire personnel introuvable")?;
    let repli = perso.join(".local").join("share").join(NOM_REPLI);
    fs::create_dir_all(&repli).with_context(|| format!("création de {}", repli.display()))?;

    warn!(
        "{} non inscriptible, repli vers {}",
        base.display(),
        repli.display()
    );
    Ok(repli)
}

/// Nom local du dépôt : dernier segment de l’URL, sans extension.
pub fn nom_depot(url: &str) -> String {
    let segment = url.rsplit('/').next().unwrap_or(url);
    Path::new(segment)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| segment.to_string())
}

/// (URL, chemin local visé). Sans URL : (None, base effective).
pub fn chemin_depot(base: &Path, reglages: &Path) -> Result<(Option<String>, PathBuf)> {
    let url = lire_url_depot(reglages)?;
    let base_eff = repertoire_effectif(base)?;
    match url {
        Some(url) => {
            let chemin = base_eff.join(nom_depot(&url));
            Ok((Some(url), chemin))
        }
        None => Ok((None, base_eff)),
    }
}
