// src/cli.rs
//
// Ligne de commande (natif seulement) : niveau de log, thème, sous-commandes.
//
//   calculatrice_sure                       -> fenêtre calculatrice
//   calculatrice_sure lanceur [--autorun]   -> fenêtre lanceur (synchro git puis lancement)
//   calculatrice_sure eval "2^10" "5/0"     -> évaluation sans fenêtre
//   calculatrice_sure maj                   -> synchro git sans fenêtre

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use eframe::egui;
use log::info;

use std::path::PathBuf;

use crate::lanceur::depot::{assurer_depot, Git};
use crate::lanceur::reglages::FICHIER_REGLAGES;
use crate::lanceur::ConfigLanceur;
use crate::noyau::evaluer;

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Thème visuel, résolu une fois à la création de la fenêtre.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Theme {
    /// Réglage egui par défaut
    #[default]
    Systeme,
    Clair,
    Sombre,
}

impl Theme {
    pub fn appliquer(self, ctx: &egui::Context) {
        match self {
            Theme::Systeme => {}
            Theme::Clair => ctx.set_visuals(egui::Visuals::light()),
            Theme::Sombre => ctx.set_visuals(egui::Visuals::dark()),
        }
    }
}

/// Calculatrice sûre: pavé arithmétique + lanceur synchronisé
#[derive(Parser, Debug)]
#[command(name = "calculatrice_sure")]
#[command(about = "Calculatrice arithmétique sûre, avec lanceur qui synchronise le dépôt compagnon")]
#[command(version)]
pub struct CliArgs {
    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Thème des fenêtres
    #[arg(long, value_enum, default_value = "systeme", global = true)]
    pub theme: Theme,

    #[command(subcommand)]
    pub commande: Option<Commande>,
}

#[derive(Subcommand, Debug)]
pub enum Commande {
    /// Ouvre la calculatrice (par défaut)
    Calculatrice,

    /// Ouvre le lanceur : vérifie/met à jour le dépôt, puis lance la calculatrice
    Lanceur {
        /// Lance la calculatrice automatiquement après la mise à jour
        #[arg(long)]
        autorun: bool,

        #[command(flatten)]
        chemins: Chemins,
    },

    /// Évalue des expressions sans fenêtre (une ligne de résultat par expression)
    Eval {
        #[arg(required = true, allow_hyphen_values = true)]
        expressions: Vec<String>,
    },

    /// Synchronise le dépôt sans fenêtre
    Maj {
        #[command(flatten)]
        chemins: Chemins,
    },
}

#[derive(Args, Debug, Clone)]
pub struct Chemins {
    /// Répertoire de base du dépôt (défaut : dossier de l’exécutable)
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Fichier de réglages contenant l’URL du dépôt (défaut : <base>/githubSettings.md)
    #[arg(long)]
    pub reglages: Option<PathBuf>,
}

impl Chemins {
    pub fn resoudre(self, autorun: bool) -> Result<ConfigLanceur> {
        let base = match self.base {
            Some(b) => b,
            None => std::env::current_exe()
                .context("exécutable courant introuvable")?
                .parent()
                .map(PathBuf::from)
                .context("dossier de l’exécutable introuvable")?,
        };
        let reglages = self
            .reglages
            .unwrap_or_else(|| base.join(FICHIER_REGLAGES));
        Ok(ConfigLanceur {
            base,
            reglages,
            autorun,
        })
    }
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Évalue une expression pour la sortie texte ; le refus porte l’expression en contexte.
pub fn evaluer_ligne(expr: &str) -> Result<String> {
    let n = evaluer(expr).with_context(|| format!("{expr:?}"))?;
    Ok(n.to_string())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();

    init_logging(&args.log_level)?;

    match args.commande.unwrap_or(Commande::Calculatrice) {
        Commande::Calculatrice => crate::fenetre_calculatrice(args.theme),

        Commande::Lanceur { autorun, chemins } => {
            let config = chemins.resoudre(autorun)?;
            info!("lanceur: base={} reglages={}", config.base.display(), config.reglages.display());
            crate::fenetre_lanceur(args.theme, config)
        }

        Commande::Eval { expressions } => {
            // affiche au fil de l’eau : les résultats obtenus avant un refus restent visibles
            for expr in &expressions {
                println!("{}", evaluer_ligne(expr)?);
            }
            Ok(())
        }

        Commande::Maj { chemins } => {
            let config = chemins.resoudre(false)?;
            let s = assurer_depot(&Git, &config.base, &config.reglages)?;
            println!("{} ({})", s.message, s.chemin.display());
            Ok(())
        }
    }
}
