//! Site tooling: audits pages against the dictionary and resolves keys.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use site_i18n::audit::audit_site;
use site_i18n::config::ConfigManager;
use site_i18n::types::LanguageCode;
use tracing_subscriber::EnvFilter;

/// Translation tooling for bilingual static sites
#[derive(Debug, Parser)]
#[command(name = "site-i18n", version)]
struct Cli {
    /// Site root containing `.site-i18n.json` and the pages
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Report markup keys without a translation and dictionary keys missing for a language
    Audit,
    /// Print the display string of a key
    Resolve {
        /// Translation key, e.g. `nav.home`
        key: String,
        /// Only this language (default: every supported language)
        #[arg(long)]
        lang: Option<LanguageCode>,
    },
}

/// Runs the selected subcommand; failures and unclean audits exit non-zero.
#[allow(clippy::print_stdout)]
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config_manager = ConfigManager::new();
    if let Err(e) = config_manager.load_settings(Some(cli.root.clone())) {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }
    let dictionary = match config_manager.load_dictionary() {
        Ok(dictionary) => dictionary,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let settings = config_manager.get_settings();

    match cli.command {
        Command::Audit => match audit_site(&cli.root, settings, &dictionary) {
            Ok(report) => {
                println!("{report}");
                if report.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
            }
            Err(e) => {
                tracing::error!("{e}");
                ExitCode::FAILURE
            }
        },
        Command::Resolve { key, lang } => {
            let languages = lang.map_or_else(|| LanguageCode::ALL.to_vec(), |lang| vec![lang]);
            for lang in languages {
                println!("{lang}\t{}", dictionary.resolve(&key, lang, &settings.key_separator));
            }
            ExitCode::SUCCESS
        }
    }
}
