//! consent-manager — terminal consent-preferences manager.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use consent_cli::{render, Session, TerminalPrompter};
use consent_core::config::PREFERENCES_FILE;
use consent_core::ConsentConfig;
use consent_store::Registry;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "show" => {
                let Some(name) = args.get(2) else {
                    eprintln!("Usage: consent-manager show <name> [data-dir]");
                    std::process::exit(1);
                };
                let data_dir = args
                    .get(3)
                    .map(PathBuf::from)
                    .unwrap_or_else(ConsentConfig::resolve_data_dir);
                let registry = Registry::load(&data_dir.join(PREFERENCES_FILE));
                match registry.find_by_name(name) {
                    Some(user) => {
                        render::write_status(&mut io::stdout(), user)?;
                        return Ok(());
                    }
                    None => {
                        eprintln!("No consent preferences recorded for {}.", name);
                        std::process::exit(1);
                    }
                }
            }
            "--help" | "-h" | "help" => {
                println!("consent-manager — view, give and revoke data-privacy consent");
                println!();
                println!("Usage: consent-manager [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start an interactive session");
                println!("  show <name> [data-dir]   Print the stored consent status of a user");
                println!("  help                     Show this help message");
                println!();
                println!("Environment:");
                println!("  CONSENT_DATA_DIR         Directory holding consentPreferences.json");
                println!("  RUST_LOG                 Log filter (default: warn)");
                return Ok(());
            }
            _ => {
                eprintln!(
                    "Unknown command: {}. Use 'consent-manager help' for usage.",
                    args[1]
                );
                std::process::exit(1);
            }
        }
    }

    let data_dir = ConsentConfig::resolve_data_dir();
    let config = ConsentConfig::new(&data_dir)
        .with_context(|| format!("Failed to prepare data directory {}", data_dir.display()))?;
    info!("Registry file: {}", config.paths.preferences_file.display());

    let mut registry = Registry::load(&config.paths.preferences_file);

    let stdin = io::stdin();
    let prompter = TerminalPrompter::new(stdin.lock(), io::stdout());
    Session::new(&mut registry, prompter, io::stdout())
        .run()
        .context("Consent session ended without saving")?;

    Ok(())
}
