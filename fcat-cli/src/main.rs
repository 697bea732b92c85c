//! fcat - filament catalog browser
//!
//! Loads the catalog once, restores the saved session, runs one command and
//! saves the session again.

use anyhow::Result;
use clap::Parser;
use fcat_cli::{execute, Cli, Command};
use fcat_common::config::{load_config, resolve_dataset, resolve_state_dir};
use fcat_common::dataset::load_catalog;
use fcat_common::persistence::StateStore;
use fcat_common::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config();

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting fcat v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let source = resolve_dataset(cli.dataset.as_deref(), &config);
    let store = StateStore::new(resolve_state_dir(cli.state_dir.as_deref(), &config));
    info!("Dataset: {}, state: {}", source.location, store.dir().display());

    let loaded = load_catalog(&source).await;
    if let Some(message) = loaded.status.message() {
        eprintln!("{}", message);
    }

    let mut session = Session::new(loaded.filaments);
    store.restore_session(&mut session);

    let output = execute(&cli.command, &mut session, cli.json)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }

    match cli.command {
        Command::Reset => store.clear(),
        ref command if command.mutates() => store.save_session(&session),
        _ => {}
    }

    Ok(())
}
