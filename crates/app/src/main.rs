//! Tandem command line entry point.

use clap::Parser;
use tandem::{Cli, run};
use tandem_infrastructure::ClientSettings;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = ClientSettings::load(cli.config.as_deref())?;
    tracing::debug!(base_url = %settings.base_url, "settings loaded");

    let mut stdout = std::io::stdout();
    if let Err(e) = run(cli, &settings, &mut stdout).await {
        tracing::error!(error = %e, "command failed");
        if let Some(hint) = e.hint() {
            eprintln!("hint: {hint}");
        }
        return Err(e.into());
    }

    Ok(())
}
