//! HealthMoniTree: Local health-monitoring terminal application.
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use healthmonitree::adapters::sanitize::SanitizingMakeWriter;
use healthmonitree::tui::App;
use healthmonitree::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Writing logs to the terminal would corrupt the TUI (alternate screen).
    // Interactive runs log to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log.mode.use_file(interactive) {
        if let Some(parent) = config.log.file.parent() {
            // Best-effort: a missing directory surfaces as the open error below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log.file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting HealthMoniTree...");

    let mut app = App::new(config)?;
    app.run()?;

    tracing::info!("HealthMoniTree shutdown complete.");
    Ok(())
}
