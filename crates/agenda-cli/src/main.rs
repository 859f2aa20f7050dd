//! `agenda` binary

use agenda_cli::{execute, init_logging, open_agenda, report_generator, AgendaConfig, Cli};
use anyhow::{Context, Result};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AgendaConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    init_logging(&config.log_level, config.log_format);
    tracing::debug!(version = agenda_cli::VERSION, "starting agenda");

    let agenda = open_agenda(&config)?;
    let generator = report_generator(&config.report);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&agenda, &generator, cli.command, &mut out).await
}
