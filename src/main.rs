// Entrypoint for the seeding CLI.
// - Keeps `main` small: resolve configuration, build the API client and
//   hand both to the seeder.
// - Early stops (unreachable backend, no categories, declined prompt)
//   print their reason and exit normally.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use unibytes_seed::{
    api::{ApiClient, MenuBackend},
    config::{Cli, SeedConfig},
    seeder::{RunOutcome, Seeder},
    ui::{self, ConsoleReport, Mark, Report},
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = SeedConfig::from(&cli);
    info!(?config, "starting seed run");

    let api = ApiClient::new(&config.base_url, config.timeout).context("Failed to build HTTP client")?;
    let mut report = ConsoleReport;
    ui::banner(&mut report, api.target());

    let spinner = ui::probe_spinner(api.target());
    let mut seeder = Seeder::new(api, &config);
    let reachable = seeder.probe(&mut ui::AfterSpinner::new(spinner, &mut report));
    if !reachable {
        return Ok(());
    }

    if !ui::confirm_seed(&config.base_url, cli.yes)? {
        report.line(Mark::Note, 0, "Nothing written.");
        return Ok(());
    }

    if let RunOutcome::Completed(summary) = seeder.seed(&mut report) {
        ui::closing_banner(&mut report);
        report.line(Mark::Note, 0, &summary.to_string());
    }
    Ok(())
}
