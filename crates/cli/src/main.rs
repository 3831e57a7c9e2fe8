use std::io;

use anyhow::Context;
use clap::Parser;

use mmbill_billing::BillSession;
use mmbill_cli::{export_once, Cli, Command, Shell};
use mmbill_export::BillExporter;
use mmbill_observability::LogFormat;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    mmbill_observability::init(LogFormat::from_json_flag(cli.settings.json_logs));

    let profile = cli.settings.load_profile()?;
    let catalog = profile.catalog().context("store profile catalog")?;
    let exporter = BillExporter::new(
        profile.letterhead(cli.settings.logo.as_deref()),
        &cli.settings.output_dir,
    );
    tracing::info!(
        output_dir = %cli.settings.output_dir.display(),
        products = catalog.len(),
        "mmbill starting"
    );

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let mut shell = Shell::new(BillSession::new(catalog), &exporter);
            shell.run(io::stdin().lock(), io::stdout().lock())
        }
        Command::Export(args) => {
            let today = chrono::Local::now().date_naive();
            let receipt = export_once(&args, catalog, &exporter, today)?;
            println!("{}", receipt.path.display());
            Ok(())
        }
    }
}
