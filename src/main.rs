use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use campo_core::{
    config::Config,
    export::{self, ExportFormat},
    ingest::ingest_path,
    summary::Summary,
    LoadPolicy, Store,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "campo", about = "Terminal dashboard for field application spreadsheets")]
struct Cli {
    /// Spreadsheet to load at startup (.xlsx, .xls, .xlsm, .xlsb, .ods, .csv).
    file: Option<PathBuf>,

    /// Write debug logs to /tmp/campo-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// How a load treats existing data: if-empty, replace or append.
    #[arg(long)]
    policy: Option<LoadPolicy>,

    /// Print a summary to stdout instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Write every record to PATH and exit.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Export format (csv or jsonl). Implies --headless. Defaults to the
    /// export path's extension; without --export, records go to stdout.
    #[arg(long)]
    format: Option<ExportFormat>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/campo-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("campo debug log started, tail -f /tmp/campo-debug.log");
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        Config::defaults()
    });
    if let Some(policy) = cli.policy {
        config.ingest.load_policy = policy;
    }

    if cli.headless || cli.export.is_some() || cli.format.is_some() {
        return headless(&cli, &config);
    }

    campo_tui::run(config, cli.file)
}

fn headless(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let path = cli.file.as_deref().context("headless mode needs a FILE to load")?;
    let batch = ingest_path(path, &config.ingest.options())
        .with_context(|| format!("could not ingest {}", path.display()))?;

    let mut store = Store::new();
    store.commit(batch, config.ingest.load_policy);

    if let Some(out) = &cli.export {
        let format = cli.format.unwrap_or_else(|| ExportFormat::from_path(out));
        export::export_to_path(&store, format, out)
            .with_context(|| format!("could not write {}", out.display()))?;
        eprintln!("{} records exported to {}", store.len(), out.display());
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    match cli.format {
        Some(format) => export::write(&store, format, &mut stdout)?,
        None => {
            let summary = Summary::from_store(&store, config.ui.top_products);
            stdout.write_all(campo::report::render(&summary, config.ui.hectare_decimals).as_bytes())?;
        }
    }
    stdout.flush()?;
    Ok(())
}
