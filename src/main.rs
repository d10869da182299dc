use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trombi::config::{self, BoardConfig, PaperSize};
use trombi::generate::{self, RECORDS_FILE};
use trombi::output;
use trombi::scan::{self, IngestSummary, ScanOptions};
use trombi::store::RecordStore;

/// Layout flags that override `trombi.toml`.
#[derive(clap::Args, Clone)]
struct LayoutArgs {
    /// Portraits per row (1-10)
    #[arg(long)]
    grid_size: Option<u32>,
    /// Paper format: A4, A5 or A6
    #[arg(long)]
    paper_size: Option<PaperSize>,
}

#[derive(Parser)]
#[command(name = "trombi")]
#[command(about = "Build a printable class photo board from a folder of portraits")]
#[command(long_about = "\
Build a printable class photo board from a folder of portraits

Each image is named after the person it shows:

  <NAME> <CITY> Année de 1ère inscription <YEAR>.<ext>

  DOE John PARIS Année de 1ère inscription 2021.jpg
  MARTIN Léa SAINT MALO Année de 1ère inscription 2022.png

City tokens are written in capitals (\"St\" is accepted) and may span two
words. Files that don't follow the convention still appear on the board,
flagged so they can be renamed.

Run 'trombi gen-config' to generate a documented trombi.toml.")]
#[command(version)]
struct Cli {
    /// Folder holding the portraits
    #[arg(long, default_value = "photos", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Also scan subfolders
    #[arg(long, global = true)]
    recursive: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse every portrait and write records.json
    Scan,
    /// List files that break the naming convention; fails if there are any
    Check,
    /// Parse every portrait and render the printable board
    Build(LayoutArgs),
    /// Print a stock trombi.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();
    let options = ScanOptions {
        recursive: cli.recursive,
    };

    match cli.command {
        Command::Scan => {
            let config = config::load_config(&cli.source)?;
            let (store, summary) = run_ingest(&cli.source, options, &config, false)?;
            generate::write_records_json(&store, &cli.output.join(RECORDS_FILE))?;
            output::print_inventory(&store, &summary);
        }
        Command::Check => {
            let config = config::load_config(&cli.source)?;
            println!("==> Checking {}", cli.source.display());
            let (store, summary) = run_ingest(&cli.source, options, &config, false)?;
            output::print_errors(&store, &summary);
            let errors = store.errored().len();
            if errors > 0 {
                return Err(format!("{errors} file(s) break the naming convention").into());
            }
            println!("==> All filenames follow the convention");
        }
        Command::Build(layout) => {
            let config = config::load_config(&cli.source)?
                .with_overrides(layout.grid_size, layout.paper_size)?;

            println!("==> Reading {}", cli.source.display());
            let (store, summary) = run_ingest(&cli.source, options, &config, true)?;
            output::print_inventory(&store, &summary);

            println!("==> Rendering board → {}", cli.output.display());
            let board = generate::write_board(&store, &config, &cli.output)?;
            generate::write_records_json(&store, &cli.output.join(RECORDS_FILE))?;

            println!("==> Build complete: {}", board.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trombi=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Scan `source` and ingest every portrait into a fresh store.
///
/// With `live` set, one line per file is printed as results are applied.
fn run_ingest(
    source: &Path,
    options: ScanOptions,
    config: &BoardConfig,
    live: bool,
) -> Result<(RecordStore, IngestSummary), Box<dyn std::error::Error>> {
    init_thread_pool(&config.processing);
    let intakes = scan::scan(source, options)?;
    let mut store = RecordStore::new();

    let summary = if live {
        let (tx, rx) = std::sync::mpsc::channel();
        let printer = std::thread::spawn(move || {
            for event in rx {
                println!("    {}", output::format_ingest_event(&event));
            }
        });
        let summary = scan::ingest(&intakes, &mut store, Some(tx));
        printer.join().map_err(|_| "output thread panicked")?;
        summary
    } else {
        scan::ingest(&intakes, &mut store, None)
    };

    Ok((store, summary))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
