// listino CLI - partner price-list store, matrix inspection, margin runs

mod compute;
mod partner;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

// clap keeps its own usage-error exit code (2)
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

#[derive(Parser)]
#[command(name = "listino")]
#[command(about = "EV field-service pricing: partner vs client margins")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the per-region partner price-list store
    Partner {
        #[command(subcommand)]
        command: PartnerCommands,

        /// Partner store directory (defaults to the platform data dir)
        #[arg(long, global = true)]
        store: Option<PathBuf>,
    },

    /// Parse a price-list workbook and show the recovered rows
    Parse {
        /// XLSX price list in the template layout
        input: PathBuf,

        /// List the distinct (block, distance) packages instead of rows
        #[arg(long)]
        packages: bool,

        /// Emit output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Reconcile client vs partner prices and compute margins
    #[command(after_help = "\
Examples:
  listino compute --config run.toml --client prezzario.xlsx
  listino compute --config run.toml --report report_lombardia.xlsx
  listino compute --config run.toml --json")]
    Compute {
        /// Computation config (TOML: region, package, quantity, rebate)
        #[arg(long, short = 'c')]
        config: PathBuf,

        /// Client price list (defaults to the stored default client file)
        #[arg(long)]
        client: Option<PathBuf>,

        /// Partner store directory (defaults to the platform data dir)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Write a two-sheet XLSX report (Summary + Dettaglio)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Emit the full reconciliation result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PartnerCommands {
    /// Save (create or overwrite) a region's partner price list
    Save { region: String, file: PathBuf },
    /// List stored regions
    List,
    /// Delete a region's partner price list
    Delete { region: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Partner { command, store } => partner::run(command, store),
        Commands::Parse {
            input,
            packages,
            json,
        } => run_parse(&input, packages, json),
        Commands::Compute {
            config,
            client,
            store,
            report,
            json,
        } => compute::run(&config, client.as_deref(), store, report.as_deref(), json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run_parse(input: &std::path::Path, packages: bool, json: bool) -> Result<(), String> {
    let grid = listino_io::xlsx::import_grid(input)?;
    let rows = listino_engine::parse(&grid).map_err(|e| e.to_string())?;

    if packages {
        let keys = listino_recon::packages(&rows);
        if json {
            let out = serde_json::to_string_pretty(&keys).map_err(|e| e.to_string())?;
            println!("{out}");
        } else {
            for key in &keys {
                println!("{} | {}", key.block, key.distance);
            }
            println!("{} packages", keys.len());
        }
        return Ok(());
    }

    if json {
        let out = serde_json::to_string_pretty(&rows).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    for row in &rows {
        println!(
            "{} | {} | {} | {}",
            row.block,
            row.distance,
            row.full_activity,
            util::format_eur(row.price)
        );
    }
    println!("{} rows", rows.len());
    Ok(())
}
