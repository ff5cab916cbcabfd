//! hwviz-cli - Headless access to the component info store
//!
//! Answers the same "describe module X" queries as the desktop viewer,
//! without a window.
//!
//! # Usage
//! ```sh
//! hwviz-cli describe CPU0
//! hwviz-cli --data ./perfdata.txt describe L3Group --json
//! hwviz-cli modules
//! hwviz-cli check
//! ```
//!
//! # Environment Variables
//! - `HWVIZ_PERFDATA_PATH` - Data file path (overridden by `--data`)
//! - `HWVIZ_DATA_SUBDIR` / `HWVIZ_DATA_FILE` - Names used when deriving the path

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hwviz::application::{InfoStore, LoadStatus};
use hwviz::config::DataEnvConfig;
use hwviz::domain::catalog::IgnoreReason;
use hwviz::domain::topology::ModuleId;
use hwviz::infrastructure::{FilePerfDataSource, logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Hardware topology info store", long_about = None)]
struct Cli {
    /// Performance data file (defaults to the path derived from the executable)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the report for one module
    Describe {
        /// Module name, e.g. CPU0, L3Group, cache_event_trace
        name: String,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the diagram's modules and whether the catalog has data for them
    Modules,
    /// Parse the data file and print a load summary
    Check,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    // Window settings are irrelevant here, so only the data settings are read
    let data = DataEnvConfig::from_lookup(&|key: &str| std::env::var(key).ok());
    let source = match &cli.data {
        Some(path) => FilePerfDataSource::new(path.clone()),
        None => data.source(),
    };
    let store = InfoStore::load(&source);

    match cli.command {
        Commands::Describe { name, json } => {
            let report = store.describe(&name);
            if json {
                let out = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize report")?;
                println!("{}", out);
            } else {
                println!("{}", report.to_string().trim_end());
            }
        }
        Commands::Modules => {
            for id in ModuleId::all() {
                let name = id.name();
                let marker = if store.has_data(&name) { "data" } else { "-" };
                println!("{:<20} {:<16} {}", name, format!("{:?}", id.kind()), marker);
            }
            let extra: Vec<&str> = store
                .module_names()
                .into_iter()
                .filter(|name| name.parse::<ModuleId>().is_err())
                .collect();
            if !extra.is_empty() {
                println!();
                println!("Catalog modules not in the diagram: {}", extra.join(", "));
            }
        }
        Commands::Check => {
            let summary = store.summary();
            println!("Source:   {}", summary.location);
            match &summary.status {
                LoadStatus::Loaded => println!("Status:   loaded"),
                LoadStatus::Partial(reason) => println!("Status:   partial ({})", reason),
                LoadStatus::Unavailable(reason) => println!("Status:   unavailable ({})", reason),
            }
            println!("Lines:    {}", summary.lines_read);
            println!("Modules:  {}", summary.modules);
            println!("Metrics:  {}", summary.metrics);
            println!("Ignored:  {}", summary.ignored_lines());
            for ignored in &summary.ignored {
                let reason = match ignored.reason {
                    IgnoreReason::NoOpenModule => "outside of a [module] section",
                    IgnoreReason::NotKeyValue => "not a key = value line",
                };
                println!("  line {}: {}", ignored.line_no, reason);
            }
        }
    }

    Ok(())
}
