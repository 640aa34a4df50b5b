use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use meteorite_stats::{
    bot::{run_console, Router},
    io::{self, CsvFormat, DatasetReader},
    report::{self, group_thousands},
    visualization::{
        print_class_table, print_decade_histogram, print_fall_table, print_heaviest_table,
        print_summary_table,
    },
    Analyzer, AppConfig, Dataset,
};

#[derive(Parser)]
#[command(
    name = "meteorite-stats",
    about = "Meteorite Landing Statistics - reports and a chat-bot over meteorite landings",
    version
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Dataset file (CSV, or TSV with a .tsv extension); overrides the config
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full statistics report and save the result tables
    Report {
        /// Skip writing the CSV result files
        #[arg(long)]
        no_save: bool,

        /// Directory for the CSV result files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Display statistics as console tables
    Analyze {
        /// Number of classes to list
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Write the class and summary tables to CSV files
    Save {
        /// Directory for the CSV result files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Also export every statistic as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Display a quick summary of the dataset
    Summary,

    /// Talk to the bot on the console, one message per line
    Chat,

    /// Serve the bot over HTTP
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let dataset = CsvFormat::for_path(path)
        .read(path)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))?;
    Ok(dataset)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(input) = cli.input {
        config.data.path = input;
    }

    let dataset = load_dataset(&config.data.path)?;
    info!(path = %config.data.path.display(), rows = dataset.len(), "dataset ready");

    match cli.command {
        Commands::Report { no_save, output_dir } => {
            let dir = output_dir.unwrap_or_else(|| config.output.dir.clone());
            let saved = if no_save {
                None
            } else {
                let result = io::save_results(&dataset, &dir);
                if let Err(e) = &result {
                    warn!(error = %e, "saving results failed");
                }
                Some(result)
            };
            println!("{}", report::full_report(&dataset, &config.report, saved.as_ref()));
        }

        Commands::Analyze { top } => {
            let top = top.unwrap_or(config.report.top_classes);
            if top == 0 {
                anyhow::bail!("--top must be a positive number of classes");
            }
            let analyzer = Analyzer::new(&dataset);

            println!(
                "\n{}",
                format!("Meteorite Landing Analysis: {}", config.data.path.display())
                    .bold()
                    .cyan()
            );
            println!("  Loaded {} records", group_thousands(dataset.len() as u64));

            let mass = analyzer.mass_statistics();
            print_summary_table(&analyzer.summary(), mass.as_ref());
            print_class_table(&analyzer.class_distribution(), top);

            match analyzer.year_analysis() {
                Some(analysis) => {
                    print_fall_table(&analysis.fall_distribution);
                    print_decade_histogram(&analysis.decades);
                }
                None => eprintln!(
                    "{}: year and fall type data are not available in the dataset",
                    "Warning".yellow()
                ),
            }

            print_heaviest_table(&analyzer.top_by_mass(config.report.heavy_count));
        }

        Commands::Save {
            output_dir,
            json,
            pretty,
        } => {
            let dir = output_dir.unwrap_or_else(|| config.output.dir.clone());
            let artifacts = io::save_results(&dataset, &dir)?;
            println!(
                "{} {} and {}",
                "Saved:".green().bold(),
                artifacts.class_statistics.display(),
                artifacts.summary_statistics.display()
            );

            if let Some(path) = json {
                let statistics = Analyzer::new(&dataset).report(&config.report);
                io::write_report_json(&statistics, &path, pretty)?;
                println!("{} {}", "Saved:".green().bold(), path.display());
            }
        }

        Commands::Summary => {
            let summary = Analyzer::new(&dataset).summary();
            let value = |v: Option<f64>, decimals: usize| {
                v.map(|v| format!("{v:.decimals$}"))
                    .unwrap_or_else(|| "n/a".to_string())
            };

            println!("\n{}", "Quick Summary".bold().cyan());
            println!("{}", "=".repeat(40));
            println!("  Dataset:          {}", dataset.name);
            println!("  Records:          {}", group_thousands(summary.total_records as u64));
            println!("  Cleaned records:  {}", group_thousands(summary.cleaned_records as u64));
            println!("  Classes:          {}", summary.unique_classes);
            println!("  Mean mass:        {} g", value(summary.average_mass_grams, 2));
            println!("  Mean latitude:    {}°", value(summary.mean_latitude, 6));
            println!("  Mean longitude:   {}°", value(summary.mean_longitude, 6));
        }

        Commands::Chat => {
            let router = Router::new(Arc::new(dataset), &config);
            let stdin = std::io::stdin();
            run_console(&router, stdin.lock(), std::io::stdout())?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let router = Router::new(Arc::new(dataset), &config);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(meteorite_stats::web::start_server(
                router,
                &config.server.host,
                port,
            ))?;
        }
    }

    Ok(())
}
