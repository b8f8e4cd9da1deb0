use acceptance_rates::config::Config;
use acceptance_rates::logging;
use acceptance_rates::pipeline::Pipeline;
use acceptance_rates::sources::{LocalFileSource, PageSource, WebPageSource};
use acceptance_rates::types::YearKey;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "acceptance_rates")]
#[command(about = "Hsinchu junior-high acceptance-rate scraper")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config; a missing default file means built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a range of academic years from the live site
    Run {
        /// First academic year (inclusive)
        #[arg(long)]
        from: Option<u32>,
        /// Last academic year (exclusive)
        #[arg(long)]
        to: Option<u32>,
        /// Directory for the .xlsx and .png outputs
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Convert a saved copy of the results page
    Local {
        /// HTML file to read
        #[arg(long)]
        file: Option<PathBuf>,
        /// Year key used to label the run
        #[arg(long, default_value = "111")]
        year: String,
        /// Text encoding of the file (any WHATWG label)
        #[arg(long)]
        encoding: Option<String>,
        /// Directory for the .xlsx and .png outputs
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let (path, required) = match &cli.config {
        Some(p) => (p.clone(), true),
        None => (PathBuf::from("config.toml"), false),
    };
    Config::load(&path, required).with_context(|| format!("loading {}", path.display()))
}

async fn execute(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Run {
            from,
            to,
            output_dir,
        } => {
            if let Some(from) = from {
                config.years.start = from;
            }
            if let Some(to) = to {
                config.years.end = to;
            }
            if let Some(dir) = output_dir {
                config.output.dir = dir;
            }
            if config.years.start >= config.years.end {
                bail!(
                    "year range {}..{} is empty",
                    config.years.start,
                    config.years.end
                );
            }

            let source = WebPageSource::from_config(&config.source);
            let pipeline = Pipeline::from_config(&config);
            let years = (config.years.start..config.years.end).map(YearKey::from);
            info!(
                "🔄 Scraping years {}..{} into {}",
                config.years.start,
                config.years.end,
                config.output.dir.display()
            );
            pipeline.run_years(&source, years).await;
        }
        Commands::Local {
            file,
            year,
            encoding,
            output_dir,
        } => {
            if let Some(file) = file {
                config.source.local_path = file;
            }
            if let Some(encoding) = encoding {
                config.source.local_encoding = encoding;
            }
            if let Some(dir) = output_dir {
                config.output.dir = dir;
            }

            let source = LocalFileSource::from_config(&config.source)?;
            let pipeline = Pipeline::from_config(&config);
            info!("📄 Converting {}", source.location(&YearKey::new(year.as_str())));
            pipeline.run_years(&source, [YearKey::new(year)]).await;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let logger = logging::build_logger(&config.logging).context("initializing logging")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building runtime")?;

    tracing::dispatcher::with_default(&logger.dispatch, || {
        runtime.block_on(execute(cli.command, config))
    })
}
