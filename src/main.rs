//! Statistics reporting CLI for the archival graph database.
//!
//! Usage:
//!   archive-stats [-o FILE] [--format FORMAT] [--quiet]
//!   archive-stats --repository ID [-o FILE] [--format FORMAT]
//!
//! Example:
//!   archive-stats -o out.csv --quiet --format csv

use anyhow::Result;
use archive_stats::client::CypherClient;
use archive_stats::config::Config;
use archive_stats::progress::Progress;
use archive_stats::report::{self, Format};
use archive_stats::stats::{authorities, countries, repositories, vocabularies};
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "archive-stats")]
#[command(about = "Obtain statistical information from the archival graph and write it to a file", long_about = None)]
struct Cli {
    /// Output file (default: standard output, which can be redirected)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print no messages or progress (forced when writing to standard output)
    #[arg(long)]
    quiet: bool,

    /// Report on a single repository by id instead of running the full report
    #[arg(long, value_name = "ID")]
    repository: Option<String>,
}

fn main() -> Result<()> {
    // Logs go to stderr so they can never interleave with a stdout report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("archive_stats=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    archive_stats::load_env();
    let cli = Cli::parse();

    let config = Config::load()?;
    let client = CypherClient::new(&config)?;

    let quiet = cli.quiet || cli.output.is_none();
    let mut progress = Progress::new(!quiet);

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    if let Some(repo_id) = &cli.repository {
        let rows = repositories::collect_one(&client, repo_id)?;
        report::write_section(&mut out, cli.format, &rows, &repositories::columns())?;
        return Ok(());
    }

    // Fixed order; each section completes all its round-trips and is
    // written before the next collector starts.
    let rows = vocabularies::collect(&client, &mut progress)?;
    report::write_section(&mut out, cli.format, &rows, &vocabularies::columns())?;

    let rows = authorities::collect(&client, &mut progress)?;
    report::write_section(&mut out, cli.format, &rows, &authorities::columns())?;

    let rows = countries::collect(&client, &mut progress)?;
    report::write_section(&mut out, cli.format, &rows, &countries::columns())?;

    let rows = repositories::collect_by_country(&client, &mut progress)?;
    report::write_section(&mut out, cli.format, &rows, &repositories::by_country_columns())?;

    Ok(())
}
