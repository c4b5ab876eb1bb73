use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use config::FinderConfig;
use filings_indexer::{
    export_csv, FilingRecord, IndexLoader, IndexerError, LoadedIndex, Period, Quarter,
};
use filings_search::{
    filings_for, find_entities, resolve_selection_with_base, select, EntityMatch,
    RetrievalLocation, SearchMode,
};
use output::{describe_load, print_json, print_stdout, render_entities, render_filings};
use serde::Serialize;
use std::path::PathBuf;

mod config;
mod fetch;
mod output;

#[derive(Parser)]
#[command(name = "filings-finder")]
#[command(about = "Find EDGAR filings by company name or CIK", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (defaults to ./filings-finder.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download quarterly company index files
    Fetch(FetchArgs),

    /// Load index files and write them as one CSV table
    Export(ExportArgs),

    /// Find companies by name or CIK
    Search(SearchArgs),

    /// List a company's filings for a year
    Filings(FilingsArgs),

    /// Search, pick a company and a filing, print its URL
    Lookup(LookupArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Exact year of the filings
    #[arg(long)]
    year: i32,

    /// Restrict to these quarters (comma-separated, e.g. 1,2 or QTR3)
    #[arg(long, value_delimiter = ',')]
    quarters: Vec<Quarter>,

    /// Directory of .idx files (overrides config data_dir)
    #[arg(long)]
    dir: Option<PathBuf>,
}

impl SourceArgs {
    fn period(&self) -> Period {
        Period::with_quarters(self.year, self.quarters.iter().copied())
    }
}

#[derive(Args)]
struct FetchArgs {
    /// First year to download (YYYY)
    #[arg(long)]
    start_year: i32,

    /// Last year to download (YYYY), inclusive
    #[arg(long)]
    end_year: i32,

    /// Restrict to these quarters (comma-separated)
    #[arg(long, value_delimiter = ',')]
    quarters: Vec<Quarter>,

    /// Download directory (created if missing; overrides config data_dir)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExportArgs {
    /// Year to export
    #[arg(long, required_unless_present = "all")]
    year: Option<i32>,

    /// Export every .idx file in the directory
    #[arg(long, conflicts_with = "year")]
    all: bool,

    /// Restrict to these quarters (comma-separated)
    #[arg(long, value_delimiter = ',', requires = "year")]
    quarters: Vec<Quarter>,

    /// Directory of .idx files (overrides config data_dir)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// CSV file to write
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct SearchArgs {
    /// Company name fragment or CIK
    term: String,

    /// Search by company name or CIK
    #[arg(long, value_enum, default_value_t = SearchBy::Name)]
    by: SearchBy,

    #[command(flatten)]
    source: SourceArgs,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FilingsArgs {
    /// Company CIK (leading zeros optional)
    cik: String,

    #[command(flatten)]
    source: SourceArgs,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LookupArgs {
    /// Company name fragment or CIK
    term: String,

    /// Search by company name or CIK
    #[arg(long, value_enum, default_value_t = SearchBy::Name)]
    by: SearchBy,

    #[command(flatten)]
    source: SourceArgs,

    /// Index number of the company to display filings for (name search)
    #[arg(long, allow_hyphen_values = true)]
    entity: Option<String>,

    /// Index number of the filing to resolve to a URL
    #[arg(long, allow_hyphen_values = true)]
    filing: Option<String>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum SearchBy {
    Name,
    Cik,
}

impl SearchBy {
    const fn as_domain(self) -> SearchMode {
        match self {
            SearchBy::Name => SearchMode::ByName,
            SearchBy::Cik => SearchMode::ByIdentifier,
        }
    }
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    period: String,
    mode: SearchMode,
    term: &'a str,
    entities: Vec<EntityMatch>,
}

#[derive(Serialize)]
struct FilingsOutput<'a> {
    period: String,
    cik: &'a str,
    filings: Vec<&'a FilingRecord>,
}

#[derive(Serialize)]
struct LookupOutput<'a> {
    period: String,
    mode: SearchMode,
    term: &'a str,
    entities: Vec<EntityMatch>,
    selected: Option<EntityMatch>,
    filings: Vec<&'a FilingRecord>,
    url: Option<RetrievalLocation>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // stdout is reserved for JSON when requested
    let json_output = match &cli.command {
        Commands::Fetch(args) => args.json,
        Commands::Search(args) => args.json,
        Commands::Filings(args) => args.json,
        Commands::Lookup(args) => args.json,
        Commands::Export(_) => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = FinderConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Fetch(args) => run_fetch(args, &config).await?,
        Commands::Export(args) => run_export(args, &config)?,
        Commands::Search(args) => run_search(args, &config)?,
        Commands::Filings(args) => run_filings(args, &config)?,
        Commands::Lookup(args) => run_lookup(args, &config)?,
    }

    Ok(())
}

/// Download quarterly index files
async fn run_fetch(args: FetchArgs, config: &FinderConfig) -> Result<()> {
    if args.start_year > args.end_year {
        anyhow::bail!(
            "Start year {} is after end year {}",
            args.start_year,
            args.end_year
        );
    }
    let dir = args.dir.unwrap_or_else(|| config.data_dir.clone());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create download directory {}", dir.display()))?;

    let targets = fetch::plan_targets(
        &config.index_base_url,
        args.start_year,
        args.end_year,
        &args.quarters,
        &dir,
    );
    let summary = fetch::fetch_all(config, &targets).await?;

    if args.json {
        print_json(&summary)?;
    } else {
        eprintln!(
            "All requested files have been attempted: {} downloaded, {} failed",
            summary.downloaded.len(),
            summary.failed.len()
        );
        for failure in &summary.failed {
            eprintln!("  {} ({})", failure.url, failure.error);
        }
    }
    Ok(())
}

/// Load index files and save them as CSV
fn run_export(args: ExportArgs, config: &FinderConfig) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| config.data_dir.clone());
    let loader = IndexLoader::new(&dir);
    let loaded = match args.year {
        Some(year) if !args.all => {
            let period = Period::with_quarters(year, args.quarters.iter().copied());
            finish_load(loader.load(&period), &period.to_string())?
        }
        _ => finish_load(loader.load_all(), "all index files")?,
    };

    let written = export_csv(&loaded.records, &args.out)
        .with_context(|| format!("Failed to save the data to {}", args.out.display()))?;
    eprintln!("Data saved successfully to {} ({written} rows)", args.out.display());
    Ok(())
}

/// Find companies matching a name fragment or CIK
fn run_search(args: SearchArgs, config: &FinderConfig) -> Result<()> {
    let period = args.source.period();
    let loaded = load_source(&args.source, config)?;
    let mode = args.by.as_domain();
    let entities = find_entities(&loaded.records, &args.term, mode);

    if args.json {
        return print_json(&SearchOutput {
            period: period.to_string(),
            mode,
            term: &args.term,
            entities,
        });
    }
    if entities.is_empty() {
        eprintln!("No matching entities found for the given {mode}.");
        return Ok(());
    }
    eprintln!("Matching companies/CIKs:");
    print_stdout(&render_entities(&entities))
}

/// List one company's filings for the period
fn run_filings(args: FilingsArgs, config: &FinderConfig) -> Result<()> {
    let period = args.source.period();
    let loaded = load_source(&args.source, config)?;
    let filings = filings_for(&loaded.records, &args.cik, &period);

    if args.json {
        return print_json(&FilingsOutput {
            period: period.to_string(),
            cik: &args.cik,
            filings,
        });
    }
    if filings.is_empty() {
        eprintln!("No filings found for this company.");
        return Ok(());
    }
    print_stdout(&render_filings(&filings))
}

/// Search → entity → filings → URL, stopping where an ordinal is still needed
fn run_lookup(args: LookupArgs, config: &FinderConfig) -> Result<()> {
    let period = args.source.period();
    let loaded = load_source(&args.source, config)?;
    let mode = args.by.as_domain();
    let entities = find_entities(&loaded.records, &args.term, mode);

    let mut output = LookupOutput {
        period: period.to_string(),
        mode,
        term: &args.term,
        entities,
        selected: None,
        filings: Vec::new(),
        url: None,
    };

    if output.entities.is_empty() {
        if args.json {
            return print_json(&output);
        }
        eprintln!("No matching entities found for the given {mode}.");
        return Ok(());
    }

    let cik = match (mode, args.entity.as_deref()) {
        // a CIK search already names the company
        (SearchMode::ByIdentifier, _) => args.term.clone(),
        (SearchMode::ByName, Some(raw)) => {
            let entity = select(&output.entities, raw).context("Invalid company selection")?;
            output.selected = Some(entity.clone());
            entity.registrant_id.clone()
        }
        (SearchMode::ByName, None) => {
            if args.json {
                return print_json(&output);
            }
            eprintln!("Matching companies/CIKs:");
            print_stdout(&render_entities(&output.entities))?;
            eprintln!("Re-run with --entity <index> to display filings for one company.");
            return Ok(());
        }
    };

    output.filings = filings_for(&loaded.records, &cik, &period);
    if let Some(raw) = args.filing.as_deref() {
        let url = resolve_selection_with_base(&output.filings, raw, &config.archive_base_url)
            .context("Invalid filing selection")?;
        output.url = Some(url);
    }

    if args.json {
        return print_json(&output);
    }
    match &output.url {
        Some(url) => {
            eprintln!("You can view the filing at the following URL:");
            print_stdout(url.as_str())
        }
        None if output.filings.is_empty() => {
            eprintln!("No filings found for this company.");
            Ok(())
        }
        None => {
            print_stdout(&render_filings(&output.filings))?;
            eprintln!("Re-run with --filing <index> to get the filing URL.");
            Ok(())
        }
    }
}

fn load_source(source: &SourceArgs, config: &FinderConfig) -> Result<LoadedIndex> {
    let dir = source.dir.clone().unwrap_or_else(|| config.data_dir.clone());
    let period = source.period();
    finish_load(IndexLoader::new(&dir).load(&period), &period.to_string())
}

/// Log the load summary, or turn "nothing loaded" into a readable failure
fn finish_load(result: filings_indexer::Result<LoadedIndex>, scope: &str) -> Result<LoadedIndex> {
    match result {
        Ok(loaded) => {
            log::info!("{}", describe_load(&loaded.stats));
            for failure in &loaded.stats.failures {
                log::warn!("Skipped {}: {}", failure.path.display(), failure.message);
            }
            Ok(loaded)
        }
        Err(IndexerError::EmptyLoad(stats)) => anyhow::bail!(
            "No data was loaded for {scope} ({} files missing, {} unreadable). \
             Please check your file paths and year input.",
            stats.files_missing.len(),
            stats.failures.len()
        ),
        Err(err) => Err(err.into()),
    }
}
