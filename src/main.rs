use clap::{Parser, Subcommand};
use tracing::info;

use directory_ledger::config::Config;
use directory_ledger::logging;
use directory_ledger::quality;
use directory_ledger::query::{search, SearchFilter};
use directory_ledger::storage::{DirectoryStore, JsonFileStore};

#[derive(Parser)]
#[command(name = "directory_ledger")]
#[command(about = "Historical city directory search and quality audit")]
#[command(version = "0.1.0")]
struct Cli {
    /// Dataset path, overriding config.toml
    #[arg(long, global = true)]
    dataset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the ledger with optional filters
    Search {
        /// Name filter (matches first or last name, either order)
        #[arg(long)]
        name: Option<String>,
        /// Occupation filter
        #[arg(long)]
        occupation: Option<String>,
        /// Address filter (matches business or home address)
        #[arg(long)]
        address: Option<String>,
        /// Years to include (comma-separated). Default: every year in the dataset
        #[arg(long)]
        years: Option<String>,
        /// Include rows flagged as OCR noise
        #[arg(long)]
        include_low_quality: bool,
        /// Maximum rows to print
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the distinct years present in the dataset
    Years,
    /// Run every quality heuristic over the dataset and report hit counts
    Audit,
}

fn open_store(path: &str) -> anyhow::Result<Box<dyn DirectoryStore>> {
    let is_sqlite = path.ends_with(".db") || path.ends_with(".sqlite");
    if is_sqlite {
        #[cfg(feature = "db")]
        {
            return Ok(Box::new(directory_ledger::storage::SqliteStore::open(path)?));
        }
        #[cfg(not(feature = "db"))]
        anyhow::bail!(
            "'{}' looks like a SQLite file; rebuild with the `db` feature to read it",
            path
        );
    }
    Ok(Box::new(JsonFileStore::open(path)?))
}

fn parse_years(list: &str) -> anyhow::Result<Vec<i32>> {
    list.split(',')
        .map(|s| {
            s.trim()
                .parse::<i32>()
                .map_err(|_| anyhow::anyhow!("Invalid year '{}'", s.trim()))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    let dataset_path = cli.dataset.unwrap_or(config.dataset.path);

    let store = open_store(&dataset_path)?;
    info!(records = store.records().len(), "Store ready");

    match cli.command {
        Commands::Search {
            name,
            occupation,
            address,
            years,
            include_low_quality,
            limit,
        } => {
            let years = match years {
                Some(list) => parse_years(&list)?,
                None => store.years().to_vec(),
            };

            let mut filter = SearchFilter::new(years);
            filter.name = name;
            filter.occupation = occupation;
            filter.address = address;
            filter.high_quality_only = config.query.high_quality_default && !include_low_quality;
            filter.result_cap = limit.unwrap_or(config.query.result_cap);

            let result = search(store.records(), &filter);

            println!("📒 Results found: {}", result.total_matches);
            if result.truncated {
                println!(
                    "   Showing the first {} entries. Narrow the filters for the rest.",
                    result.rows.len()
                );
            }
            for row in &result.rows {
                println!(
                    "   {} {} — {} — {} — {} — {} — p. {}",
                    row.first_name,
                    row.last_name,
                    row.occupation,
                    row.display_address(),
                    row.year,
                    row.publisher,
                    row.printed_page
                );
            }
        }
        Commands::Years => {
            println!("📅 Years in dataset:");
            for year in store.years() {
                println!("   {}", year);
            }
        }
        Commands::Audit => {
            let report = quality::audit(store.records());
            println!("🔎 Quality audit ({} records):", report.total_records);
            println!(
                "   High quality:       {} ({:.1}%)",
                report.high_quality,
                report.high_quality_share() * 100.0
            );
            println!("   Split house number: {}", report.split_house_number);
            println!("   Illegal symbol:     {}", report.illegal_symbol);
            println!("   Gibberish token:    {}", report.gibberish_token);
        }
    }

    Ok(())
}
