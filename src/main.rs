//! dupdetect: near-duplicate document detection via banded MinHash LSH.
//!
//! Builds and queries a Jaccard-similarity index over a text corpus
//! without ever materializing the full pairwise comparison matrix.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dupdetect::config::AppConfig;
use dupdetect::{cli, preprocess::PreprocessFlags};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dupdetect")]
#[command(version, about = "Near-duplicate document detection via banded MinHash LSH", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Build an index from a single-column CSV corpus
    dupdetect build corpus.csv index.json --m 100 --r 5

    # Find near-duplicates of an ad-hoc query document
    dupdetect query index.json \"the quick brown fox\" --threshold 0.5

    # Verify every LSH candidate pair by exact Jaccard similarity
    dupdetect all-pairs index.json --threshold 0.8 --csv-out pairs.csv

    # Tabulate detection sensitivity over a grid of banding parameters
    dupdetect sensitivity --s1 0.3 --s2 0.8 --grid 100:5,100:10,50:5")]
struct Cli {
    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shingle a CSV corpus, compute MinHash signatures, and persist the index.
    Build {
        /// Path to a single-column CSV corpus (a `text` header is preferred).
        corpus: PathBuf,
        /// Path to write the JSON index snapshot.
        output: PathBuf,
        /// Signature length (number of hash functions).
        #[arg(long, default_value_t = 100)]
        m: usize,
        /// Band width (signature positions per band); must divide `m`.
        #[arg(long, default_value_t = 5)]
        r: usize,
        /// Hash function family: Xorhash, Linconhash, or MD5hash.
        #[arg(long, default_value = "Linconhash")]
        hash_family: String,
        /// Shingle width in tokens.
        #[arg(long, default_value_t = 3)]
        shingle_size: usize,
        /// Worker-pool size for signature computation.
        #[arg(long, default_value_t = 0)]
        threads: usize,
    },
    /// Find near-duplicates of an ad-hoc query document.
    Query {
        /// Path to a JSON index snapshot.
        index: PathBuf,
        /// The query document text.
        text: String,
        /// Minimum Jaccard similarity to report (exclusive).
        #[arg(long, default_value_t = 0.5)]
        threshold: f64,
    },
    /// Verify every LSH candidate pair by exact Jaccard similarity.
    AllPairs {
        /// Path to a JSON index snapshot.
        index: PathBuf,
        /// Minimum Jaccard similarity to report (exclusive).
        #[arg(long, default_value_t = 0.8)]
        threshold: f64,
        /// Optional path to write the `doc_id1,doc_id2` side-channel CSV.
        #[arg(long)]
        csv_out: Option<PathBuf>,
    },
    /// Tabulate the banded-LSH sensitivity model over a grid of `(M, r)`.
    Sensitivity {
        /// Lower similarity threshold (false-negative side).
        #[arg(long, default_value_t = 0.3)]
        s1: f64,
        /// Upper similarity threshold (false-positive side).
        #[arg(long, default_value_t = 0.8)]
        s2: f64,
        /// Comma-separated `M:r` pairs, e.g. `100:5,100:10,50:5`.
        #[arg(long, default_value = "100:5,100:10,50:5")]
        grid: String,
    },
}

fn parse_grid(raw: &str) -> Result<Vec<(usize, usize)>> {
    raw.split(',')
        .map(|pair| {
            let (m, r) = pair
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("invalid grid entry '{pair}', expected M:r"))?;
            Ok((m.trim().parse()?, r.trim().parse()?))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Build {
            corpus,
            output,
            m,
            r,
            hash_family,
            shingle_size,
            threads,
        } => {
            let config = AppConfig {
                m,
                r,
                hash_family: Box::leak(hash_family.into_boxed_str()),
                preprocess: PreprocessFlags {
                    shingle_size,
                    ..PreprocessFlags::reference()
                },
                threads: if threads == 0 {
                    AppConfig::default().threads
                } else {
                    threads
                },
            };
            use dupdetect::config::Validatable;
            let errors = config.validate();
            if !errors.is_empty() {
                for error in &errors {
                    eprintln!("error: {error}");
                }
                anyhow::bail!("invalid configuration");
            }

            let count = cli::run_build(&corpus, &output, &config)?;
            println!("indexed {count} documents -> {}", output.display());
        }
        Commands::Query {
            index,
            text,
            threshold,
        } => {
            let results = cli::run_query(&index, &text, threshold)?;
            for doc_id in results {
                println!("{doc_id}");
            }
        }
        Commands::AllPairs {
            index,
            threshold,
            csv_out,
        } => {
            let result = cli::run_all_pairs(&index, threshold, csv_out.as_deref())?;
            for ((i, j), score) in &result.pairs {
                println!("{i}\t{j}\t{score:.6}");
            }
        }
        Commands::Sensitivity { s1, s2, grid } => {
            let grid = parse_grid(&grid)?;
            let rows = cli::run_sensitivity(&grid, s1, s2);
            println!("M\tr\tp1\tp2");
            for row in rows {
                println!("{}\t{}\t{:.6}\t{:.6}", row.m, row.r, row.p1, row.p2);
            }
        }
    }

    Ok(())
}
