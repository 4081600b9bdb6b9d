use anyhow::Result;
use boolsearch_core::tokenizer::{AnalyzerConfig, StemmerProfile};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod build;
mod record;
mod zipf;

use build::{build_index, BuildOptions};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a boolean search index from crawled pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build forward.idx and inverted.idx from JSONL crawl records
    Build {
        /// Input file, directory of .json/.jsonl files, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: String,
        /// Output index directory
        #[arg(long, default_value = ".")]
        output: PathBuf,
        /// Suffix table: none, russian or russian-english
        #[arg(long, default_value_t = StemmerProfile::Russian)]
        stemmer: StemmerProfile,
        /// Index tag names and script/style bodies as text
        #[arg(long, default_value_t = false)]
        keep_markup: bool,
        /// Truncate words to this many characters
        #[arg(long, default_value_t = 63)]
        max_token_len: usize,
        /// Also write rank,term,frequency rows for Zipf analysis
        #[arg(long)]
        zipf_csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, stemmer, keep_markup, max_token_len, zipf_csv } => {
            let analyzer = AnalyzerConfig {
                suffix_rules: stemmer.rules(),
                max_token_len: max_token_len.max(1),
                strip_markup: !keep_markup,
            };
            build_index(&BuildOptions { input, output, analyzer, zipf_csv })?;
            Ok(())
        }
    }
}
