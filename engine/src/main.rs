use anyhow::Result;
use boolsearch_core::persist::IndexPaths;
use boolsearch_core::present::Report;
use boolsearch_core::{SearchIndex, SearchOutcome};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "engine")]
#[command(about = "Answer boolean queries against a built index", long_about = None)]
struct Args {
    /// Directory containing forward.idx and inverted.idx
    #[arg(long, default_value = ".")]
    index: String,
    /// Query words; without them an interactive session starts
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    query: Vec<String>,
}

const USAGE: &str = "\
Usage:
  - Single term: матч
  - AND operation: матч && футбол
  - OR operation: матч || игра
  - NOT operation: !теннис
  - Parentheses: (красный || желтый) && автомобиль
  - Complex: матч && (футбол || хоккей) && !теннис
  - Multiple spaces are allowed
";

fn run_query(index: &SearchIndex, query: &str, out: &mut impl Write) -> io::Result<()> {
    tracing::debug!(query, "running query");
    let outcome = index.search(query);
    if let SearchOutcome::Boolean(hit) = &outcome {
        for err in &hit.errors {
            eprintln!("Error: {err}");
        }
    }
    write!(out, "{}", Report::new(&outcome, index.documents()))
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    // A missing or damaged file is reported and the session goes on with what loaded.
    let (index, errors) = SearchIndex::open_lenient(&IndexPaths::new(&args.index));
    for err in &errors {
        tracing::error!(error = %err, "index load failed");
        eprintln!("Cannot load index: {err}");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.query.is_empty() {
        run_query(&index, &args.query.join(" "), &mut out)?;
        return Ok(());
    }

    writeln!(out, "Search engine loaded.")?;
    writeln!(out, "Documents: {}", index.documents().len())?;
    writeln!(out, "Unique terms: {}\n", index.postings().len())?;
    writeln!(out, "{USAGE}")?;
    write!(out, "Enter search query (empty to exit): ")?;
    out.flush()?;

    let mut queries = 0u64;
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }
        run_query(&index, &line, &mut out)?;
        queries += 1;
        write!(out, "\nEnter search query (empty to exit): ")?;
        out.flush()?;
    }
    tracing::info!(queries, "session ended");
    Ok(())
}
