use crate::record::{self, CrawlRecord};
use anyhow::{Context, Result};
use boolsearch_core::persist::IndexPaths;
use boolsearch_core::tokenizer::AnalyzerConfig;
use boolsearch_core::{IndexBuilder, IndexMeta};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

pub struct BuildOptions {
    pub input: String,
    pub output: PathBuf,
    pub analyzer: AnalyzerConfig,
    pub zipf_csv: Option<PathBuf>,
}

/// Input files in a stable order: a single file, or every `.json`/`.jsonl`
/// file under a directory.
fn input_files(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }
    WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")))
        .collect()
}

pub fn build_index(opts: &BuildOptions) -> Result<IndexMeta> {
    let start = Instant::now();
    let mut builder = IndexBuilder::new(opts.analyzer.clone());

    if opts.input == "-" {
        index_lines(io::stdin().lock(), "<stdin>", &mut builder)?;
    } else {
        let input = Path::new(&opts.input);
        let files = input_files(input);
        if files.is_empty() {
            tracing::warn!(input = %input.display(), "no input files found");
        }
        for file in files {
            let name = file.display().to_string();
            if file.extension().and_then(|s| s.to_str()) == Some("json") {
                index_json(&file, &mut builder)?;
            } else {
                let f = File::open(&file).with_context(|| format!("opening {name}"))?;
                index_lines(BufReader::new(f), &name, &mut builder)?;
            }
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    let paths = IndexPaths::new(&opts.output);
    let created_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default();
    let meta = builder.save(&paths, created_at, elapsed)?;

    if let Some(csv) = &opts.zipf_csv {
        crate::zipf::save_zipf_csv(csv, builder.postings()).with_context(|| format!("writing {}", csv.display()))?;
        tracing::info!(path = %csv.display(), "term frequencies written");
    }

    if let Some(stats) = &meta.stats {
        tracing::info!(
            documents = stats.documents,
            unique_terms = stats.unique_terms,
            total_tokens = stats.total_tokens,
            avg_token_len = stats.avg_token_len(),
            input_kb = (stats.input_bytes as f64 / 1024.0),
            skipped = stats.skipped_records,
            elapsed_secs = stats.elapsed_secs,
            kb_per_sec = stats.throughput_kb_per_sec(),
            "index build complete"
        );
    }
    Ok(meta)
}

fn add(builder: &mut IndexBuilder, rec: CrawlRecord) {
    let doc_id = builder.add_document(&rec.html, &rec.url, &rec.oid);
    tracing::debug!(doc_id, url = %rec.url, "indexed");
}

fn index_lines<R: BufRead>(reader: R, source: &str, builder: &mut IndexBuilder) -> Result<()> {
    for (n, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading {source}"))?;
        if line.trim().is_empty() {
            continue;
        }
        match record::parse_line(&line) {
            Ok(Some(rec)) => add(builder, rec),
            Ok(None) => builder.skip_record(),
            Err(e) => {
                tracing::warn!(source, line = n + 1, error = %e, "skipping malformed record");
                builder.skip_record();
            }
        }
    }
    Ok(())
}

// A `.json` file holds either one record or an array of them; anything else
// is read as line-delimited records.
fn index_json(file: &Path, builder: &mut IndexBuilder) -> Result<()> {
    let name = file.display().to_string();
    let text = std::fs::read_to_string(file).with_context(|| format!("reading {name}"))?;
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(serde_json::Value::Array(items)) => {
            for item in &items {
                match record::from_value(item) {
                    Some(rec) => add(builder, rec),
                    None => builder.skip_record(),
                }
            }
        }
        Ok(value) => match record::from_value(&value) {
            Some(rec) => add(builder, rec),
            None => builder.skip_record(),
        },
        Err(_) => index_lines(text.as_bytes(), &name, builder)?,
    }
    Ok(())
}
