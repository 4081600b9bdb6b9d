use crate::error::Result;
use crate::index::{DocId, Document, DocumentTable, PostingStore};
use crate::meta::{BuildStats, IndexMeta, FORMAT_VERSION};
use crate::persist::{save_forward, save_inverted, save_meta, IndexPaths};
use crate::tokenizer::{Analyzer, AnalyzerConfig};

/// Single-pass, single-writer index construction.
pub struct IndexBuilder {
    analyzer: Analyzer,
    docs: DocumentTable,
    postings: PostingStore,
    stats: BuildStats,
}

impl IndexBuilder {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            analyzer: Analyzer::new(config),
            docs: DocumentTable::new(),
            postings: PostingStore::new(),
            stats: BuildStats::default(),
        }
    }

    /// Index one document and return its id. Ids follow arrival order.
    pub fn add_document(&mut self, text: &str, url: &str, external_id: &str) -> DocId {
        let doc_id = self.docs.universe();
        self.stats.input_bytes += text.len() as u64;
        for term in self.analyzer.tokens(text) {
            self.stats.total_tokens += 1;
            self.stats.total_token_chars += term.chars().count() as u64;
            self.postings.add_occurrence(&term, doc_id);
        }
        self.docs.push(Document {
            title: format!("Document {doc_id}"),
            url: url.to_owned(),
            external_id: external_id.to_owned(),
        })
    }

    pub fn skip_record(&mut self) { self.stats.skipped_records += 1; }

    pub fn documents(&self) -> &DocumentTable { &self.docs }

    pub fn postings(&self) -> &PostingStore { &self.postings }

    pub fn stats(&self) -> BuildStats {
        BuildStats {
            documents: self.docs.len() as u64,
            unique_terms: self.postings.len() as u64,
            ..self.stats.clone()
        }
    }

    /// Write `forward.idx`, `inverted.idx` and `meta.json` under `paths`.
    pub fn save(&self, paths: &IndexPaths, created_at: String, elapsed_secs: f64) -> Result<IndexMeta> {
        save_forward(paths, &self.docs)?;
        save_inverted(paths, &self.postings)?;
        let meta = IndexMeta {
            version: FORMAT_VERSION,
            created_at,
            num_docs: self.docs.universe(),
            num_terms: self.postings.len() as u64,
            analyzer: self.analyzer.config().clone(),
            stats: Some(BuildStats { elapsed_secs, ..self.stats() }),
        };
        save_meta(paths, &meta)?;
        tracing::info!(root = %paths.root.display(), num_docs = meta.num_docs, num_terms = meta.num_terms, "index written");
        Ok(meta)
    }

    pub fn into_parts(self) -> (DocumentTable, PostingStore, Analyzer) {
        (self.docs, self.postings, self.analyzer)
    }
}

impl Default for IndexBuilder {
    fn default() -> Self { Self::new(AnalyzerConfig::default()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_counts_every_occurrence() {
        let mut b = IndexBuilder::default();
        b.add_document("кот кот кот", "u0", "a");
        b.add_document("кот", "u1", "b");

        let entry = b.postings().get("кот").unwrap();
        assert_eq!(entry.frequency, 4);
        assert_eq!(entry.doc_ids().collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn stats_track_tokens_and_titles() {
        let mut b = IndexBuilder::default();
        let id = b.add_document("<p>один два</p>", "u", "x");
        b.skip_record();
        assert_eq!(id, 0);
        assert_eq!(b.documents().get(0).unwrap().title, "Document 0");

        let stats = b.stats();
        assert_eq!(stats.documents, 1);
        assert_eq!(stats.unique_terms, 2);
        assert_eq!(stats.total_tokens, 2);
        assert_eq!(stats.total_token_chars, 7);
        assert_eq!(stats.skipped_records, 1);
    }
}
