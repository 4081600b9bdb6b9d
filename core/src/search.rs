use crate::error::{IndexError, QueryError, Result};
use crate::index::{DocId, DocumentTable, PostingEntry, PostingStore};
use crate::meta::IndexMeta;
use crate::persist::{load_forward, load_inverted, load_meta, IndexPaths};
use crate::query::{self, PostingSource};
use crate::tokenizer::Analyzer;
use serde::Serialize;

/// A loaded, read-only index. Safe to share between concurrent readers.
#[derive(Debug, Default)]
pub struct SearchIndex {
    docs: DocumentTable,
    postings: PostingStore,
    analyzer: Analyzer,
    meta: Option<IndexMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermHit {
    pub term: String,
    pub frequency: u64,
    pub document_count: usize,
    /// Posting order: most recently indexed document first.
    pub doc_ids: Vec<DocId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanHit {
    /// Ascending.
    pub doc_ids: Vec<DocId>,
    pub errors: Vec<QueryError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Term(TermHit),
    TermNotFound { term: String },
    Boolean(BooleanHit),
}

impl SearchIndex {
    pub fn new(docs: DocumentTable, postings: PostingStore, analyzer: Analyzer) -> Self {
        Self { docs, postings, analyzer, meta: None }
    }

    /// Load both index files, failing on the first error.
    pub fn open(paths: &IndexPaths) -> Result<Self> {
        let docs = load_forward(paths)?;
        let postings = load_inverted(paths)?;
        Ok(Self::assemble(paths, docs, postings))
    }

    /// Load whatever can be loaded. A file that fails to open or decode is
    /// replaced by an empty table or store and its error is returned.
    pub fn open_lenient(paths: &IndexPaths) -> (Self, Vec<IndexError>) {
        let mut errors = Vec::new();
        let docs = load_forward(paths).unwrap_or_else(|e| {
            tracing::error!(path = %paths.forward().display(), error = %e, "cannot load forward index");
            errors.push(e);
            DocumentTable::new()
        });
        let postings = load_inverted(paths).unwrap_or_else(|e| {
            tracing::error!(path = %paths.inverted().display(), error = %e, "cannot load inverted index");
            errors.push(e);
            PostingStore::new()
        });
        (Self::assemble(paths, docs, postings), errors)
    }

    fn assemble(paths: &IndexPaths, docs: DocumentTable, postings: PostingStore) -> Self {
        let meta = match load_meta(paths) {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::warn!(error = %e, "no usable index metadata, using default analyzer");
                None
            }
        };
        let analyzer = meta.as_ref().map(|m| Analyzer::new(m.analyzer.clone())).unwrap_or_default();
        tracing::info!(num_docs = docs.len(), num_terms = postings.len(), "index loaded");
        Self { docs, postings, analyzer, meta }
    }

    pub fn documents(&self) -> &DocumentTable { &self.docs }

    pub fn postings(&self) -> &PostingStore { &self.postings }

    pub fn meta(&self) -> Option<&IndexMeta> { self.meta.as_ref() }

    /// Dispatch on the query shape: plain text is a single-term lookup,
    /// anything with operator characters is a boolean query.
    pub fn search(&self, query: &str) -> SearchOutcome {
        if query::is_boolean_query(query) {
            self.boolean(query)
        } else {
            self.lookup_term(query)
        }
    }

    pub fn lookup_term(&self, raw: &str) -> SearchOutcome {
        let term = self.analyzer.normalize_term(raw.trim());
        match self.postings.get(&term) {
            Some(entry) => {
                tracing::debug!(%term, document_count = entry.document_count(), "term lookup");
                SearchOutcome::Term(TermHit {
                    frequency: entry.frequency,
                    document_count: entry.document_count(),
                    doc_ids: entry.doc_ids().collect(),
                    term,
                })
            }
            None => SearchOutcome::TermNotFound { term },
        }
    }

    pub fn boolean(&self, query: &str) -> SearchOutcome {
        let evaluation = query::run(query, self);
        let mut doc_ids: Vec<DocId> = evaluation.docs.into_iter().collect();
        doc_ids.sort_unstable();
        tracing::debug!(query, hits = doc_ids.len(), errors = evaluation.errors.len(), "boolean query");
        SearchOutcome::Boolean(BooleanHit { doc_ids, errors: evaluation.errors })
    }
}

impl PostingSource for SearchIndex {
    fn lookup(&self, term: &str) -> Option<&PostingEntry> {
        self.postings.get(&self.analyzer.normalize_term(term))
    }

    fn universe(&self) -> DocId { self.docs.universe() }
}
