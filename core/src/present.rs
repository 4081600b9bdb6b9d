use crate::index::{DocId, Document, DocumentTable};
use crate::search::SearchOutcome;
use std::fmt;

/// Most documents listed for a single query.
pub const DISPLAY_LIMIT: usize = 50;

/// The displayed slice of a result plus how many were left out.
#[derive(Debug)]
pub struct Page<'a> {
    pub entries: Vec<(DocId, &'a Document)>,
    pub total: usize,
    pub remaining: usize,
}

impl<'a> Page<'a> {
    /// Ids outside the document table are skipped without counting
    /// against the limit.
    pub fn new<I>(ids: I, total: usize, docs: &'a DocumentTable, limit: usize) -> Self
    where
        I: IntoIterator<Item = DocId>,
    {
        let entries = ids
            .into_iter()
            .filter_map(|id| docs.get(id).map(|doc| (id, doc)))
            .take(limit)
            .collect();
        Self { entries, total, remaining: total.saturating_sub(limit) }
    }

    /// Page for a search outcome; `None` when the term was not found.
    pub fn for_outcome(outcome: &SearchOutcome, docs: &'a DocumentTable, limit: usize) -> Option<Self> {
        match outcome {
            SearchOutcome::Term(hit) => Some(Self::new(hit.doc_ids.iter().copied(), hit.document_count, docs, limit)),
            SearchOutcome::Boolean(hit) => Some(Self::new(hit.doc_ids.iter().copied(), hit.doc_ids.len(), docs, limit)),
            SearchOutcome::TermNotFound { .. } => None,
        }
    }
}

/// Plain-text rendering of an outcome, one URL per line.
pub struct Report<'a> {
    outcome: &'a SearchOutcome,
    page: Option<Page<'a>>,
}

impl<'a> Report<'a> {
    pub fn new(outcome: &'a SearchOutcome, docs: &'a DocumentTable) -> Self {
        Self { outcome, page: Page::for_outcome(outcome, docs, DISPLAY_LIMIT) }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            SearchOutcome::TermNotFound { .. } => return writeln!(f, "Term not found"),
            SearchOutcome::Term(hit) => {
                writeln!(f, "Term: {}, freq={}, doc_count={}", hit.term, hit.frequency, hit.document_count)?;
                writeln!(f, "Documents:")?;
            }
            SearchOutcome::Boolean(hit) => writeln!(f, "Found {} documents:", hit.doc_ids.len())?,
        }
        if let Some(page) = &self.page {
            for (_, doc) in &page.entries {
                writeln!(f, "- {}", doc.url)?;
            }
            if page.remaining > 0 {
                writeln!(f, "... and {} more documents", page.remaining)?;
            }
        }
        Ok(())
    }
}

pub fn render(outcome: &SearchOutcome, docs: &DocumentTable) -> String {
    Report::new(outcome, docs).to_string()
}
