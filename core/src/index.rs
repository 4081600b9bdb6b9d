use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

pub type DocId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub url: String,
    pub external_id: String,
}

/// Append-only document table. A document's id is its position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentTable {
    docs: Vec<Document>,
}

impl DocumentTable {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, doc: Document) -> DocId {
        let id = self.docs.len() as DocId;
        self.docs.push(doc);
        id
    }

    pub fn get(&self, id: DocId) -> Option<&Document> { self.docs.get(id as usize) }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    /// Size of the id universe `[0, len)` used for complements.
    pub fn universe(&self) -> DocId { self.docs.len() as DocId }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Document> { self.docs.iter() }
}

impl FromIterator<Document> for DocumentTable {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self { docs: iter.into_iter().collect() }
    }
}

/// Posting data for one term.
///
/// `frequency` counts every occurrence across the collection, while the
/// document list holds each document at most once. The list is kept
/// most-recently-added first, which is also the order written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingEntry {
    pub frequency: u64,
    doc_ids: VecDeque<DocId>,
    newest: Option<DocId>,
}

impl PostingEntry {
    /// Rebuild an entry from persisted parts, keeping the given order as-is.
    pub fn from_parts<I: IntoIterator<Item = DocId>>(frequency: u64, doc_ids: I) -> Self {
        let doc_ids: VecDeque<DocId> = doc_ids.into_iter().collect();
        let newest = doc_ids.iter().copied().max();
        Self { frequency, doc_ids, newest }
    }

    fn record(&mut self, doc_id: DocId) {
        self.frequency += 1;
        let fresh = match self.newest {
            None => true,
            Some(newest) if doc_id > newest => true,
            // documents are normally indexed in id order, so a repeat hits the head
            _ => self.doc_ids.front() != Some(&doc_id) && !self.doc_ids.contains(&doc_id),
        };
        if fresh {
            self.doc_ids.push_front(doc_id);
            self.newest = Some(self.newest.map_or(doc_id, |n| n.max(doc_id)));
        }
    }

    pub fn doc_ids(&self) -> impl ExactSizeIterator<Item = DocId> + '_ { self.doc_ids.iter().copied() }

    pub fn document_count(&self) -> usize { self.doc_ids.len() }
}

/// Term -> posting entry map that owns all posting memory during a build.
#[derive(Debug, Default, Clone)]
pub struct PostingStore {
    entries: HashMap<String, PostingEntry>,
}

impl PostingStore {
    pub fn new() -> Self { Self::default() }

    /// Count one occurrence of `term` in `doc_id`.
    pub fn add_occurrence(&mut self, term: &str, doc_id: DocId) {
        match self.entries.get_mut(term) {
            Some(entry) => entry.record(doc_id),
            None => {
                let mut entry = PostingEntry::default();
                entry.record(doc_id);
                self.entries.insert(term.to_owned(), entry);
            }
        }
    }

    /// Insert a fully formed entry. A later insert of the same term replaces the earlier one.
    pub fn insert(&mut self, term: String, entry: PostingEntry) {
        self.entries.insert(term, entry);
    }

    pub fn get(&self, term: &str) -> Option<&PostingEntry> { self.entries.get(term) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingEntry)> {
        self.entries.iter().map(|(t, e)| (t.as_str(), e))
    }

    /// Entries ordered by term bytes, the order used when persisting.
    pub fn sorted(&self) -> Vec<(&str, &PostingEntry)> {
        let mut out: Vec<_> = self.iter().collect();
        out.sort_unstable_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Terms by descending total frequency, ties broken by term.
    pub fn frequency_ranking(&self) -> Vec<(&str, u64)> {
        let mut out: Vec<_> = self.iter().map(|(t, e)| (t, e.frequency)).collect();
        out.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        out
    }
}
