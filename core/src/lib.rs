//! Boolean full-text search: index construction, the on-disk index format
//! and the query engine that runs over it.

pub mod builder;
pub mod error;
pub mod index;
pub mod markup;
pub mod meta;
pub mod persist;
pub mod present;
pub mod query;
pub mod search;
pub mod tokenizer;

pub use builder::IndexBuilder;
pub use error::{IndexError, QueryError};
pub use index::{DocId, Document, DocumentTable, PostingEntry, PostingStore};
pub use meta::{BuildStats, IndexMeta};
pub use search::{BooleanHit, SearchIndex, SearchOutcome, TermHit};
