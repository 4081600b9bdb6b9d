//! Binary layout of `forward.idx` and `inverted.idx`, plus `meta.json`.
//!
//! All integers are little-endian. Strings are an `i32` byte length followed
//! by UTF-8 bytes.
//!
//! ```text
//! forward.idx:  i32 doc_count, then per doc: title, url, external id
//! inverted.idx: i64 term_count, then per term:
//!               i64 frequency, term, i32 doc_count, doc_count x i32 doc id
//! ```

use crate::error::{IndexError, Result};
use crate::index::{DocId, Document, DocumentTable, PostingEntry, PostingStore};
use crate::meta::IndexMeta;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub const FORWARD_FILE: &str = "forward.idx";
pub const INVERTED_FILE: &str = "inverted.idx";
pub const META_FILE: &str = "meta.json";

// Upper bound on speculative allocation driven by an untrusted count.
const PREALLOC_LIMIT: usize = 1 << 16;

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn forward(&self) -> PathBuf { self.root.join(FORWARD_FILE) }
    pub fn inverted(&self) -> PathBuf { self.root.join(INVERTED_FILE) }
    pub fn meta(&self) -> PathBuf { self.root.join(META_FILE) }
}

fn write_len<W: Write>(w: &mut W, len: usize, what: &'static str) -> Result<()> {
    let len = i32::try_from(len).map_err(|_| IndexError::TooLarge { what, len: len as u64 })?;
    w.write_i32::<LittleEndian>(len)?;
    Ok(())
}

fn write_str<W: Write>(w: &mut W, s: &str, what: &'static str) -> Result<()> {
    write_len(w, s.len(), what)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn read_len<R: Read>(r: &mut R, what: &'static str) -> Result<usize> {
    let len = r.read_i32::<LittleEndian>().map_err(|e| IndexError::reading(e, what))?;
    usize::try_from(len).map_err(|_| IndexError::NegativeLength { what, len: len.into() })
}

fn read_str<R: Read>(r: &mut R, what: &'static str) -> Result<String> {
    let len = read_len(r, what)?;
    let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
    r.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() < len {
        return Err(IndexError::UnexpectedEof { what });
    }
    String::from_utf8(buf).map_err(|_| IndexError::InvalidUtf8 { what })
}

pub fn write_forward<W: Write>(w: &mut W, docs: &DocumentTable) -> Result<()> {
    write_len(w, docs.len(), "document count")?;
    for doc in docs.iter() {
        write_str(w, &doc.title, "title")?;
        write_str(w, &doc.url, "url")?;
        write_str(w, &doc.external_id, "external id")?;
    }
    Ok(())
}

pub fn read_forward<R: Read>(r: &mut R) -> Result<DocumentTable> {
    let count = read_len(r, "document count")?;
    let mut docs = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        let title = read_str(r, "title")?;
        let url = read_str(r, "url")?;
        let external_id = read_str(r, "external id")?;
        docs.push(Document { title, url, external_id });
    }
    Ok(docs.into_iter().collect())
}

pub fn write_inverted<W: Write>(w: &mut W, store: &PostingStore) -> Result<()> {
    w.write_i64::<LittleEndian>(store.len() as i64)?;
    for (term, entry) in store.sorted() {
        let frequency = i64::try_from(entry.frequency)
            .map_err(|_| IndexError::TooLarge { what: "term frequency", len: entry.frequency })?;
        w.write_i64::<LittleEndian>(frequency)?;
        write_str(w, term, "term")?;
        write_len(w, entry.document_count(), "posting count")?;
        for doc_id in entry.doc_ids() {
            // stored as a signed 32-bit id; ids come from the document table so fit
            w.write_i32::<LittleEndian>(doc_id as i32)?;
        }
    }
    Ok(())
}

pub fn read_inverted<R: Read>(r: &mut R) -> Result<PostingStore> {
    let term_count = r.read_i64::<LittleEndian>().map_err(|e| IndexError::reading(e, "term count"))?;
    if term_count < 0 {
        return Err(IndexError::NegativeLength { what: "term count", len: term_count });
    }
    let mut store = PostingStore::new();
    for _ in 0..term_count {
        let frequency = r.read_i64::<LittleEndian>().map_err(|e| IndexError::reading(e, "term frequency"))?;
        let frequency = u64::try_from(frequency)
            .map_err(|_| IndexError::NegativeLength { what: "term frequency", len: frequency })?;
        let term = read_str(r, "term")?;
        let count = read_len(r, "posting count")?;
        let mut doc_ids: Vec<DocId> = Vec::with_capacity(count.min(PREALLOC_LIMIT));
        for _ in 0..count {
            let id = r.read_i32::<LittleEndian>().map_err(|e| IndexError::reading(e, "document id"))?;
            doc_ids.push(id as DocId);
        }
        store.insert(term, PostingEntry::from_parts(frequency, doc_ids));
    }
    Ok(store)
}

pub fn save_forward(paths: &IndexPaths, docs: &DocumentTable) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut w = BufWriter::new(File::create(paths.forward())?);
    write_forward(&mut w, docs)?;
    w.flush()?;
    Ok(())
}

pub fn load_forward(paths: &IndexPaths) -> Result<DocumentTable> {
    let mut r = BufReader::new(File::open(paths.forward())?);
    read_forward(&mut r)
}

pub fn save_inverted(paths: &IndexPaths, store: &PostingStore) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut w = BufWriter::new(File::create(paths.inverted())?);
    write_inverted(&mut w, store)?;
    w.flush()?;
    Ok(())
}

pub fn load_inverted(paths: &IndexPaths) -> Result<PostingStore> {
    let mut r = BufReader::new(File::open(paths.inverted())?);
    read_inverted(&mut r)
}

pub fn save_meta(paths: &IndexPaths, meta: &IndexMeta) -> Result<()> {
    create_dir_all(&paths.root)?;
    let json = serde_json::to_string_pretty(meta)?;
    std::fs::write(paths.meta(), json)?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<IndexMeta> {
    let f = File::open(paths.meta())?;
    Ok(serde_json::from_reader(BufReader::new(f))?)
}
