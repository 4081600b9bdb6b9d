use boolsearch_core::persist::{load_forward, load_inverted, IndexPaths};
use boolsearch_core::{IndexBuilder, IndexError, SearchIndex};
use std::fs;
use tempfile::tempdir;

fn build(dir: &std::path::Path) -> IndexBuilder {
    let mut b = IndexBuilder::default();
    b.add_document("матч футбол матч", "https://a.example/1", "oid-1");
    b.add_document("хоккей матч", "https://a.example/2", "oid-2");
    b.add_document("теннис <i>футбол</i>", "https://a.example/3", "");
    b.save(&IndexPaths::new(dir), "2024-01-01T00:00:00Z".into(), 0.5).unwrap();
    b
}

#[test]
fn decode_preserves_documents_and_postings() {
    let dir = tempdir().unwrap();
    let built = build(dir.path());
    let paths = IndexPaths::new(dir.path());

    let docs = load_forward(&paths).unwrap();
    assert_eq!(&docs, built.documents());
    assert_eq!(docs.get(0).unwrap().external_id, "oid-1");
    assert_eq!(docs.get(2).unwrap().title, "Document 2");

    let store = load_inverted(&paths).unwrap();
    assert_eq!(store.len(), built.postings().len());
    for (term, entry) in built.postings().iter() {
        let loaded = store.get(term).unwrap();
        assert_eq!(loaded.frequency, entry.frequency, "{term}");
        assert_eq!(loaded.document_count(), entry.document_count(), "{term}");
        assert_eq!(loaded.doc_ids().collect::<Vec<_>>(), entry.doc_ids().collect::<Vec<_>>(), "{term}");
    }

    let match_entry = store.get("матч").unwrap();
    assert_eq!(match_entry.frequency, 3);
    assert_eq!(match_entry.doc_ids().collect::<Vec<_>>(), vec![1, 0]);
}

#[test]
fn identical_input_gives_identical_files() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    build(a.path());
    build(b.path());
    for name in ["forward.idx", "inverted.idx"] {
        assert_eq!(fs::read(a.path().join(name)).unwrap(), fs::read(b.path().join(name)).unwrap());
    }
}

#[test]
fn open_reads_analyzer_from_metadata() {
    let dir = tempdir().unwrap();
    build(dir.path());
    let index = SearchIndex::open(&IndexPaths::new(dir.path())).unwrap();
    assert_eq!(index.documents().len(), 3);
    let meta = index.meta().unwrap();
    assert_eq!(meta.num_docs, 3);
    assert_eq!(meta.stats.as_ref().unwrap().total_tokens, 7);
}

#[test]
fn missing_files_are_reported_not_fatal() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path());
    assert!(matches!(SearchIndex::open(&paths), Err(IndexError::Io(_))));

    let (index, errors) = SearchIndex::open_lenient(&paths);
    assert_eq!(errors.len(), 2);
    assert!(index.documents().is_empty());
    assert!(index.postings().is_empty());
}

#[test]
fn corrupt_inverted_file_still_loads_documents() {
    let dir = tempdir().unwrap();
    build(dir.path());
    let paths = IndexPaths::new(dir.path());
    let bytes = fs::read(paths.inverted()).unwrap();
    fs::write(paths.inverted(), &bytes[..bytes.len() / 2]).unwrap();

    let (index, errors) = SearchIndex::open_lenient(&paths);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], IndexError::UnexpectedEof { .. }));
    assert_eq!(index.documents().len(), 3);
}
