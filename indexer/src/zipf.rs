use boolsearch_core::PostingStore;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `rank,term,frequency` rows, most frequent term first.
pub fn write_zipf_csv<W: Write>(w: &mut W, store: &PostingStore) -> std::io::Result<()> {
    writeln!(w, "rank,term,frequency")?;
    for (rank, (term, frequency)) in store.frequency_ranking().into_iter().enumerate() {
        writeln!(w, "{},{},{}", rank + 1, term, frequency)?;
    }
    Ok(())
}

pub fn save_zipf_csv(path: &Path, store: &PostingStore) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_zipf_csv(&mut w, store)?;
    w.flush()
}
