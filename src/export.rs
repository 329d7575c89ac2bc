//! Reading and writing KEEN tables and summaries.
//!
//! Tables are tab-separated, headerless, three columns in
//! (subject, predicate, object) order. Summaries are pretty-printed JSON.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::summary::KeenSummary;
use crate::table::KeenTable;
use crate::triple::Triple;

/// Result type for export operations.
pub type ExportResult<T> = std::result::Result<T, ExportError>;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Write `table` to `path` as TSV.
///
/// Returns `Ok(false)` without touching `path` when the table is empty.
pub fn write_table(table: &KeenTable, path: &Path) -> ExportResult<bool> {
    if table.is_empty() {
        return Ok(false);
    }
    replace_file(path, |out| write_rows(table, out))?;
    Ok(true)
}

/// Suffix of the sibling file a table is written to before it replaces the
/// real one.
pub const STAGING_SUFFIX: &str = ".tmp";

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}

/// Write a new `path` through a staging file, so a failed write never
/// leaves a truncated file in place of the old one.
fn replace_file<F>(path: &Path, write: F) -> ExportResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let staging = staging_path(path);
    let result = File::create(&staging).and_then(|file| {
        let mut out = BufWriter::new(file);
        write(&mut out)?;
        out.flush()?;
        out.get_ref().sync_all()
    });
    if let Err(source) = result {
        let _ = std::fs::remove_file(&staging);
        return Err(io_error(&staging)(source));
    }
    std::fs::rename(&staging, path).map_err(io_error(path))
}

/// Write TSV rows to any writer.
pub fn write_rows<W: Write>(table: &KeenTable, out: &mut W) -> std::io::Result<()> {
    for t in table {
        writeln!(out, "{}\t{}\t{}", t.subject, t.predicate, t.object)?;
    }
    Ok(())
}

/// Write `summary` to `path` as JSON.
pub fn write_summary(summary: &KeenSummary, path: &Path) -> ExportResult<()> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, summary).map_err(|e| ExportError::Serialization {
        message: e.to_string(),
    })?;
    out.write_all(b"\n").map_err(io_error(path))?;
    out.flush().map_err(io_error(path))
}

/// Read a KEEN TSV file back into raw rows, in file order.
///
/// Blank lines are skipped.
pub fn read_triples(path: &Path) -> ExportResult<Vec<Triple>> {
    let file = File::open(path).map_err(io_error(path))?;
    let mut rows = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(io_error(path))?;
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let [subject, predicate, object] = fields.as_slice() else {
            return Err(ExportError::MalformedRow {
                path: path.display().to_string(),
                line: i + 1,
                found: fields.len(),
            });
        };
        rows.push(Triple::new(*subject, *predicate, *object));
    }
    Ok(rows)
}

/// Read a KEEN TSV file as a table.
pub fn read_table(path: &Path) -> ExportResult<KeenTable> {
    read_triples(path).map(KeenTable::from_triples)
}
