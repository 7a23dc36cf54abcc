//! Tab-separated input files

use crate::error::{CompendiumError, CompendiumResult};
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;

/// Call `row` for every non-blank, non-comment line of a TSV file.
///
/// Fields are trimmed and never unquoted, so values such as
/// `"12.5"^^<xsd:float>` arrive as written. Lines with fewer than
/// `min_columns` fields are a `Parse` error. Line numbers passed to `row`
/// start at 1.
pub fn for_each_row<F>(path: &Path, min_columns: usize, mut row: F) -> CompendiumResult<usize>
where
    F: FnMut(usize, &[&str]) -> CompendiumResult<()>,
{
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .quoting(false)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut record = StringRecord::new();
    let mut rows = 0;

    while reader
        .read_record(&mut record)
        .map_err(|e| csv_error(path, e))?
    {
        let line = record.position().map_or(0, |p| p.line() as usize);
        let fields: Vec<&str> = record.iter().map(str::trim).collect();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        if fields.len() < min_columns {
            return Err(parse_error(
                path,
                line,
                format!("expected at least {} columns, found {}", min_columns, fields.len()),
            ));
        }
        row(line, &fields)?;
        rows += 1;
    }

    Ok(rows)
}

pub fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> CompendiumError {
    CompendiumError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

fn csv_error(path: &Path, err: csv::Error) -> CompendiumError {
    let line = err.position().map_or(0, |p| p.line() as usize);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => CompendiumError::Io(e),
        _ => parse_error(path, line, message),
    }
}
