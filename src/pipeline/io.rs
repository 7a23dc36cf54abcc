//! Readers for identifier, concord and close-match files

use crate::biolink::BiolinkType;
use crate::curie::{Identifier, PrefixNormalizer};
use crate::error::CompendiumResult;
use crate::glom::CloseMatchTable;
use crate::tsv::for_each_row;
use crate::typing::KnownTypes;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Read an `identifier[\tBiolinkType]` file.
///
/// Identifiers come back de-duplicated in file order. A type column, when
/// present and non-empty, records the identifier's known type; the first
/// type seen for an identifier wins.
pub fn read_identifier_file(
    path: &Path,
    normalizer: &PrefixNormalizer,
) -> CompendiumResult<(Vec<Identifier>, KnownTypes)> {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    let mut known = KnownTypes::new();

    let rows = for_each_row(path, 1, |_, fields| {
        let id = normalizer.normalize(fields[0]);
        if let Some(t) = fields.get(1).filter(|t| !t.is_empty()) {
            known
                .entry(id.clone())
                .or_insert_with(|| BiolinkType::new(*t));
        }
        if seen.insert(id.clone()) {
            ids.push(id);
        }
        Ok(())
    })?;

    debug!(path = %path.display(), rows, identifiers = ids.len(), "read identifiers");
    Ok((ids, known))
}

/// Read `idA\trelation\tidB` triples as pairs.
///
/// When `relations` is non-empty, rows with any other relation are skipped.
pub fn read_concord_file(
    path: &Path,
    normalizer: &PrefixNormalizer,
    relations: &[String],
) -> CompendiumResult<Vec<[Identifier; 2]>> {
    let mut pairs = Vec::new();
    let mut skipped = 0usize;

    for_each_row(path, 3, |_, fields| {
        if !relations.is_empty() && !relations.iter().any(|r| r == fields[1]) {
            skipped += 1;
            return Ok(());
        }
        pairs.push([normalizer.normalize(fields[0]), normalizer.normalize(fields[2])]);
        Ok(())
    })?;

    debug!(path = %path.display(), pairs = pairs.len(), skipped, "read concord");
    Ok(pairs)
}

/// Build a close-match table from one or more triple files.
///
/// Every row is taken as a close match regardless of its relation column.
pub fn read_close_matches<P: AsRef<Path>>(
    paths: &[P],
    normalizer: &PrefixNormalizer,
) -> CompendiumResult<CloseMatchTable> {
    let mut table = CloseMatchTable::new();
    for path in paths {
        let pairs = read_concord_file(path.as_ref(), normalizer, &[])?;
        for [a, b] in pairs {
            table.add(a, b);
        }
    }
    Ok(table)
}
