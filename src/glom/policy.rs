//! Per-invocation merge constraints

use crate::curie::Identifier;
use std::collections::{HashMap, HashSet};

/// Identifiers that are only closely (not exactly) related, keyed by prefix.
///
/// A merge that would place two close-matched identifiers in one set is
/// rejected. Pairs are stored in both directions.
#[derive(Debug, Clone, Default)]
pub struct CloseMatchTable {
    by_prefix: HashMap<String, HashMap<Identifier, HashSet<Identifier>>>,
}

impl CloseMatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `a` and `b` are close matches
    pub fn add(&mut self, a: Identifier, b: Identifier) {
        if a == b {
            return;
        }
        self.by_prefix
            .entry(a.prefix().to_string())
            .or_default()
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        self.by_prefix
            .entry(b.prefix().to_string())
            .or_default()
            .entry(b)
            .or_default()
            .insert(a);
    }

    /// Prefixes that have at least one close-match entry
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.by_prefix.keys().map(|p| p.as_str())
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.by_prefix.contains_key(prefix)
    }

    /// Close matches recorded for `id`
    pub fn get(&self, id: &Identifier) -> Option<&HashSet<Identifier>> {
        self.by_prefix.get(id.prefix()).and_then(|m| m.get(id))
    }

    pub fn is_empty(&self) -> bool {
        self.by_prefix.is_empty()
    }

    /// Number of identifiers with at least one close match
    pub fn len(&self) -> usize {
        self.by_prefix.values().map(|m| m.len()).sum()
    }
}

/// Constraints applied to every group of one `merge` call.
#[derive(Debug, Clone)]
pub struct GlomPolicy {
    /// A merged set may hold at most one identifier with each of these prefixes
    pub unique_prefixes: Vec<String>,
    /// Prefix whose member represents a set in diagnostics
    pub preferred_prefix: Option<String>,
    /// Close matches that must never end up in the same set
    pub close_matches: CloseMatchTable,
    /// Reject groups of more than two identifiers as malformed
    pub strict_pairs: bool,
}

impl Default for GlomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl GlomPolicy {
    pub fn new() -> Self {
        Self {
            unique_prefixes: Vec::new(),
            preferred_prefix: None,
            close_matches: CloseMatchTable::new(),
            strict_pairs: true,
        }
    }

    pub fn with_unique_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_preferred_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.preferred_prefix = Some(prefix.into());
        self
    }

    pub fn with_close_matches(mut self, table: CloseMatchTable) -> Self {
        self.close_matches = table;
        self
    }

    /// Allow groups larger than a pair (e.g. whole identifier groups asserted at once)
    pub fn allow_large_groups(mut self) -> Self {
        self.strict_pairs = false;
        self
    }
}
