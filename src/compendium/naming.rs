//! Information content and preferred-name selection

use crate::biolink::BiolinkType;
use crate::error::CompendiumResult;
use crate::node::AssembledNode;
use crate::store::AnnotationStore;
use std::collections::{HashMap, HashSet};

/// Labels longer than this are passed over when a shorter one exists
pub const DEFAULT_DEMOTE_LABELS_LONGER_THAN: usize = 15;

/// Settings for preferred-name selection
#[derive(Debug, Clone)]
pub struct NamingConfig {
    /// Per-type prefix order consulted before the clique's own order
    pub boost_prefixes: HashMap<BiolinkType, Vec<String>>,
    pub demote_labels_longer_than: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            boost_prefixes: HashMap::new(),
            demote_labels_longer_than: DEFAULT_DEMOTE_LABELS_LONGER_THAN,
        }
    }
}

impl NamingConfig {
    pub fn with_boost(mut self, biolink_type: impl Into<BiolinkType>, prefixes: &[&str]) -> Self {
        self.boost_prefixes.insert(
            biolink_type.into(),
            prefixes.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    pub fn with_demote_length(mut self, max: usize) -> Self {
        self.demote_labels_longer_than = max;
        self
    }

    /// Boost order for the node's type or its nearest ancestor that has one
    fn boost_for(&self, node: &AssembledNode) -> Option<&[String]> {
        node.ancestors
            .iter()
            .chain(std::iter::once(&node.biolink_type))
            .find_map(|t| self.boost_prefixes.get(t))
            .map(|v| v.as_slice())
    }
}

/// Lowest IC among the node's identifiers
pub fn information_content(
    node: &AssembledNode,
    store: &dyn AnnotationStore,
) -> CompendiumResult<Option<f64>> {
    let mut lowest: Option<f64> = None;
    for n in &node.identifiers {
        if let Some(ic) = store.information_content(&n.identifier)? {
            lowest = Some(lowest.map_or(ic, |l| l.min(ic)));
        }
    }
    Ok(lowest)
}

/// Pick the node's preferred name.
///
/// Labels are ranked by the boost order for the node's type (if any), then
/// in the node's own identifier order.
pub fn preferred_name(node: &AssembledNode, config: &NamingConfig) -> Option<String> {
    let mut ranked: Vec<&str> = Vec::with_capacity(node.identifiers.len());
    let mut used: HashSet<usize> = HashSet::new();

    if let Some(boost) = config.boost_for(node) {
        for prefix in boost {
            for (i, n) in node.identifiers.iter().enumerate() {
                if n.identifier.has_prefix(prefix) && used.insert(i) {
                    ranked.push(n.label.as_deref().unwrap_or(""));
                }
            }
        }
    }
    for (i, n) in node.identifiers.iter().enumerate() {
        if !used.contains(&i) {
            ranked.push(n.label.as_deref().unwrap_or(""));
        }
    }

    select_label(ranked, config.demote_labels_longer_than)
}

/// First non-blank label, skipping labels over `max_len` characters when
/// any label within the limit exists.
pub fn select_label<'a, I>(labels: I, max_len: usize) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let candidates: Vec<&str> = labels
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .collect();

    let has_short = candidates.iter().any(|l| l.chars().count() <= max_len);
    candidates
        .into_iter()
        .find(|l| !has_short || l.chars().count() <= max_len)
        .map(|l| l.to_string())
}
