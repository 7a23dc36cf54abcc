//! CURIE identifiers and their optionally labeled input form

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A compact URI such as `MONDO:0005148`.
///
/// Serializes as a plain string. Equality, hashing and ordering are those of
/// the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Create an identifier from a CURIE string
    pub fn new(curie: impl Into<String>) -> Self {
        Self(curie.into())
    }

    /// Get the CURIE string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the first `:`, or the whole string if there is none
    pub fn prefix(&self) -> &str {
        match self.0.split_once(':') {
            Some((prefix, _)) => prefix,
            None => &self.0,
        }
    }

    /// The part after the first `:`, empty if there is none
    pub fn local_id(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, local)) => local,
            None => "",
        }
    }

    /// Same local id under a different prefix spelling
    pub fn with_prefix(&self, prefix: &str) -> Self {
        Self(format!("{}:{}", prefix, self.local_id()))
    }

    /// True if this identifier's prefix is exactly `prefix`
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.prefix() == prefix
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An identifier as it arrives from an upstream source: bare, or carrying
/// the label that source assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputIdentifier {
    Bare(Identifier),
    Labeled { identifier: Identifier, label: String },
}

impl InputIdentifier {
    pub fn bare(curie: impl Into<String>) -> Self {
        Self::Bare(Identifier::new(curie))
    }

    pub fn labeled(curie: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Labeled {
            identifier: Identifier::new(curie),
            label: label.into(),
        }
    }

    pub fn identifier(&self) -> &Identifier {
        match self {
            Self::Bare(id) => id,
            Self::Labeled { identifier, .. } => identifier,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Bare(_) => None,
            Self::Labeled { label, .. } => Some(label.as_str()),
        }
    }
}

impl From<Identifier> for InputIdentifier {
    fn from(id: Identifier) -> Self {
        Self::Bare(id)
    }
}

/// Reduce mixed bare/labeled inputs to unique identifiers plus a label side-table.
///
/// Identifiers keep first-seen order. When an identifier is seen with more
/// than one non-empty label, the first one encountered is kept.
pub fn collapse_labels<'a, I>(inputs: I) -> (Vec<Identifier>, HashMap<Identifier, String>)
where
    I: IntoIterator<Item = &'a InputIdentifier>,
{
    let mut order = Vec::new();
    let mut labels: HashMap<Identifier, String> = HashMap::new();
    let mut seen = std::collections::HashSet::new();

    for input in inputs {
        let id = input.identifier();
        if seen.insert(id.clone()) {
            order.push(id.clone());
        }
        if let Some(label) = input.label() {
            if !label.trim().is_empty() {
                labels.entry(id.clone()).or_insert_with(|| label.to_string());
            }
        }
    }

    (order, labels)
}

/// Ordering for taxon CURIEs: numeric local ids ascending, non-numeric last.
pub fn taxon_order(a: &str, b: &str) -> Ordering {
    fn numeric(curie: &str) -> Option<u64> {
        curie.rsplit_once(':').and_then(|(_, local)| local.parse().ok())
    }
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Ordering for clique members: by prefix, then numeric local id within a
/// prefix, so `MONDO:9` precedes `MONDO:10`.
pub fn member_order(a: &Identifier, b: &Identifier) -> Ordering {
    a.prefix()
        .cmp(b.prefix())
        .then_with(|| taxon_order(a.as_str(), b.as_str()))
}
