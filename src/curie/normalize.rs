//! Prefix normalization applied before identifiers reach the merge engine

use super::Identifier;
use std::collections::HashMap;

/// Rewrites near-synonym and mis-cased prefixes to their canonical spelling.
///
/// Lookups are case-insensitive: registering `MESH` as canonical also fixes
/// `mesh` and `Mesh`, and a synonym `MSH → MESH` fixes `msh`.
#[derive(Debug, Clone, Default)]
pub struct PrefixNormalizer {
    /// Uppercased raw prefix → canonical prefix
    canonical: HashMap<String, String>,
}

impl PrefixNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canonical prefix spelling
    pub fn with_canonical(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.canonical.insert(prefix.to_uppercase(), prefix);
        self
    }

    /// Register a synonym that rewrites to `canonical`
    pub fn with_synonym(mut self, synonym: &str, canonical: impl Into<String>) -> Self {
        self.canonical.insert(synonym.to_uppercase(), canonical.into());
        self
    }

    /// Register every prefix in `prefixes` as canonical
    pub fn with_canonicals<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for p in prefixes {
            self = self.with_canonical(p);
        }
        self
    }

    /// Normalize the prefix of a raw CURIE string
    pub fn normalize(&self, raw: &str) -> Identifier {
        let raw = raw.trim();
        let id = Identifier::new(raw);
        if !raw.contains(':') {
            return id;
        }
        match self.canonical.get(&id.prefix().to_uppercase()) {
            Some(canonical) if canonical != id.prefix() => id.with_prefix(canonical),
            _ => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonym_prefix_rewritten() {
        let n = PrefixNormalizer::new().with_synonym("MSH", "MESH");
        assert_eq!(n.normalize("MSH:D012034").as_str(), "MESH:D012034");
        assert_eq!(n.normalize("msh:D012034").as_str(), "MESH:D012034");
    }

    #[test]
    fn case_fixed_for_registered_canonical() {
        let n = PrefixNormalizer::new().with_canonicals(["ENSEMBL", "NCBIGene"]);
        assert_eq!(n.normalize("ensembl:ENSG0001").as_str(), "ENSEMBL:ENSG0001");
        assert_eq!(n.normalize("NCBIGENE:7157").as_str(), "NCBIGene:7157");
    }

    #[test]
    fn unknown_prefix_untouched() {
        let n = PrefixNormalizer::new().with_canonical("MESH");
        assert_eq!(n.normalize(" FOO:1 ").as_str(), "FOO:1");
        assert_eq!(n.normalize("nocolon").as_str(), "nocolon");
    }
}
