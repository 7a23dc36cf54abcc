//! Annotation lookup interface

use crate::curie::Identifier;
use crate::error::CompendiumResult;

/// Property predicate naming an identifier's alternative ids
pub const HAS_ALTERNATIVE_ID: &str = "HAS_ALTERNATIVE_ID";

/// Per-identifier annotations supplied by upstream extraction.
///
/// Methods return `Result` so that backends loading tables on first use can
/// surface IO and parse failures.
pub trait AnnotationStore {
    // === Text ===

    /// Preferred label for `id`
    fn label(&self, id: &Identifier) -> CompendiumResult<Option<String>>;

    /// Synonyms for `id`, in source order
    fn synonyms(&self, id: &Identifier) -> CompendiumResult<Vec<String>>;

    /// Descriptions for `id`, in source order
    fn descriptions(&self, id: &Identifier) -> CompendiumResult<Vec<String>>;

    // === Scores and taxa ===

    /// Taxon CURIEs for `id`
    fn taxa(&self, id: &Identifier) -> CompendiumResult<Vec<String>>;

    /// Normalized information content for `id`
    fn information_content(&self, id: &Identifier) -> CompendiumResult<Option<f64>>;

    // === Properties ===

    /// Values of `predicate` for `id`, in source order
    fn properties(&self, id: &Identifier, predicate: &str) -> CompendiumResult<Vec<String>>;
}
