//! In-memory annotation store

use super::traits::AnnotationStore;
use crate::curie::Identifier;
use crate::error::CompendiumResult;
use std::collections::HashMap;

/// Annotations held in plain maps, filled through builder methods.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnnotations {
    labels: HashMap<Identifier, String>,
    synonyms: HashMap<Identifier, Vec<String>>,
    descriptions: HashMap<Identifier, Vec<String>>,
    taxa: HashMap<Identifier, Vec<String>>,
    information_content: HashMap<Identifier, f64>,
    properties: HashMap<(Identifier, String), Vec<String>>,
}

impl InMemoryAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a label; the first label set for an identifier is kept
    pub fn with_label(mut self, id: &str, label: &str) -> Self {
        self.labels
            .entry(Identifier::new(id))
            .or_insert_with(|| label.to_string());
        self
    }

    pub fn with_synonym(mut self, id: &str, synonym: &str) -> Self {
        self.synonyms
            .entry(Identifier::new(id))
            .or_default()
            .push(synonym.to_string());
        self
    }

    pub fn with_description(mut self, id: &str, description: &str) -> Self {
        self.descriptions
            .entry(Identifier::new(id))
            .or_default()
            .push(description.to_string());
        self
    }

    pub fn with_taxon(mut self, id: &str, taxon: &str) -> Self {
        self.taxa
            .entry(Identifier::new(id))
            .or_default()
            .push(taxon.to_string());
        self
    }

    pub fn with_information_content(mut self, id: &str, ic: f64) -> Self {
        self.information_content.insert(Identifier::new(id), ic);
        self
    }

    pub fn with_property(mut self, id: &str, predicate: &str, value: &str) -> Self {
        self.properties
            .entry((Identifier::new(id), predicate.to_string()))
            .or_default()
            .push(value.to_string());
        self
    }
}

impl AnnotationStore for InMemoryAnnotations {
    fn label(&self, id: &Identifier) -> CompendiumResult<Option<String>> {
        Ok(self.labels.get(id).cloned())
    }

    fn synonyms(&self, id: &Identifier) -> CompendiumResult<Vec<String>> {
        Ok(self.synonyms.get(id).cloned().unwrap_or_default())
    }

    fn descriptions(&self, id: &Identifier) -> CompendiumResult<Vec<String>> {
        Ok(self.descriptions.get(id).cloned().unwrap_or_default())
    }

    fn taxa(&self, id: &Identifier) -> CompendiumResult<Vec<String>> {
        Ok(self.taxa.get(id).cloned().unwrap_or_default())
    }

    fn information_content(&self, id: &Identifier) -> CompendiumResult<Option<f64>> {
        Ok(self.information_content.get(id).copied())
    }

    fn properties(&self, id: &Identifier, predicate: &str) -> CompendiumResult<Vec<String>> {
        Ok(self
            .properties
            .get(&(id.clone(), predicate.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
