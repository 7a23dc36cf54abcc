//! NodeFactory: turns a typed clique into an ordered, labeled node

use super::pubchem::{self, PUBCHEM_COMPOUND};
use crate::biolink::{BiolinkModel, BiolinkType};
use crate::curie::{collapse_labels, Identifier, InputIdentifier};
use crate::error::CompendiumResult;
use crate::store::AnnotationStore;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// One member of an assembled node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeIdentifier {
    pub identifier: Identifier,
    pub label: Option<String>,
}

/// A typed clique with its identifiers in canonical order.
///
/// `identifiers` is never empty; its first entry is the canonical id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledNode {
    pub identifiers: Vec<NodeIdentifier>,
    /// First non-empty label in identifier order
    pub label: Option<String>,
    pub biolink_type: BiolinkType,
    /// The type itself first, then its ancestors
    pub ancestors: Vec<BiolinkType>,
}

impl AssembledNode {
    pub fn canonical(&self) -> &Identifier {
        &self.identifiers[0].identifier
    }
}

/// Builds nodes for cliques of any type known to the Biolink model.
///
/// Remembers which (prefix, type) drops it has already logged.
pub struct NodeFactory<'m> {
    model: &'m BiolinkModel,
    logged_drops: HashSet<(String, BiolinkType)>,
    ancestors: HashMap<BiolinkType, Vec<BiolinkType>>,
}

impl<'m> NodeFactory<'m> {
    pub fn new(model: &'m BiolinkModel) -> Self {
        Self {
            model,
            logged_drops: HashSet::new(),
            ancestors: HashMap::new(),
        }
    }

    /// Assemble a node using the model's prefix list for `biolink_type`.
    ///
    /// Returns `Ok(None)` when no member has a prefix allowed for the type.
    pub fn create_node(
        &mut self,
        members: &[InputIdentifier],
        biolink_type: &BiolinkType,
        known_labels: &dyn AnnotationStore,
    ) -> CompendiumResult<Option<AssembledNode>> {
        let prefixes = self.model.id_prefixes(biolink_type)?.to_vec();
        self.assemble(members, biolink_type, &prefixes, known_labels)
    }

    /// Assemble a node against an explicit prefix priority list.
    pub fn assemble(
        &mut self,
        members: &[InputIdentifier],
        biolink_type: &BiolinkType,
        prefix_priority: &[String],
        known_labels: &dyn AnnotationStore,
    ) -> CompendiumResult<Option<AssembledNode>> {
        let (ids, mut labels) = collapse_labels(members);
        for id in &ids {
            if labels.contains_key(id) {
                continue;
            }
            if let Some(label) = known_labels.label(id)? {
                if !label.trim().is_empty() {
                    labels.insert(id.clone(), label);
                }
            }
        }

        // Group by uppercased prefix, keeping member order within a group
        let mut groups: HashMap<String, Vec<Identifier>> = HashMap::new();
        let mut group_order: Vec<String> = Vec::new();
        for id in &ids {
            let key = id.prefix().to_uppercase();
            if !groups.contains_key(&key) {
                group_order.push(key.clone());
            }
            groups.entry(key).or_default().push(id.clone());
        }

        let mut identifiers = Vec::new();
        for prefix in prefix_priority {
            let Some(mut group) = groups.remove(&prefix.to_uppercase()) else {
                continue;
            };
            let best_ranked = identifiers.is_empty();
            if best_ranked && prefix == PUBCHEM_COMPOUND && group.len() > 1 {
                if let Some(best) = pubchem::pick_best(&group, &labels) {
                    pubchem::promote(&mut group, &best);
                }
            }
            for id in group {
                let label = labels.get(&id).cloned();
                let identifier = if id.prefix() == prefix {
                    id
                } else {
                    id.with_prefix(prefix)
                };
                identifiers.push(NodeIdentifier { identifier, label });
            }
        }

        for key in group_order.iter().filter(|k| groups.contains_key(*k)) {
            self.log_dropped(&groups[key][0], biolink_type);
        }

        if identifiers.is_empty() {
            return Ok(None);
        }

        let label = identifiers.iter().find_map(|n| n.label.clone());
        let ancestors = self.ancestors_of(biolink_type)?;

        Ok(Some(AssembledNode {
            identifiers,
            label,
            biolink_type: biolink_type.clone(),
            ancestors,
        }))
    }

    fn ancestors_of(&mut self, biolink_type: &BiolinkType) -> CompendiumResult<Vec<BiolinkType>> {
        if let Some(cached) = self.ancestors.get(biolink_type) {
            return Ok(cached.clone());
        }
        let ancestors = self.model.ancestors(biolink_type)?;
        self.ancestors.insert(biolink_type.clone(), ancestors.clone());
        Ok(ancestors)
    }

    fn log_dropped(&mut self, example: &Identifier, biolink_type: &BiolinkType) {
        let key = (example.prefix().to_string(), biolink_type.clone());
        if self.logged_drops.insert(key) {
            warn!(
                prefix = example.prefix(),
                %biolink_type,
                %example,
                "dropping identifiers with prefix not allowed for type"
            );
        }
    }
}
