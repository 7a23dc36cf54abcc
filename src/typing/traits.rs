//! Typing policy interface

use crate::biolink::BiolinkType;
use crate::curie::Identifier;
use crate::error::CompendiumResult;
use std::collections::{BTreeSet, HashMap};

/// Known per-identifier semantic types, as read from identifier files
pub type KnownTypes = HashMap<Identifier, BiolinkType>;

/// A merged set with the one semantic type it was assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedClique {
    pub biolink_type: BiolinkType,
    pub members: BTreeSet<Identifier>,
}

impl TypedClique {
    pub fn new(biolink_type: BiolinkType, members: BTreeSet<Identifier>) -> Self {
        Self {
            biolink_type,
            members,
        }
    }
}

/// Pluggable per-domain rule for typing a merged set.
///
/// Most policies return exactly one `TypedClique`; a policy may split a set
/// into several when its members' types cannot share one clique.
pub trait TypingPolicy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Assign a type to `clique`, or fail if no type can be found and the
    /// policy has no fallback.
    fn assign(
        &self,
        clique: &BTreeSet<Identifier>,
        known_types: &KnownTypes,
    ) -> CompendiumResult<Vec<TypedClique>>;
}
