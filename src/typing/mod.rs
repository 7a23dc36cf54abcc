//! Clique typing
//!
//! Each merged set gets exactly one Biolink type from a per-domain
//! [`TypingPolicy`]. [`TrustedPrefixPolicy`] covers diseases, processes,
//! anatomy and the like; [`ChemicalPolicy`] adds the small-molecule versus
//! mixture split.

mod chemical;
mod traits;
mod trusted;

pub use chemical::ChemicalPolicy;
pub use traits::{KnownTypes, TypedClique, TypingPolicy};
pub use trusted::TrustedPrefixPolicy;

use crate::biolink::BiolinkType;
use crate::curie::Identifier;
use crate::error::CompendiumResult;
use std::collections::{BTreeMap, BTreeSet};

/// Type every set, grouping the results by assigned type.
///
/// Fails on the first set the policy cannot type.
pub fn assign_types<'a, I>(
    cliques: I,
    known_types: &KnownTypes,
    policy: &dyn TypingPolicy,
) -> CompendiumResult<BTreeMap<BiolinkType, Vec<BTreeSet<Identifier>>>>
where
    I: IntoIterator<Item = &'a BTreeSet<Identifier>>,
{
    let mut typed: BTreeMap<BiolinkType, Vec<BTreeSet<Identifier>>> = BTreeMap::new();
    for clique in cliques {
        for t in policy.assign(clique, known_types)? {
            if !t.members.is_empty() {
                typed.entry(t.biolink_type).or_default().push(t.members);
            }
        }
    }
    Ok(typed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biolink::types;

    #[test]
    fn groups_by_type() {
        let a: BTreeSet<Identifier> = [Identifier::new("MONDO:1"), Identifier::new("DOID:1")].into();
        let b: BTreeSet<Identifier> = [Identifier::new("HP:1")].into();
        let c: BTreeSet<Identifier> = [Identifier::new("MONDO:2")].into();
        let mut known = KnownTypes::new();
        known.insert(Identifier::new("MONDO:1"), types::DISEASE.into());
        known.insert(Identifier::new("MONDO:2"), types::DISEASE.into());
        known.insert(Identifier::new("HP:1"), types::PHENOTYPIC_FEATURE.into());

        let policy = TrustedPrefixPolicy::new(["MONDO", "HP"]);
        let typed = assign_types([&a, &b, &c], &known, &policy).unwrap();

        assert_eq!(typed.len(), 2);
        assert_eq!(typed[&BiolinkType::new(types::DISEASE)], vec![a, c]);
        assert_eq!(typed[&BiolinkType::new(types::PHENOTYPIC_FEATURE)], vec![b]);
    }
}
