//! Chemical typing: trusted prefixes plus the small-molecule/mixture split

use super::traits::{KnownTypes, TypedClique, TypingPolicy};
use super::trusted::TrustedPrefixPolicy;
use crate::biolink::{types, BiolinkType};
use crate::curie::Identifier;
use crate::error::CompendiumResult;
use std::collections::BTreeSet;
use tracing::debug;

/// Chemical policy.
///
/// When the trusted members vote exactly {SmallMolecule, MolecularMixture},
/// the set was joined through a shared InChIKey across stereo or salt
/// variants. Members typed MolecularMixture are split into their own
/// clique; everything else stays a SmallMolecule.
#[derive(Debug, Clone)]
pub struct ChemicalPolicy {
    base: TrustedPrefixPolicy,
    single: BiolinkType,
    mixture: BiolinkType,
}

impl ChemicalPolicy {
    pub fn new(base: TrustedPrefixPolicy) -> Self {
        Self {
            base,
            single: BiolinkType::new(types::SMALL_MOLECULE),
            mixture: BiolinkType::new(types::MOLECULAR_MIXTURE),
        }
    }

    fn is_split_conflict(&self, votes: &BTreeSet<BiolinkType>) -> bool {
        votes.len() == 2 && votes.contains(&self.single) && votes.contains(&self.mixture)
    }
}

impl TypingPolicy for ChemicalPolicy {
    fn name(&self) -> &str {
        "chemical"
    }

    fn assign(
        &self,
        clique: &BTreeSet<Identifier>,
        known_types: &KnownTypes,
    ) -> CompendiumResult<Vec<TypedClique>> {
        let votes = self.base.trusted_types(clique, known_types);
        if !self.is_split_conflict(&votes) {
            return self.base.assign(clique, known_types);
        }

        let (mixtures, rest): (BTreeSet<Identifier>, BTreeSet<Identifier>) = clique
            .iter()
            .cloned()
            .partition(|id| known_types.get(id) == Some(&self.mixture));
        debug!(
            mixtures = mixtures.len(),
            remaining = rest.len(),
            "splitting mixture members out of small-molecule clique"
        );

        Ok(vec![
            TypedClique::new(self.single.clone(), rest),
            TypedClique::new(self.mixture.clone(), mixtures),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ChemicalPolicy {
        ChemicalPolicy::new(
            TrustedPrefixPolicy::new(["PUBCHEM.COMPOUND", "CHEBI"])
                .with_type_priority([types::SMALL_MOLECULE, types::MOLECULAR_MIXTURE, types::CHEMICAL_ENTITY])
                .with_fallback(types::CHEMICAL_ENTITY),
        )
    }

    fn ids(list: &[&str]) -> BTreeSet<Identifier> {
        list.iter().map(|s| Identifier::new(*s)).collect()
    }

    #[test]
    fn conflicting_trusted_votes_split() {
        let clique = ids(&["PUBCHEM.COMPOUND:962", "PUBCHEM.COMPOUND:22247451", "CHEBI:15377", "INCHIKEY:X"]);
        let mut known = KnownTypes::new();
        known.insert(Identifier::new("PUBCHEM.COMPOUND:962"), types::SMALL_MOLECULE.into());
        known.insert(Identifier::new("CHEBI:15377"), types::SMALL_MOLECULE.into());
        known.insert(Identifier::new("PUBCHEM.COMPOUND:22247451"), types::MOLECULAR_MIXTURE.into());

        let typed = policy().assign(&clique, &known).unwrap();

        assert_eq!(typed.len(), 2);
        assert_eq!(typed[0].biolink_type.as_str(), types::SMALL_MOLECULE);
        assert_eq!(typed[0].members, ids(&["PUBCHEM.COMPOUND:962", "CHEBI:15377", "INCHIKEY:X"]));
        assert_eq!(typed[1].biolink_type.as_str(), types::MOLECULAR_MIXTURE);
        assert_eq!(typed[1].members, ids(&["PUBCHEM.COMPOUND:22247451"]));
    }

    #[test]
    fn agreeing_votes_do_not_split() {
        let clique = ids(&["PUBCHEM.COMPOUND:962", "CHEBI:15377"]);
        let mut known = KnownTypes::new();
        known.insert(Identifier::new("PUBCHEM.COMPOUND:962"), types::SMALL_MOLECULE.into());
        known.insert(Identifier::new("CHEBI:15377"), types::SMALL_MOLECULE.into());

        let typed = policy().assign(&clique, &known).unwrap();
        assert_eq!(typed.len(), 1);
        assert_eq!(typed[0].biolink_type.as_str(), types::SMALL_MOLECULE);
    }

    #[test]
    fn other_conflicts_use_first_trusted_prefix() {
        let clique = ids(&["PUBCHEM.COMPOUND:1", "CHEBI:2"]);
        let mut known = KnownTypes::new();
        known.insert(Identifier::new("PUBCHEM.COMPOUND:1"), types::MOLECULAR_MIXTURE.into());
        known.insert(Identifier::new("CHEBI:2"), types::POLYPEPTIDE.into());

        let typed = policy().assign(&clique, &known).unwrap();
        assert_eq!(typed.len(), 1);
        assert_eq!(typed[0].biolink_type.as_str(), types::MOLECULAR_MIXTURE);
    }

    #[test]
    fn untyped_chemicals_fall_back() {
        let typed = policy().assign(&ids(&["MESH:D1"]), &KnownTypes::new()).unwrap();
        assert_eq!(typed[0].biolink_type.as_str(), types::CHEMICAL_ENTITY);
    }
}
