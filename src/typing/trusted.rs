//! Trusted-prefix typing with majority-vote fallback

use super::traits::{KnownTypes, TypedClique, TypingPolicy};
use crate::biolink::BiolinkType;
use crate::curie::Identifier;
use crate::error::{CompendiumError, CompendiumResult};
use std::collections::{BTreeSet, HashMap};

/// Types a set from its most trusted prefix, else by majority vote.
///
/// 1. The first trusted prefix (in order) with a typed member decides; the
///    member used is the smallest identifier of that prefix with a known type.
/// 2. Otherwise the most common known type among members wins; ties go to
///    the type listed earliest in `type_priority`, then to the smaller name.
/// 3. Otherwise the fallback type, if any.
#[derive(Debug, Clone)]
pub struct TrustedPrefixPolicy {
    pub trusted_prefixes: Vec<String>,
    pub type_priority: Vec<BiolinkType>,
    pub fallback: Option<BiolinkType>,
}

impl TrustedPrefixPolicy {
    pub fn new<I, S>(trusted_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trusted_prefixes: trusted_prefixes.into_iter().map(Into::into).collect(),
            type_priority: Vec::new(),
            fallback: None,
        }
    }

    /// Most specific types first
    pub fn with_type_priority<I, T>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<BiolinkType>,
    {
        self.type_priority = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fallback(mut self, fallback: impl Into<BiolinkType>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Type of the first typed member under the highest-ranked trusted prefix
    pub fn trusted_vote(
        &self,
        clique: &BTreeSet<Identifier>,
        known_types: &KnownTypes,
    ) -> Option<BiolinkType> {
        self.trusted_prefixes.iter().find_map(|prefix| {
            clique
                .iter()
                .filter(|id| id.has_prefix(prefix))
                .find_map(|id| known_types.get(id).cloned())
        })
    }

    /// Every type voted by a member carrying any trusted prefix
    pub fn trusted_types(
        &self,
        clique: &BTreeSet<Identifier>,
        known_types: &KnownTypes,
    ) -> BTreeSet<BiolinkType> {
        clique
            .iter()
            .filter(|id| self.trusted_prefixes.iter().any(|p| id.has_prefix(p)))
            .filter_map(|id| known_types.get(id).cloned())
            .collect()
    }

    /// Most common known type, ties broken by `type_priority`
    pub fn majority_vote(
        &self,
        clique: &BTreeSet<Identifier>,
        known_types: &KnownTypes,
    ) -> Option<BiolinkType> {
        let mut counts: HashMap<&BiolinkType, usize> = HashMap::new();
        for id in clique {
            if let Some(t) = known_types.get(id) {
                *counts.entry(t).or_insert(0) += 1;
            }
        }

        let rank = |t: &BiolinkType| {
            self.type_priority
                .iter()
                .position(|p| p == t)
                .unwrap_or(self.type_priority.len())
        };

        counts
            .into_iter()
            .min_by(|(ta, ca), (tb, cb)| {
                cb.cmp(ca)
                    .then_with(|| rank(ta).cmp(&rank(tb)))
                    .then_with(|| ta.cmp(tb))
            })
            .map(|(t, _)| t.clone())
    }
}

impl TypingPolicy for TrustedPrefixPolicy {
    fn name(&self) -> &str {
        "trusted_prefix"
    }

    fn assign(
        &self,
        clique: &BTreeSet<Identifier>,
        known_types: &KnownTypes,
    ) -> CompendiumResult<Vec<TypedClique>> {
        let chosen = self
            .trusted_vote(clique, known_types)
            .or_else(|| self.majority_vote(clique, known_types))
            .or_else(|| self.fallback.clone());

        match chosen {
            Some(t) => Ok(vec![TypedClique::new(t, clique.clone())]),
            None => Err(CompendiumError::UnassignableType {
                members: clique.iter().map(|id| id.to_string()).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biolink::types;

    fn clique(ids: &[&str]) -> BTreeSet<Identifier> {
        ids.iter().map(|s| Identifier::new(*s)).collect()
    }

    fn known(pairs: &[(&str, &str)]) -> KnownTypes {
        pairs
            .iter()
            .map(|(id, t)| (Identifier::new(*id), BiolinkType::new(*t)))
            .collect()
    }

    fn disease_policy() -> TrustedPrefixPolicy {
        TrustedPrefixPolicy::new(["MONDO", "HP"])
            .with_type_priority([types::DISEASE, types::PHENOTYPIC_FEATURE])
    }

    #[test]
    fn trusted_prefix_precedence() {
        let c = clique(&["HP:0000001", "MONDO:0000001", "UMLS:C1", "UMLS:C2"]);
        let k = known(&[
            ("MONDO:0000001", types::DISEASE),
            ("HP:0000001", types::PHENOTYPIC_FEATURE),
            ("UMLS:C1", types::PHENOTYPIC_FEATURE),
            ("UMLS:C2", types::PHENOTYPIC_FEATURE),
        ]);
        let typed = disease_policy().assign(&c, &k).unwrap();
        assert_eq!(typed.len(), 1);
        assert_eq!(typed[0].biolink_type.as_str(), types::DISEASE);
        assert_eq!(typed[0].members, c);
    }

    #[test]
    fn untyped_trusted_member_defers_to_next_prefix() {
        let c = clique(&["HP:0000001", "MONDO:0000001"]);
        let k = known(&[("HP:0000001", types::PHENOTYPIC_FEATURE)]);
        let typed = disease_policy().assign(&c, &k).unwrap();
        assert_eq!(typed[0].biolink_type.as_str(), types::PHENOTYPIC_FEATURE);
    }

    #[test]
    fn majority_vote_without_trusted_prefix() {
        let c = clique(&["UMLS:C1", "UMLS:C2", "MESH:D1"]);
        let k = known(&[
            ("UMLS:C1", types::PHENOTYPIC_FEATURE),
            ("UMLS:C2", types::PHENOTYPIC_FEATURE),
            ("MESH:D1", types::DISEASE),
        ]);
        let typed = disease_policy().assign(&c, &k).unwrap();
        assert_eq!(typed[0].biolink_type.as_str(), types::PHENOTYPIC_FEATURE);
    }

    #[test]
    fn majority_tie_prefers_more_specific_type() {
        let c = clique(&["UMLS:C1", "MESH:D1"]);
        let k = known(&[
            ("UMLS:C1", types::PHENOTYPIC_FEATURE),
            ("MESH:D1", types::DISEASE),
        ]);
        let typed = disease_policy().assign(&c, &k).unwrap();
        assert_eq!(typed[0].biolink_type.as_str(), types::DISEASE);
    }

    #[test]
    fn fallback_when_nothing_typed() {
        let c = clique(&["UMLS:C1"]);
        let policy = disease_policy().with_fallback(types::DISEASE);
        let typed = policy.assign(&c, &KnownTypes::new()).unwrap();
        assert_eq!(typed[0].biolink_type.as_str(), types::DISEASE);
    }

    #[test]
    fn no_fallback_is_fatal() {
        let c = clique(&["UMLS:C1"]);
        let err = disease_policy().assign(&c, &KnownTypes::new()).unwrap_err();
        assert!(matches!(err, CompendiumError::UnassignableType { members } if members == vec!["UMLS:C1"]));
    }
}
