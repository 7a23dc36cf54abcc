//! GlomIndex: caller-owned disjoint-set index over identifiers

use super::policy::GlomPolicy;
use super::stats::MergeStats;
use crate::curie::Identifier;
use crate::error::{CompendiumError, CompendiumResult};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Arena slot of a merged set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct ClusterId(usize);

#[derive(Debug, Clone, Default)]
struct Cluster {
    members: BTreeSet<Identifier>,
    /// Member count per prefix, kept in step with `members`
    prefix_counts: HashMap<String, usize>,
}

impl Cluster {
    fn insert(&mut self, id: Identifier) {
        let prefix = id.prefix().to_string();
        if self.members.insert(id) {
            *self.prefix_counts.entry(prefix).or_insert(0) += 1;
        }
    }

    fn prefix_count(&self, prefix: &str) -> usize {
        self.prefix_counts.get(prefix).copied().unwrap_or(0)
    }
}

/// Maps every identifier to the one set it has been merged into.
///
/// All members of a set resolve to the same `ClusterId`, so equivalence is
/// symmetric and transitive by construction. Groups are applied strictly in
/// the order given; a group that would violate the call's `GlomPolicy` is
/// dropped whole and counted in the returned `MergeStats`.
#[derive(Debug, Clone, Default)]
pub struct GlomIndex {
    index: HashMap<Identifier, ClusterId>,
    clusters: Vec<Option<Cluster>>,
    free: Vec<usize>,
}

impl GlomIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `groups` in order under `policy`.
    ///
    /// Groups are unordered collections of identifiers. With
    /// `policy.strict_pairs`, a group of more than two distinct identifiers
    /// is a fatal `MalformedGroup`; groups applied before it stay applied.
    pub fn merge<G, I>(&mut self, groups: G, policy: &GlomPolicy) -> CompendiumResult<MergeStats>
    where
        G: IntoIterator<Item = I>,
        I: IntoIterator<Item = Identifier>,
    {
        let mut stats = MergeStats::default();

        for group in groups {
            let members: BTreeSet<Identifier> = group.into_iter().collect();
            stats.groups_seen += 1;
            if members.is_empty() {
                continue;
            }
            if policy.strict_pairs && members.len() > 2 {
                return Err(CompendiumError::MalformedGroup {
                    size: members.len(),
                });
            }

            let existing: BTreeSet<ClusterId> = members
                .iter()
                .filter_map(|id| self.index.get(id).copied())
                .collect();
            let fresh: Vec<&Identifier> = members
                .iter()
                .filter(|id| !self.index.contains_key(*id))
                .collect();

            if fresh.is_empty() && existing.len() == 1 {
                stats.already_joined += 1;
                continue;
            }

            if let Some(prefix) = self.repeated_unique_prefix(&existing, &fresh, policy) {
                debug!(
                    prefix,
                    group = ?members,
                    near = ?self.representative(
                        members.iter().find(|m| self.index.contains_key(*m)),
                        policy
                    ),
                    "rejecting merge: unique prefix would repeat"
                );
                stats.rejected_unique_prefix += 1;
                continue;
            }

            if let Some((a, b)) = self.close_match_conflict(&existing, &fresh, policy) {
                debug!(%a, %b, group = ?members, "rejecting merge: close matches would join");
                stats.rejected_close_match += 1;
                continue;
            }

            self.apply(existing, fresh.into_iter().cloned().collect());
            stats.merged += 1;
        }

        Ok(stats)
    }

    /// Add `id` as a singleton set if it is not indexed yet
    pub fn insert(&mut self, id: Identifier) {
        if self.index.contains_key(&id) {
            return;
        }
        self.apply(BTreeSet::new(), vec![id]);
    }

    /// The set `id` belongs to
    pub fn get(&self, id: &Identifier) -> Option<&BTreeSet<Identifier>> {
        self.index
            .get(id)
            .and_then(|cid| self.cluster(*cid))
            .map(|c| &c.members)
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.index.contains_key(id)
    }

    /// True if both identifiers are indexed and share a set
    pub fn same_set(&self, a: &Identifier, b: &Identifier) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Number of indexed identifiers
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of distinct sets
    pub fn cluster_count(&self) -> usize {
        self.clusters.len() - self.free.len()
    }

    /// Every distinct set, ordered by its smallest member
    pub fn cliques(&self) -> Vec<&BTreeSet<Identifier>> {
        let mut out: Vec<&BTreeSet<Identifier>> = self
            .clusters
            .iter()
            .flatten()
            .map(|c| &c.members)
            .collect();
        out.sort_by(|a, b| a.iter().next().cmp(&b.iter().next()));
        out
    }

    /// Member that stands for the set of `id`: the first with the policy's
    /// preferred prefix, else the smallest member.
    pub fn representative(
        &self,
        id: Option<&Identifier>,
        policy: &GlomPolicy,
    ) -> Option<&Identifier> {
        let members = self.get(id?)?;
        policy
            .preferred_prefix
            .as_deref()
            .and_then(|p| members.iter().find(|m| m.has_prefix(p)))
            .or_else(|| members.iter().next())
    }

    fn cluster(&self, cid: ClusterId) -> Option<&Cluster> {
        self.clusters.get(cid.0).and_then(|c| c.as_ref())
    }

    fn repeated_unique_prefix<'p>(
        &self,
        existing: &BTreeSet<ClusterId>,
        fresh: &[&Identifier],
        policy: &'p GlomPolicy,
    ) -> Option<&'p str> {
        policy
            .unique_prefixes
            .iter()
            .find(|prefix| {
                let in_sets: usize = existing
                    .iter()
                    .filter_map(|cid| self.cluster(*cid))
                    .map(|c| c.prefix_count(prefix))
                    .sum();
                let in_fresh = fresh.iter().filter(|id| id.has_prefix(prefix)).count();
                in_sets + in_fresh > 1
            })
            .map(|p| p.as_str())
    }

    fn close_match_conflict(
        &self,
        existing: &BTreeSet<ClusterId>,
        fresh: &[&Identifier],
        policy: &GlomPolicy,
    ) -> Option<(Identifier, Identifier)> {
        let table = &policy.close_matches;
        if table.is_empty() {
            return None;
        }
        let sets: Vec<&Cluster> = existing.iter().filter_map(|cid| self.cluster(*cid)).collect();
        let in_candidate = |id: &Identifier| {
            fresh.iter().any(|f| *f == id) || sets.iter().any(|c| c.members.contains(id))
        };

        let candidates = sets
            .iter()
            .flat_map(|c| c.members.iter())
            .chain(fresh.iter().copied())
            .filter(|id| table.has_prefix(id.prefix()));

        for id in candidates {
            if let Some(close) = table.get(id) {
                if let Some(other) = close.iter().find(|c| in_candidate(*c)) {
                    return Some((id.clone(), other.clone()));
                }
            }
        }
        None
    }

    /// Union the existing sets and fresh identifiers into the largest set.
    fn apply(&mut self, existing: BTreeSet<ClusterId>, fresh: Vec<Identifier>) {
        let target = existing
            .iter()
            .copied()
            .max_by_key(|cid| self.cluster(*cid).map(|c| c.members.len()).unwrap_or(0));

        let target = match target {
            Some(cid) => cid,
            None => self.allocate(),
        };

        let mut moved: Vec<Identifier> = fresh;
        for cid in existing.into_iter().filter(|cid| *cid != target) {
            if let Some(cluster) = self.clusters[cid.0].take() {
                moved.extend(cluster.members);
                self.free.push(cid.0);
            }
        }

        for id in moved {
            self.index.insert(id.clone(), target);
            if let Some(cluster) = self.clusters[target.0].as_mut() {
                cluster.insert(id);
            }
        }
    }

    fn allocate(&mut self) -> ClusterId {
        match self.free.pop() {
            Some(slot) => {
                self.clusters[slot] = Some(Cluster::default());
                ClusterId(slot)
            }
            None => {
                self.clusters.push(Some(Cluster::default()));
                ClusterId(self.clusters.len() - 1)
            }
        }
    }
}
