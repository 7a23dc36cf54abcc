//! Merge diagnostics

use serde::Serialize;

/// What happened to the groups of one or more `merge` calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Groups offered to the engine
    pub groups_seen: usize,
    /// Groups that changed the index
    pub merged: usize,
    /// Groups whose members already shared one set
    pub already_joined: usize,
    /// Groups dropped because a unique prefix would repeat
    pub rejected_unique_prefix: usize,
    /// Groups dropped because two close matches would be joined
    pub rejected_close_match: usize,
}

impl MergeStats {
    pub fn rejected(&self) -> usize {
        self.rejected_unique_prefix + self.rejected_close_match
    }

    /// Add another call's counts into this one
    pub fn absorb(&mut self, other: &MergeStats) {
        self.groups_seen += other.groups_seen;
        self.merged += other.merged;
        self.already_joined += other.already_joined;
        self.rejected_unique_prefix += other.rejected_unique_prefix;
        self.rejected_close_match += other.rejected_close_match;
    }
}
