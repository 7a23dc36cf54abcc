//! Incremental identifier merging ("glom")
//!
//! Relationship pairs are folded into a caller-owned [`GlomIndex`] one group
//! at a time. Each call carries a [`GlomPolicy`]: unique-prefix constraints
//! and a close-match table. A group whose merge would break either is
//! rejected whole and counted in [`MergeStats`]; nothing is partially
//! applied.
//!
//! Results depend on group order when rejections occur, since a later group
//! may join the same concepts through another path.

mod index;
mod policy;
mod stats;


pub use index::GlomIndex;
pub use policy::{CloseMatchTable, GlomPolicy};
pub use stats::MergeStats;
