//! Compendium and synonym output
//!
//! For each assembled node the writer derives information content, a
//! preferred name, alternative ids, descriptions and taxa, then writes one
//! compendium line and (when a preferred name exists) one synonym line.

pub mod naming;
mod records;
mod writer;

pub use naming::NamingConfig;
pub use records::{CompendiumRecord, RecordIdentifier, SynonymRecord};
pub use writer::{CompendiumWriter, WriteOutcome, WriterStats};
