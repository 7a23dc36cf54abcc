//! File-driven build pipeline
//!
//! Reads identifier and concord files named by a [`BuildConfig`](crate::config::BuildConfig),
//! merges them per compendium, types and assembles the resulting cliques,
//! and writes one compendium file and one synonym file per Biolink type.

mod builder;
mod io;

pub use builder::{CompendiumBuilder, CompendiumReport, RunReport};
pub use io::{read_close_matches, read_concord_file, read_identifier_file};
