//! Compendium: biomedical identifier clique builder
//!
//! Folds equivalence assertions between identifiers from many vocabularies
//! into cliques, assigns each clique a Biolink type, orders its identifiers
//! canonically and writes compendium and synonym files.
//!
//! # Core Concepts
//!
//! - **Glom**: incremental set merging under unique-prefix and close-match
//!   constraints ([`GlomIndex`])
//! - **Typing**: pluggable per-domain rules ([`TypingPolicy`])
//! - **Node assembly**: prefix-priority ordering with a PubChem tie-break
//!   ([`NodeFactory`])
//! - **Compendium output**: preferred names, information content and
//!   synonyms as JSON lines ([`CompendiumWriter`])
//!
//! # Example
//!
//! ```
//! use compendium::{GlomIndex, GlomPolicy, Identifier};
//!
//! let mut index = GlomIndex::new();
//! let pairs = vec![[Identifier::new("MONDO:0005148"), Identifier::new("DOID:9352")]];
//! let stats = index.merge(pairs, &GlomPolicy::new().with_unique_prefixes(["MONDO"])).unwrap();
//! assert_eq!(stats.merged, 1);
//! assert!(index.same_set(&Identifier::new("MONDO:0005148"), &Identifier::new("DOID:9352")));
//! ```

pub mod biolink;
pub mod compendium;
pub mod config;
pub mod curie;
mod error;
pub mod glom;
pub mod node;
pub mod pipeline;
pub mod store;
mod tsv;
pub mod typing;

pub use biolink::{BiolinkModel, BiolinkType};
pub use compendium::{CompendiumWriter, NamingConfig};
pub use config::BuildConfig;
pub use curie::{Identifier, InputIdentifier, PrefixNormalizer};
pub use error::{CompendiumError, CompendiumResult};
pub use glom::{CloseMatchTable, GlomIndex, GlomPolicy, MergeStats};
pub use node::{AssembledNode, NodeFactory};
pub use pipeline::{CompendiumBuilder, RunReport};
pub use store::{AnnotationStore, FileAnnotations, InMemoryAnnotations};
pub use typing::{assign_types, ChemicalPolicy, TrustedPrefixPolicy, TypingPolicy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
