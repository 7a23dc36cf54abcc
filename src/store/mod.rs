//! Lookup stores for labels, synonyms, descriptions, taxa, IC and properties

mod files;
mod memory;
mod traits;

pub use files::FileAnnotations;
pub use memory::InMemoryAnnotations;
pub use traits::{AnnotationStore, HAS_ALTERNATIVE_ID};
