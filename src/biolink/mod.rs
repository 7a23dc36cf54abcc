//! Biolink Model subset: semantic types, their ancestry and prefix priorities

mod model;

pub use model::{types, BiolinkModel, BiolinkType};
