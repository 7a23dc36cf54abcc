//! Node assembly: canonical identifier, member order, label and ancestry

mod factory;
pub mod pubchem;

pub use factory::{AssembledNode, NodeFactory, NodeIdentifier};
