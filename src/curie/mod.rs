//! Identifier representation and prefix handling

mod identifier;
mod normalize;

pub use identifier::{collapse_labels, member_order, taxon_order, Identifier, InputIdentifier};
pub use normalize::PrefixNormalizer;
