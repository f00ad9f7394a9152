//! Builders for the dense inputs the similarity kernels consume.
//!
//! - [`InteractionMatrixBuilder`] turns a log of user/product interactions
//!   into a users x products strength matrix for
//!   [`user_similarity`](crate::similarity::user_similarity).
//! - [`ProductAttributes`] encodes catalog attributes into a fixed
//!   [`FEATURE_DIM`]-wide feature row for
//!   [`product_similarity`](crate::similarity::product_similarity).
//!
//! Both are driven by small serde-friendly configuration structs
//! ([`InteractionWeights`], [`FeatureScales`]) whose defaults reproduce the
//! shop's scoring rules.

mod features;
mod interaction;

pub use features::{encode_products, label_bucket, FeatureScales, ProductAttributes, FEATURE_DIM};
pub use interaction::{
    InteractionKind, InteractionMatrix, InteractionMatrixBuilder, InteractionWeights,
};
