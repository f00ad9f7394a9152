//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use recsim::prelude::*;
//! ```

pub use crate::encode::{
    encode_products, FeatureScales, InteractionKind, InteractionMatrixBuilder,
    InteractionWeights, ProductAttributes,
};
pub use crate::error::RecsimError;
pub use crate::primitives::{Matrix, Vector};
pub use crate::similarity::{batch_dot_product, product_similarity, user_similarity};
