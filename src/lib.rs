//! recsim: similarity kernels for recommendation workloads in pure Rust.
//!
//! recsim scores users against users and products against liked products
//! with cosine similarity, and computes raw all-pairs dot-product tables.
//! The kernels are pure, allocate exactly one result per call and never
//! mutate their inputs, so they can be called from any number of threads.
//!
//! # Quick Start
//!
//! ```
//! use recsim::prelude::*;
//!
//! // rows = users, columns = products
//! let interactions = Matrix::from_rows(&[
//!     vec![5.0, 3.0, 0.0],
//!     vec![4.0, 0.0, 0.0],
//!     vec![0.0, 0.0, 5.0],
//! ]).expect("rows have equal length");
//!
//! let me = interactions.row(0);
//! let sims = user_similarity(&interactions, &me).expect("shapes match");
//!
//! assert!((sims[0] - 1.0).abs() < 1e-12);
//! assert!(sims[1] > sims[2]);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Dense `Vector` and `Matrix` types
//! - [`similarity`]: User/product cosine similarity and batch dot products
//! - [`encode`]: Interaction-matrix and product-feature builders
//! - [`error`]: Error type shared by all operations
//!
//! # Features
//!
//! - `parallel`: split the outer row loop of every kernel across a rayon
//!   thread pool. Results are bit-identical to the sequential build.

pub mod encode;
pub mod error;
pub mod prelude;
pub mod primitives;
pub mod similarity;

pub use error::{RecsimError, Result};
pub use primitives::{Matrix, Vector};
pub use similarity::{batch_dot_product, product_similarity, user_similarity};
