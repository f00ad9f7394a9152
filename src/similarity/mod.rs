//! Similarity kernels for recommendation workloads.
//!
//! Three stateless routines score one reference against every row of a
//! matrix, or every row of one matrix against every row of another:
//!
//! - [`user_similarity`]: cosine similarity of an interaction vector against
//!   each user row of an interaction matrix.
//! - [`product_similarity`]: cosine similarity of one product's features
//!   (a 1xF matrix) against each liked item's features.
//! - [`batch_dot_product`]: the raw NxK dot-product table between the rows
//!   of two matrices.
//!
//! Shapes are validated before any work is done. A zero-norm reference or
//! row scores 0.0 instead of NaN. Every output element is a sequential,
//! index-ascending reduction, so repeated calls are bit-identical, also with
//! the `parallel` feature, which only splits the outer row loop.
//!
//! # Quick Start
//!
//! ```
//! use recsim::primitives::{Matrix, Vector};
//! use recsim::similarity::{batch_dot_product, user_similarity};
//!
//! let interactions = Matrix::from_rows(&[
//!     vec![5.0, 0.0, 3.0],
//!     vec![0.0, 4.0, 0.0],
//! ]).expect("rows have equal length");
//! let me = Vector::from_slice(&[5.0, 0.0, 3.0]);
//!
//! let sims = user_similarity(&interactions, &me).expect("shapes match");
//! assert!((sims[0] - 1.0).abs() < 1e-12);
//! assert_eq!(sims[1], 0.0);
//!
//! let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).expect("2x2");
//! let b = Matrix::from_rows(&[vec![5.0, 6.0]]).expect("1x2");
//! let table = batch_dot_product(&a, &b).expect("shared column count");
//! assert_eq!(table.as_slice(), &[17.0, 39.0]);
//! ```

mod cosine;
mod dot;

pub use cosine::{product_similarity, user_similarity};
pub use dot::batch_dot_product;

/// Dot product of two equal-length slices, index ascending.
#[inline]
fn row_dot(a: &[f64], b: &[f64]) -> f64 {
    let mut acc = 0.0;
    for (x, y) in a.iter().zip(b) {
        acc += x * y;
    }
    acc
}

/// Euclidean norm, index ascending.
#[inline]
fn norm(values: &[f64]) -> f64 {
    let mut sq = 0.0;
    for x in values {
        sq += x * x;
    }
    sq.sqrt()
}

/// Single pass over `row`: returns (reference . row, ||row||^2).
#[inline]
fn dot_and_norm_sq(reference: &[f64], row: &[f64]) -> (f64, f64) {
    let mut dot = 0.0;
    let mut norm_sq = 0.0;
    for (r, x) in reference.iter().zip(row) {
        dot += r * x;
        norm_sq += x * x;
    }
    (dot, norm_sq)
}

// Similarity contract falsification (FALSIFY-SIM-001..009)
#[cfg(test)]
#[path = "tests_similarity_contract.rs"]
mod tests_similarity_contract;
