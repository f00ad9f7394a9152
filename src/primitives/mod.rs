//! Dense numeric containers (Vector, Matrix).
//!
//! Both types are row-major and own their storage. The similarity kernels
//! read rows through [`Matrix::row_slice`] so no per-row copies are made.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
