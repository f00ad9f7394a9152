//! All-pairs dot products between two row sets.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use super::row_dot;
use crate::error::{RecsimError, Result};
use crate::primitives::Matrix;

/// Dot product of every row of `a` (NxM) with every row of `b` (KxM).
///
/// Returns an NxK matrix with `result[i][j] = sum_m a[i][m] * b[j][m]`.
/// There is no normalization. Each cell is an independent reduction over M
/// starting from 0.0, so M = 0 yields an NxK matrix of zeros and N = 0 or
/// K = 0 yields an empty matrix that keeps the other dimension.
///
/// # Errors
///
/// Returns [`RecsimError::DimensionMismatch`] if the column counts differ.
///
/// # Examples
///
/// ```
/// use recsim::primitives::Matrix;
/// use recsim::similarity::batch_dot_product;
///
/// let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).expect("2x2");
/// let b = Matrix::from_rows(&[vec![5.0, 6.0]]).expect("1x2");
///
/// let table = batch_dot_product(&a, &b).expect("shared column count");
/// assert_eq!(table.shape(), (2, 1));
/// assert_eq!(table.get(0, 0), 17.0);
/// assert_eq!(table.get(1, 0), 39.0);
/// ```
pub fn batch_dot_product(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>> {
    let (n, m) = a.shape();
    let k = b.n_rows();
    if b.n_cols() != m {
        debug!(
            a_cols = m,
            b_cols = b.n_cols(),
            "batch_dot_product rejected mismatched operands"
        );
        return Err(RecsimError::dimension_mismatch(
            "columns of b",
            m,
            b.n_cols(),
        ));
    }

    trace!(n, k, m, "batch_dot_product");
    let mut data = vec![0.0; n * k];

    // chunks of length 0 are not allowed; with K = 0 there is nothing to fill
    if k > 0 {
        #[cfg(feature = "parallel")]
        data.par_chunks_mut(k)
            .enumerate()
            .for_each(|(i, out_row)| fill_row(out_row, a.row_slice(i), b));

        #[cfg(not(feature = "parallel"))]
        for (out_row, a_row) in data.chunks_mut(k).zip(a.rows_iter()) {
            fill_row(out_row, a_row, b);
        }
    }

    Matrix::from_vec(n, k, data)
}

#[inline]
fn fill_row(out_row: &mut [f64], a_row: &[f64], b: &Matrix<f64>) {
    for (cell, b_row) in out_row.iter_mut().zip(b.rows_iter()) {
        *cell = row_dot(a_row, b_row);
    }
}

#[cfg(test)]
#[path = "dot_tests.rs"]
mod tests;
