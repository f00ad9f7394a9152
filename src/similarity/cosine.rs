//! Cosine similarity of one reference against every row of a matrix.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use super::{dot_and_norm_sq, norm};
use crate::error::{RecsimError, Result};
use crate::primitives::{Matrix, Vector};

/// Cosine similarity between `vector` and each row of `matrix`.
///
/// `matrix` is a UxP interaction table (rows = users, columns = products)
/// and `vector` one user's P interaction strengths. Element `i` of the
/// result is `dot(vector, row_i) / (||vector|| * ||row_i||)`.
///
/// A zero reference vector yields U zeros; a zero row scores 0.0 and leaves
/// the other rows unaffected. With zero columns every norm is zero, so the
/// result is U zeros.
///
/// # Errors
///
/// Returns [`RecsimError::DimensionMismatch`] if `vector.len()` differs from
/// the matrix column count.
///
/// # Examples
///
/// ```
/// use recsim::primitives::{Matrix, Vector};
/// use recsim::similarity::user_similarity;
///
/// let users = Matrix::from_rows(&[
///     vec![1.0, 0.0],
///     vec![0.0, 1.0],
///     vec![0.0, 0.0],
/// ]).expect("rows have equal length");
/// let sims = user_similarity(&users, &Vector::from_slice(&[1.0, 1.0])).expect("P matches");
///
/// assert_eq!(sims.len(), 3);
/// assert!((sims[0] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// assert_eq!(sims[2], 0.0);
/// ```
pub fn user_similarity(matrix: &Matrix<f64>, vector: &Vector<f64>) -> Result<Vector<f64>> {
    let (users, products) = matrix.shape();
    if vector.len() != products {
        debug!(
            matrix_cols = products,
            vector_len = vector.len(),
            "user_similarity rejected mismatched operands"
        );
        return Err(RecsimError::dimension_mismatch(
            "vector length",
            products,
            vector.len(),
        ));
    }

    trace!(users, products, "user_similarity");
    Ok(Vector::from_vec(cosine_against_rows(
        matrix,
        vector.as_slice(),
    )))
}

/// Cosine similarity between one product and each liked item.
///
/// `liked_features` is an LxF feature table of the items a user liked and
/// `product_features` a 1xF matrix holding the candidate product's features.
/// Element `i` of the result is the cosine similarity between the candidate
/// and liked item `i`, with the same zero-norm conventions as
/// [`user_similarity`].
///
/// # Errors
///
/// Returns [`RecsimError::DimensionMismatch`] if `product_features` does not
/// have exactly one row, or if the two matrices disagree on F.
///
/// # Examples
///
/// ```
/// use recsim::primitives::Matrix;
/// use recsim::similarity::product_similarity;
///
/// let liked = Matrix::from_rows(&[vec![1.0, 2.0], vec![-1.0, -2.0]]).expect("2x2");
/// let candidate = Matrix::from_rows(&[vec![2.0, 4.0]]).expect("1x2");
///
/// let sims = product_similarity(&liked, &candidate).expect("one row, same F");
/// assert!((sims[0] - 1.0).abs() < 1e-12);
/// assert!((sims[1] + 1.0).abs() < 1e-12);
/// ```
pub fn product_similarity(
    liked_features: &Matrix<f64>,
    product_features: &Matrix<f64>,
) -> Result<Vector<f64>> {
    if product_features.n_rows() != 1 {
        debug!(
            rows = product_features.n_rows(),
            "product_similarity rejected reference matrix"
        );
        return Err(RecsimError::DimensionMismatch {
            expected: "1 row".to_string(),
            actual: format!("{} rows", product_features.n_rows()),
        });
    }

    let (liked, features) = liked_features.shape();
    if product_features.n_cols() != features {
        debug!(
            liked_cols = features,
            product_cols = product_features.n_cols(),
            "product_similarity rejected mismatched operands"
        );
        return Err(RecsimError::dimension_mismatch(
            "product feature count",
            features,
            product_features.n_cols(),
        ));
    }

    trace!(liked, features, "product_similarity");
    Ok(Vector::from_vec(cosine_against_rows(
        liked_features,
        product_features.row_slice(0),
    )))
}

/// Scores every row of `matrix` against `reference`.
///
/// Callers have already checked `reference.len() == matrix.n_cols()`.
fn cosine_against_rows(matrix: &Matrix<f64>, reference: &[f64]) -> Vec<f64> {
    let mut result = vec![0.0; matrix.n_rows()];

    let ref_norm = norm(reference);
    if ref_norm == 0.0 {
        return result;
    }

    #[cfg(feature = "parallel")]
    result
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, out)| *out = cosine_row(reference, ref_norm, matrix.row_slice(i)));

    #[cfg(not(feature = "parallel"))]
    for (out, row) in result.iter_mut().zip(matrix.rows_iter()) {
        *out = cosine_row(reference, ref_norm, row);
    }

    result
}

#[inline]
fn cosine_row(reference: &[f64], ref_norm: f64, row: &[f64]) -> f64 {
    let (dot, norm_sq) = dot_and_norm_sq(reference, row);
    let row_norm = norm_sq.sqrt();
    if row_norm == 0.0 {
        return 0.0;
    }
    dot / (ref_norm * row_norm)
}

#[cfg(test)]
#[path = "cosine_tests.rs"]
mod tests;
