// =========================================================================
// FALSIFY-SIM: similarity kernel contract
//
//   - cosine is scale invariant in the reference vector
//   - self-similarity of a nonzero row is 1
//   - zero vectors and zero rows score 0, never NaN
//   - cosine scores stay within [-1, 1]
//   - batch dot product equals a direct reduction
//   - output shapes follow the operand shapes, including empty operands
//   - mismatched shapes are rejected by every kernel
//   - repeated calls are bit-identical
//   - the parallel row split matches a sequential sweep
// =========================================================================

use super::*;
use crate::error::RecsimError;
use crate::primitives::{Matrix, Vector};

fn sample_matrix() -> Matrix<f64> {
    Matrix::from_rows(&[
        vec![1.0, -2.0, 3.0, 0.5],
        vec![0.0, 0.0, 0.0, 0.0],
        vec![4.0, 4.0, -1.0, 2.0],
        vec![-0.001, 0.002, -0.003, 0.0],
        vec![100.0, -200.0, 300.0, 50.0],
    ])
    .expect("rows have equal length")
}

/// FALSIFY-SIM-001: cosine(c * v, M) == cosine(v, M) for c > 0
#[test]
fn falsify_sim_001_scale_invariance() {
    let m = sample_matrix();
    let v = Vector::from_slice(&[0.3, 1.7, -2.0, 0.9]);
    let base = user_similarity(&m, &v).expect("P matches");

    for c in [0.5, 2.0, 1e3, 1e-3] {
        let scaled = user_similarity(&m, &v.mul_scalar(c)).expect("P matches");
        for i in 0..base.len() {
            assert!(
                (scaled[i] - base[i]).abs() < 1e-12,
                "FALSIFIED SIM-001: c={c}, row {i}: {} != {}",
                scaled[i],
                base[i]
            );
        }
    }
}

/// FALSIFY-SIM-002: user_similarity(M, M[i])[i] == 1 for nonzero rows
#[test]
fn falsify_sim_002_self_similarity() {
    let m = sample_matrix();
    for i in [0, 2, 3, 4] {
        let sims = user_similarity(&m, &m.row(i)).expect("P matches");
        assert!(
            (sims[i] - 1.0).abs() < 1e-9,
            "FALSIFIED SIM-002: self-similarity of row {i} = {}",
            sims[i]
        );
    }
}

/// FALSIFY-SIM-003: zero reference gives all zeros, zero matrix row gives 0
#[test]
fn falsify_sim_003_zero_vector_handling() {
    let m = sample_matrix();
    let sims = user_similarity(&m, &Vector::zeros(4)).expect("P matches");
    assert!(
        sims.iter().all(|&s| s == 0.0),
        "FALSIFIED SIM-003: zero reference produced {sims:?}"
    );

    let single = user_similarity(&Matrix::zeros(1, 4), &Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]))
        .expect("P matches");
    assert_eq!(
        single.as_slice(),
        &[0.0],
        "FALSIFIED SIM-003: zero row scored {single:?}"
    );

    let products = product_similarity(&m, &Matrix::zeros(1, 4)).expect("one row");
    assert!(
        products.iter().all(|&s| s == 0.0),
        "FALSIFIED SIM-003: zero product reference produced {products:?}"
    );
}

/// FALSIFY-SIM-004: every cosine score lies in [-1, 1]
#[test]
fn falsify_sim_004_range_bound() {
    let m = sample_matrix();
    for i in 0..m.n_rows() {
        let reference = m.row(i);
        let users = user_similarity(&m, &reference).expect("P matches");
        let products = product_similarity(&m, &reference.to_row_matrix()).expect("one row");
        for (j, (&u, &p)) in users.iter().zip(products.iter()).enumerate() {
            assert!(
                (-1.0 - 1e-12..=1.0 + 1e-12).contains(&u),
                "FALSIFIED SIM-004: user cosine(r{i}, r{j}) = {u}"
            );
            assert!(
                (-1.0 - 1e-12..=1.0 + 1e-12).contains(&p),
                "FALSIFIED SIM-004: product cosine(r{i}, r{j}) = {p}"
            );
        }
    }
}

/// FALSIFY-SIM-005: batch_dot_product(A, B)[i][j] == dot(A[i], B[j])
#[test]
fn falsify_sim_005_batch_dot_matches_reduction() {
    let a = sample_matrix();
    let b = Matrix::from_rows(&[vec![1.0, 1.0, 1.0, 1.0], vec![0.5, -0.25, 2.0, 8.0]])
        .expect("2x4");
    let table = batch_dot_product(&a, &b).expect("shared column count");

    for i in 0..a.n_rows() {
        for j in 0..b.n_rows() {
            let expected = a.row(i).dot(&b.row(j));
            assert_eq!(
                table.get(i, j).to_bits(),
                expected.to_bits(),
                "FALSIFIED SIM-005: cell ({i},{j}) = {} != {expected}",
                table.get(i, j)
            );
        }
    }
}

/// FALSIFY-SIM-006: output shapes follow the shape table
#[test]
fn falsify_sim_006_shape_propagation() {
    for (u, p) in [(0, 3), (3, 0), (0, 0), (7, 2)] {
        let sims = user_similarity(&Matrix::zeros(u, p), &Vector::zeros(p)).expect("P matches");
        assert_eq!(sims.len(), u, "FALSIFIED SIM-006: user ({u}x{p})");

        let liked = product_similarity(&Matrix::zeros(u, p), &Matrix::zeros(1, p)).expect("one row");
        assert_eq!(liked.len(), u, "FALSIFIED SIM-006: product ({u}x{p})");
    }

    for (n, k, m) in [(0, 4, 3), (4, 0, 3), (2, 3, 0), (0, 0, 0), (3, 5, 2)] {
        let table =
            batch_dot_product(&Matrix::zeros(n, m), &Matrix::zeros(k, m)).expect("shared M");
        assert_eq!(
            table.shape(),
            (n, k),
            "FALSIFIED SIM-006: batch ({n}x{m}) . ({k}x{m})"
        );
    }
}

/// FALSIFY-SIM-007: mismatched shapes are rejected by every kernel
#[test]
fn falsify_sim_007_dimension_mismatch_rejected() {
    let m = sample_matrix();
    let rejected = [
        user_similarity(&m, &Vector::zeros(3)).map(|_| ()),
        product_similarity(&m, &Matrix::zeros(1, 5)).map(|_| ()),
        product_similarity(&m, &Matrix::zeros(3, 4)).map(|_| ()),
        batch_dot_product(&m, &Matrix::zeros(2, 2)).map(|_| ()),
    ];
    for (i, result) in rejected.iter().enumerate() {
        assert!(
            matches!(result, Err(RecsimError::DimensionMismatch { .. })),
            "FALSIFIED SIM-007: case {i} returned {result:?}"
        );
    }
}

/// FALSIFY-SIM-008: identical inputs give bit-identical outputs
#[test]
fn falsify_sim_008_determinism() {
    let m = sample_matrix();
    let v = Vector::from_slice(&[0.1, 0.2, 0.3, 0.4]);

    let first = user_similarity(&m, &v).expect("P matches");
    let first_table = batch_dot_product(&m, &m).expect("shared M");
    for _ in 0..10 {
        let again = user_similarity(&m, &v).expect("P matches");
        let bits: Vec<u64> = again.iter().map(|x| x.to_bits()).collect();
        let expected: Vec<u64> = first.iter().map(|x| x.to_bits()).collect();
        assert_eq!(bits, expected, "FALSIFIED SIM-008: user_similarity drifted");

        let table = batch_dot_product(&m, &m).expect("shared M");
        assert!(
            table
                .as_slice()
                .iter()
                .zip(first_table.as_slice())
                .all(|(a, b)| a.to_bits() == b.to_bits()),
            "FALSIFIED SIM-008: batch_dot_product drifted"
        );
    }
}

/// FALSIFY-SIM-009: the rayon row split matches a single-threaded sweep bit for bit
#[cfg(feature = "parallel")]
#[test]
fn falsify_sim_009_parallel_matches_sequential() {
    // enough rows that rayon actually splits the work
    let rows: Vec<Vec<f64>> = (0..512)
        .map(|i| {
            (0..7)
                .map(|j| {
                    if i % 17 == 0 {
                        0.0
                    } else {
                        ((i * 31 + j * 7) % 23) as f64 * 0.137 - 1.5
                    }
                })
                .collect()
        })
        .collect();
    let m = Matrix::from_rows(&rows).expect("rows have equal length");
    let reference = [0.3, -1.2, 2.5, 0.0, 0.7, -0.4, 1.1];

    let ref_norm = norm(&reference);
    let sequential: Vec<u64> = m
        .rows_iter()
        .map(|row| {
            let (dot, norm_sq) = dot_and_norm_sq(&reference, row);
            let row_norm = norm_sq.sqrt();
            if row_norm == 0.0 {
                0.0_f64
            } else {
                dot / (ref_norm * row_norm)
            }
        })
        .map(f64::to_bits)
        .collect();

    let users = user_similarity(&m, &Vector::from_slice(&reference)).expect("P matches");
    let user_bits: Vec<u64> = users.iter().map(|x| x.to_bits()).collect();
    assert_eq!(user_bits, sequential, "FALSIFIED SIM-009: user_similarity");

    let product = Matrix::from_rows(&[reference.to_vec()]).expect("1xF");
    let products = product_similarity(&m, &product).expect("F matches");
    let product_bits: Vec<u64> = products.iter().map(|x| x.to_bits()).collect();
    assert_eq!(product_bits, sequential, "FALSIFIED SIM-009: product_similarity");

    let b = Matrix::from_rows(&rows[..40]).expect("rows have equal length");
    let table = batch_dot_product(&m, &b).expect("shared M");
    assert_eq!(table.shape(), (512, 40));
    for (i, a_row) in m.rows_iter().enumerate() {
        for (j, b_row) in b.rows_iter().enumerate() {
            assert_eq!(
                table.get(i, j).to_bits(),
                row_dot(a_row, b_row).to_bits(),
                "FALSIFIED SIM-009: batch_dot_product cell ({i}, {j})"
            );
        }
    }
}
