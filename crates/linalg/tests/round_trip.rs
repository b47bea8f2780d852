use approx::assert_abs_diff_eq;
use ndarray::Array2;
use upcycle_linalg::{LinalgError, invert, multiply};

/// Upper-triangular `I - Q` for a transient block whose rows keep `keep` on
/// the diagonal and spread `spill` geometrically over the levels above.
fn fundamental_operand(n: usize, keep: f64, spill: f64) -> Array2<f64> {
    let mut m = Array2::<f64>::eye(n);
    for i in 0..n {
        m[[i, i]] -= keep;
        let mut mass = spill;
        for j in (i + 1)..n {
            m[[i, j]] -= mass;
            mass *= 0.1;
        }
    }
    m
}

// ---------------------------------------------------------------------------
// 1. inverse_round_trip_sizes
// ---------------------------------------------------------------------------
#[test]
fn inverse_round_trip_sizes() {
    for n in 1..=10 {
        let m = fundamental_operand(n, 0.225, 0.0225);
        let inv = invert(&m).expect("upper-triangular operand is invertible");
        let prod = multiply(&m, &inv).unwrap();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(prod[[i, j]], expected, epsilon = 1e-12);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 2. inverse_entries_non_negative
// ---------------------------------------------------------------------------
#[test]
fn inverse_entries_non_negative() {
    // (I - Q)^-1 = I + Q + Q^2 + ... is entrywise non-negative for Q >= 0.
    let inv = invert(&fundamental_operand(6, 0.5, 0.3)).unwrap();
    assert!(inv.iter().all(|&x| x >= 0.0), "inverse: {inv:?}");
}

// ---------------------------------------------------------------------------
// 3. product_associative
// ---------------------------------------------------------------------------
#[test]
fn product_associative() {
    let a = fundamental_operand(4, 0.1, 0.2);
    let b = fundamental_operand(4, 0.3, 0.05);
    let c = fundamental_operand(4, 0.7, 0.01);
    let left = multiply(&multiply(&a, &b).unwrap(), &c).unwrap();
    let right = multiply(&a, &multiply(&b, &c).unwrap()).unwrap();
    for (l, r) in left.iter().zip(right.iter()) {
        assert_abs_diff_eq!(*l, *r, epsilon = 1e-12);
    }
}

// ---------------------------------------------------------------------------
// 4. errors_propagate
// ---------------------------------------------------------------------------
#[test]
fn errors_propagate() {
    let singular = fundamental_operand(3, 1.0, 0.1);
    assert!(matches!(
        invert(&singular),
        Err(LinalgError::SingularMatrix { row: 2, .. })
    ));

    let a = Array2::<f64>::eye(3);
    let b = Array2::<f64>::eye(4);
    assert!(matches!(
        multiply(&a, &b),
        Err(LinalgError::DimensionMismatch {
            left_cols: 3,
            right_rows: 4
        })
    ));
}
