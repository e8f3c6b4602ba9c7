use nalgebra::{Matrix3, Vector3};

use crate::error::EnumError;
use crate::Result;

/// Row-major flattening of an integer matrix, used as an ordering and lookup key.
pub type MatrixKey = [i64; 9];

pub fn matrix_key(m: &Matrix3<i64>) -> MatrixKey {
    [
        m[(0, 0)],
        m[(0, 1)],
        m[(0, 2)],
        m[(1, 0)],
        m[(1, 1)],
        m[(1, 2)],
        m[(2, 0)],
        m[(2, 1)],
        m[(2, 2)],
    ]
}

pub fn from_rows(rows: &[[i64; 3]; 3]) -> Matrix3<i64> {
    Matrix3::new(
        rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
        rows[2][1], rows[2][2],
    )
}

pub fn to_rows(m: &Matrix3<i64>) -> [[i64; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

pub fn determinant(m: &Matrix3<i64>) -> i64 {
    m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
}

/// Adjugate matrix, satisfying `adjugate(m) * m == determinant(m) * I`.
pub fn adjugate(m: &Matrix3<i64>) -> Matrix3<i64> {
    let a = |i: usize, j: usize| m[(i, j)];
    Matrix3::new(
        a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1),
        -(a(0, 1) * a(2, 2) - a(0, 2) * a(2, 1)),
        a(0, 1) * a(1, 2) - a(0, 2) * a(1, 1),
        -(a(1, 0) * a(2, 2) - a(1, 2) * a(2, 0)),
        a(0, 0) * a(2, 2) - a(0, 2) * a(2, 0),
        -(a(0, 0) * a(1, 2) - a(0, 2) * a(1, 0)),
        a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0),
        -(a(0, 0) * a(2, 1) - a(0, 1) * a(2, 0)),
        a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0),
    )
}

/// Extended Euclid: returns `(g, x, y)` with `a * x + b * y == g` and `g >= 0`.
pub fn extended_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1_i64, 0_i64);
    let (mut old_t, mut t) = (0_i64, 1_i64);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }
    if old_r < 0 {
        (-old_r, -old_s, -old_t)
    } else {
        (old_r, old_s, old_t)
    }
}

/// Lower-triangular Hermite normal form `H = M * U` (`U` unimodular).
///
/// The diagonal of `H` is positive and every entry left of the diagonal lies in
/// `[0, H[(i, i)])`, so two matrices generate the same lattice exactly when their
/// Hermite normal forms are equal.
pub fn hermite_normal_form(m: &Matrix3<i64>) -> Result<Matrix3<i64>> {
    if determinant(m) == 0 {
        return Err(EnumError::SingularMatrix);
    }
    Ok(reduce_to_hnf(m))
}

/// Column reduction behind [`hermite_normal_form`]. The input must be nonsingular.
pub(crate) fn reduce_to_hnf(m: &Matrix3<i64>) -> Matrix3<i64> {
    let mut h = *m;
    for i in 0..3 {
        // Clear row i to the right of the diagonal
        for j in (i + 1)..3 {
            let a = h[(i, i)];
            let b = h[(i, j)];
            if b == 0 {
                continue;
            }
            let (g, x, y) = extended_gcd(a, b);
            let col_i: Vector3<i64> = h.column(i).into_owned();
            let col_j: Vector3<i64> = h.column(j).into_owned();
            h.set_column(i, &(col_i * x + col_j * y));
            h.set_column(j, &(col_j * (a / g) - col_i * (b / g)));
        }
        if h[(i, i)] < 0 {
            let negated: Vector3<i64> = -h.column(i).into_owned();
            h.set_column(i, &negated);
        }
        // Reduce row i to the left of the diagonal
        let d = h[(i, i)];
        if d == 0 {
            continue;
        }
        for j in 0..i {
            let q = h[(i, j)].div_euclid(d);
            if q != 0 {
                let reduced: Vector3<i64> = h.column(j).into_owned() - h.column(i).into_owned() * q;
                h.set_column(j, &reduced);
            }
        }
    }
    h
}

/// Returns `N` with `lhs * N == rhs` if such an integer matrix exists.
pub fn integer_quotient(lhs: &Matrix3<i64>, rhs: &Matrix3<i64>) -> Option<Matrix3<i64>> {
    let det = determinant(lhs);
    if det == 0 {
        return None;
    }
    let numerator = adjugate(lhs) * rhs;
    if numerator.iter().any(|x| x % det != 0) {
        return None;
    }
    Some(numerator.map(|x| x / det))
}

pub fn is_unimodular(m: &Matrix3<i64>) -> bool {
    determinant(m).abs() == 1
}
