//! BLAS Level 3: triangular solve with multiple right-hand sides.
//!
//! op(A) * X = alpha * B  or  X * op(A) = alpha * B, B overwritten with X.
//!
//! Only the `uplo` triangle of A is read. With `Diag::Unit` the diagonal is
//! not read either and is taken to be one.

use dispatch_core::layout::{Diag, Layout, Side, Transpose, Uplo};
use dispatch_core::{Complex64, Scalar};

// ============================================================================
// DTRSM / ZTRSM: CBLAS entry points
// ============================================================================

/// Double-precision TRSM.
pub fn dtrsm(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &mut [f64],
    ldb: usize,
) {
    #[cfg(feature = "lapack")]
    {
        unsafe {
            dispatch_core::lapack_ffi::cblas_dtrsm(
                layout as i32,
                side as i32,
                uplo as i32,
                trans as i32,
                diag as i32,
                m as i32,
                n as i32,
                alpha,
                a.as_ptr(),
                lda as i32,
                b.as_mut_ptr(),
                ldb as i32,
            );
        }
        return;
    }

    trsm(layout, side, uplo, trans, diag, m, n, alpha, a, lda, b, ldb);
}

/// Double-complex TRSM. `Transpose::ConjTrans` conjugates A.
pub fn ztrsm(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: Complex64,
    a: &[Complex64],
    lda: usize,
    b: &mut [Complex64],
    ldb: usize,
) {
    #[cfg(feature = "lapack")]
    {
        use std::os::raw::c_void;
        unsafe {
            dispatch_core::lapack_ffi::cblas_ztrsm(
                layout as i32,
                side as i32,
                uplo as i32,
                trans as i32,
                diag as i32,
                m as i32,
                n as i32,
                &alpha as *const Complex64 as *const c_void,
                a.as_ptr() as *const c_void,
                lda as i32,
                b.as_mut_ptr() as *mut c_void,
                ldb as i32,
            );
        }
        return;
    }

    trsm(layout, side, uplo, trans, diag, m, n, alpha, a, lda, b, ldb);
}

// ============================================================================
// Generic substitution kernel
// ============================================================================

/// Pure-Rust TRSM over any [`Scalar`].
///
/// B is `m x n`. A is `m x m` for `Side::Left` and `n x n` for `Side::Right`.
pub fn trsm<T: Scalar>(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) {
    let unit = diag == Diag::Unit;

    if alpha != T::ONE {
        for i in 0..m {
            for j in 0..n {
                let idx = layout.index(i, j, ldb);
                b[idx] = alpha * b[idx];
            }
        }
    }

    // op(A)[i, j]
    let op = |i: usize, j: usize| -> T {
        match trans {
            Transpose::NoTrans => a[layout.index(i, j, lda)],
            Transpose::Trans => a[layout.index(j, i, lda)],
            Transpose::ConjTrans => a[layout.index(j, i, lda)].conj(),
        }
    };
    // Transposing flips which triangle op(A) occupies.
    let lower = (uplo == Uplo::Lower) == (trans == Transpose::NoTrans);

    match side {
        Side::Left => {
            for j in 0..n {
                if lower {
                    // Forward substitution: L * x = b
                    for i in 0..m {
                        let mut sum = b[layout.index(i, j, ldb)];
                        for p in 0..i {
                            sum = sum - op(i, p) * b[layout.index(p, j, ldb)];
                        }
                        b[layout.index(i, j, ldb)] = if unit { sum } else { sum / op(i, i) };
                    }
                } else {
                    // Back substitution: U * x = b
                    for i in (0..m).rev() {
                        let mut sum = b[layout.index(i, j, ldb)];
                        for p in (i + 1)..m {
                            sum = sum - op(i, p) * b[layout.index(p, j, ldb)];
                        }
                        b[layout.index(i, j, ldb)] = if unit { sum } else { sum / op(i, i) };
                    }
                }
            }
        }
        Side::Right => {
            // Row r of X solves x * op(A) = b, column by column.
            for r in 0..m {
                if lower {
                    for j in (0..n).rev() {
                        let mut sum = b[layout.index(r, j, ldb)];
                        for p in (j + 1)..n {
                            sum = sum - b[layout.index(r, p, ldb)] * op(p, j);
                        }
                        b[layout.index(r, j, ldb)] = if unit { sum } else { sum / op(j, j) };
                    }
                } else {
                    for j in 0..n {
                        let mut sum = b[layout.index(r, j, ldb)];
                        for p in 0..j {
                            sum = sum - b[layout.index(r, p, ldb)] * op(p, j);
                        }
                        b[layout.index(r, j, ldb)] = if unit { sum } else { sum / op(j, j) };
                    }
                }
            }
        }
    }
}
