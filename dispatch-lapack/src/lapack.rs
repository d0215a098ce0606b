//! LU factorization with partial pivoting: P * A = L * U.
//!
//! - A is overwritten with L (unit lower, diagonal not stored) and U (upper).
//! - `ipiv` receives `min(m, n)` pivot indices, 1-based: row `i` was
//!   interchanged with row `ipiv[i] - 1`.
//!
//! Returns 0 on success, `k > 0` if `U[k-1][k-1]` is exactly zero. As in
//! LAPACK the factorization still completes in that case.

use dispatch_core::layout::Layout;
use dispatch_core::{Complex64, Scalar};

// ============================================================================
// DGETRF / ZGETRF: LAPACKE entry points
// ============================================================================

/// Double-precision LU factorization.
pub fn dgetrf(
    layout: Layout,
    m: usize,
    n: usize,
    a: &mut [f64],
    lda: usize,
    ipiv: &mut [i32],
) -> i32 {
    #[cfg(feature = "lapack")]
    {
        return unsafe {
            dispatch_core::lapack_ffi::LAPACKE_dgetrf(
                layout as i32,
                m as i32,
                n as i32,
                a.as_mut_ptr(),
                lda as i32,
                ipiv.as_mut_ptr(),
            )
        };
    }

    getrf(layout, m, n, a, lda, ipiv)
}

/// Double-complex LU factorization.
pub fn zgetrf(
    layout: Layout,
    m: usize,
    n: usize,
    a: &mut [Complex64],
    lda: usize,
    ipiv: &mut [i32],
) -> i32 {
    #[cfg(feature = "lapack")]
    {
        return unsafe {
            dispatch_core::lapack_ffi::LAPACKE_zgetrf(
                layout as i32,
                m as i32,
                n as i32,
                a.as_mut_ptr(),
                lda as i32,
                ipiv.as_mut_ptr(),
            )
        };
    }

    getrf(layout, m, n, a, lda, ipiv)
}

/// Pure-Rust right-looking LU over any [`Scalar`].
pub fn getrf<T: Scalar>(
    layout: Layout,
    m: usize,
    n: usize,
    a: &mut [T],
    lda: usize,
    ipiv: &mut [i32],
) -> i32 {
    let mut info = 0;

    for k in 0..m.min(n) {
        let (max_idx, max_val) = pivot_search(a, layout, k, m, lda);

        ipiv[k] = (max_idx + 1) as i32;

        if max_val == 0.0 {
            // Column below the diagonal is zero: nothing to eliminate.
            if info == 0 {
                info = (k + 1) as i32;
            }
            continue;
        }

        if max_idx != k {
            swap_rows(a, layout, k, max_idx, n, lda);
        }

        let pivot = a[layout.index(k, k, lda)];
        for i in (k + 1)..m {
            let idx = layout.index(i, k, lda);
            a[idx] = a[idx] / pivot;
        }

        trailing_update(a, layout, k, m, n, lda);
    }

    info
}

// ============================================================================
// LU helpers
// ============================================================================

/// Pivot search: first index of max |re| + |im| of A[i, col] for i in col..m.
#[inline]
fn pivot_search<T: Scalar>(
    a: &[T],
    layout: Layout,
    col: usize,
    m: usize,
    lda: usize,
) -> (usize, f64) {
    let mut max_idx = col;
    let mut max_val = 0.0f64;
    for i in col..m {
        let val = a[layout.index(i, col, lda)].abs1();
        if val > max_val {
            max_val = val;
            max_idx = i;
        }
    }
    (max_idx, max_val)
}

/// Interchange full rows `r1` and `r2` (all `n` columns).
#[inline]
fn swap_rows<T: Scalar>(a: &mut [T], layout: Layout, r1: usize, r2: usize, n: usize, lda: usize) {
    match layout {
        Layout::RowMajor => {
            let (lo, hi) = if r1 < r2 { (r1, r2) } else { (r2, r1) };
            let (head, tail) = a.split_at_mut(hi * lda);
            head[lo * lda..lo * lda + n].swap_with_slice(&mut tail[..n]);
        }
        Layout::ColMajor => {
            for j in 0..n {
                a.swap(j * lda + r1, j * lda + r2);
            }
        }
    }
}

/// Rank-1 update of the trailing submatrix: A[i,j] -= A[i,k] * A[k,j].
#[inline]
fn trailing_update<T: Scalar>(
    a: &mut [T],
    layout: Layout,
    k: usize,
    m: usize,
    n: usize,
    lda: usize,
) {
    for i in (k + 1)..m {
        let l = a[layout.index(i, k, lda)];
        if l == T::ZERO {
            continue;
        }
        for j in (k + 1)..n {
            let kj = a[layout.index(k, j, lda)];
            let idx = layout.index(i, j, lda);
            a[idx] = a[idx] - l * kj;
        }
    }
}
