//! Symmetric eigendecomposition with the LAPACKE `dsyevd` contract.
//!
//! Only the `uplo` triangle of the `n x n` matrix A is read. Eigenvalues land
//! in `w` in ascending order; with `jobz = 'V'` A is overwritten by the
//! orthonormal eigenvectors, eigenvector `j` in column `j`.
//!
//! The pure-Rust path is the cyclic Jacobi method.

use crate::svd::rotation;
use crate::MAX_SWEEPS;
use dispatch_core::layout::{Layout, Uplo};

/// `lwork` the system `dsyevd` needs for `jobz = 'V'`: `1 + 6n + 2n^2`.
pub fn dsyevd_lwork(n: usize) -> usize {
    1 + 6 * n + 2 * n * n
}

/// `liwork` the system `dsyevd` needs for `jobz = 'V'`: `3 + 5n`.
pub fn dsyevd_liwork(n: usize) -> usize {
    3 + 5 * n
}

/// Double-precision symmetric eigendecomposition.
///
/// `jobz` is `b'V'` (values and vectors) or `b'N'` (values only); anything
/// else returns `-2`, the LAPACK illegal-argument code for that position.
/// `work`/`iwork` are only used by the system LAPACK.
pub fn dsyevd(
    layout: Layout,
    jobz: u8,
    uplo: Uplo,
    n: usize,
    a: &mut [f64],
    lda: usize,
    w: &mut [f64],
    work: &mut [f64],
    iwork: &mut [i32],
) -> i32 {
    if jobz != b'V' && jobz != b'N' {
        return -2;
    }

    #[cfg(feature = "lapack")]
    {
        return unsafe {
            dispatch_core::lapack_ffi::LAPACKE_dsyevd_work(
                layout as i32,
                jobz,
                uplo.as_char(),
                n as i32,
                a.as_mut_ptr(),
                lda as i32,
                w.as_mut_ptr(),
                work.as_mut_ptr(),
                work.len() as i32,
                iwork.as_mut_ptr(),
                iwork.len() as i32,
            )
        };
    }

    let _ = (work, iwork);
    syevd_jacobi(layout, jobz == b'V', uplo, n, a, lda, w)
}

fn syevd_jacobi(
    layout: Layout,
    vectors: bool,
    uplo: Uplo,
    n: usize,
    a: &mut [f64],
    lda: usize,
    w: &mut [f64],
) -> i32 {
    if n == 0 {
        return 0;
    }

    // Dense symmetric copy (row-major, ld = n) from the referenced triangle.
    let mut s = vec![0.0f64; n * n];
    for i in 0..n {
        for j in 0..n {
            let referenced = match uplo {
                Uplo::Lower => j <= i,
                Uplo::Upper => j >= i,
            };
            if referenced {
                let v = a[layout.index(i, j, lda)];
                s[i * n + j] = v;
                s[j * n + i] = v;
            }
        }
    }
    // Eigenvectors accumulate as columns; stored column-major, ld = n.
    let mut v = vec![0.0f64; n * n];
    for i in 0..n {
        v[i * n + i] = 1.0;
    }

    let norm = s.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mut converged = false;
    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .map(|(p, q)| s[p * n + q] * s[p * n + q])
            .sum::<f64>()
            .sqrt();
        if off <= f64::EPSILON * norm {
            converged = true;
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                let apq = s[p * n + q];
                if apq == 0.0 {
                    continue;
                }
                let (app, aqq) = (s[p * n + p], s[q * n + q]);
                // Below the resolution of both diagonal entries: drop it.
                let g = 100.0 * apq.abs();
                if app.abs() + g == app.abs() && aqq.abs() + g == aqq.abs() {
                    s[p * n + q] = 0.0;
                    s[q * n + p] = 0.0;
                    continue;
                }
                let (c, sn) = rotation(app, aqq, apq);
                // S <- J^T S J
                for k in 0..n {
                    let (kp, kq) = (s[k * n + p], s[k * n + q]);
                    s[k * n + p] = c * kp - sn * kq;
                    s[k * n + q] = sn * kp + c * kq;
                }
                for k in 0..n {
                    let (pk, qk) = (s[p * n + k], s[q * n + k]);
                    s[p * n + k] = c * pk - sn * qk;
                    s[q * n + k] = sn * pk + c * qk;
                }
                s[p * n + q] = 0.0;
                s[q * n + p] = 0.0;
                for k in 0..n {
                    let (kp, kq) = (v[p * n + k], v[q * n + k]);
                    v[p * n + k] = c * kp - sn * kq;
                    v[q * n + k] = sn * kp + c * kq;
                }
            }
        }
    }
    if !converged {
        log::debug!("dsyevd: cyclic Jacobi did not converge in {MAX_SWEEPS} sweeps");
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| s[x * n + x].total_cmp(&s[y * n + y]));
    for (r, &j) in order.iter().enumerate() {
        w[r] = s[j * n + j];
    }
    if vectors {
        for (r, &j) in order.iter().enumerate() {
            for i in 0..n {
                a[layout.index(i, r, lda)] = v[j * n + i];
            }
        }
    }

    if converged {
        0
    } else {
        // LAPACK reports the number of unconverged off-diagonal elements;
        // all we know is that some remain.
        1
    }
}
