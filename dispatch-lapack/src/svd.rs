//! Singular value decomposition with the Fortran `dgesdd` contract.
//!
//! Everything is column-major. For an `m x n` matrix A with `k = min(m, n)`:
//!
//! | job         | `s` | `u`                  | `vt`                  |
//! |-------------|-----|----------------------|-----------------------|
//! | `SvdJob::None` | k | not referenced     | not referenced        |
//! | `SvdJob::Thin` | k | m x k, `ldu >= m`  | k x n, `ldvt >= k`    |
//! | `SvdJob::All`  | k | m x m, `ldu >= m`  | n x n, `ldvt >= n`    |
//!
//! Singular values are returned in descending order. A is destroyed.
//!
//! The pure-Rust path is a one-sided (Hestenes) Jacobi SVD on the tall
//! orientation of A, with the missing left vectors completed by Gram-Schmidt.

use crate::MAX_SWEEPS;
use dispatch_core::SvdJob;

/// Double-precision SVD. `work` is only used by the system LAPACK, whose
/// `lwork` is `work.len()`; `iwork` needs `8 * min(m, n)` entries there.
pub fn dgesdd(
    job: SvdJob,
    m: usize,
    n: usize,
    a: &mut [f64],
    lda: usize,
    s: &mut [f64],
    u: &mut [f64],
    ldu: usize,
    vt: &mut [f64],
    ldvt: usize,
    work: &mut [f64],
    iwork: &mut [i32],
) -> i32 {
    #[cfg(feature = "lapack")]
    {
        let jobz = job.as_char() as std::os::raw::c_char;
        let (m, n, lda, ldu, ldvt) = (m as i32, n as i32, lda as i32, ldu as i32, ldvt as i32);
        let lwork = work.len() as i32;
        let mut info = 0i32;
        unsafe {
            dispatch_core::lapack_ffi::dgesdd_(
                &jobz,
                &m,
                &n,
                a.as_mut_ptr(),
                &lda,
                s.as_mut_ptr(),
                u.as_mut_ptr(),
                &ldu,
                vt.as_mut_ptr(),
                &ldvt,
                work.as_mut_ptr(),
                &lwork,
                iwork.as_mut_ptr(),
                &mut info,
            );
        }
        return info;
    }

    let _ = (work, iwork);
    gesdd_jacobi(job, m, n, a, lda, s, u, ldu, vt, ldvt)
}

fn gesdd_jacobi(
    job: SvdJob,
    m: usize,
    n: usize,
    a: &[f64],
    lda: usize,
    s: &mut [f64],
    u: &mut [f64],
    ldu: usize,
    vt: &mut [f64],
    ldvt: usize,
) -> i32 {
    let k = m.min(n);
    if k == 0 {
        return 0;
    }

    // Work on W = A (m >= n) or W = A^T (m < n), so W is rows x cols, rows >= cols.
    let tall = m >= n;
    let (rows, cols) = if tall { (m, n) } else { (n, m) };
    let mut w = vec![0.0f64; rows * cols];
    for j in 0..n {
        for i in 0..m {
            let v = a[j * lda + i];
            if tall {
                w[j * rows + i] = v;
            } else {
                w[i * rows + j] = v;
            }
        }
    }
    let mut v = identity(cols);

    let converged = one_sided_jacobi(&mut w, rows, cols, &mut v);
    if !converged {
        log::debug!("dgesdd: one-sided Jacobi did not converge in {MAX_SWEEPS} sweeps");
    }

    let sigma: Vec<f64> = (0..cols).map(|j| norm(&w[j * rows..(j + 1) * rows])).collect();
    let mut order: Vec<usize> = (0..cols).collect();
    order.sort_by(|&x, &y| sigma[y].total_cmp(&sigma[x]));
    for (r, &j) in order.iter().enumerate() {
        s[r] = sigma[j];
    }

    if job.wants_vectors() {
        // Left vectors of W: rows x cols, zero where sigma vanishes.
        let tiny = sigma[order[0]] * f64::EPSILON * rows as f64;
        let mut left = vec![0.0f64; rows * cols];
        let mut right = vec![0.0f64; cols * cols];
        for (r, &j) in order.iter().enumerate() {
            if sigma[j] > tiny && sigma[j] > 0.0 {
                for i in 0..rows {
                    left[r * rows + i] = w[j * rows + i] / sigma[j];
                }
            }
            right[r * cols..(r + 1) * cols].copy_from_slice(&v[j * cols..(j + 1) * cols]);
        }
        let left_cols = if job == SvdJob::All { rows } else { cols };
        let left = complete_basis(left, rows, cols, left_cols);

        // A = U S V^T. For the wide case A^T = left S right^T, so U and V swap.
        let (umat, vmat) = if tall { (&left, &right) } else { (&right, &left) };
        let ucols = if job == SvdJob::All { m } else { k };
        let vtrows = if job == SvdJob::All { n } else { k };
        for j in 0..ucols {
            for i in 0..m {
                u[j * ldu + i] = umat[j * m + i];
            }
        }
        for i in 0..vtrows {
            for j in 0..n {
                vt[j * ldvt + i] = vmat[i * n + j];
            }
        }
    }

    if converged {
        0
    } else {
        1
    }
}

/// Orthogonalize the columns of `w` (rows x cols, column-major) by plane
/// rotations, accumulating them into `v` (cols x cols).
fn one_sided_jacobi(w: &mut [f64], rows: usize, cols: usize, v: &mut [f64]) -> bool {
    let tol = f64::EPSILON * rows as f64;
    // Columns with squared norm below this are numerically zero.
    let floor = w.iter().map(|x| x * x).sum::<f64>() * f64::EPSILON * f64::EPSILON;
    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;
        for p in 0..cols {
            for q in (p + 1)..cols {
                let (mut alpha, mut beta, mut gamma) = (0.0, 0.0, 0.0);
                for i in 0..rows {
                    let (wp, wq) = (w[p * rows + i], w[q * rows + i]);
                    alpha += wp * wp;
                    beta += wq * wq;
                    gamma += wp * wq;
                }
                if alpha <= floor || beta <= floor {
                    continue;
                }
                if gamma == 0.0 || gamma.abs() <= tol * (alpha * beta).sqrt() {
                    continue;
                }
                rotated = true;
                let (c, s) = rotation(alpha, beta, gamma);
                rotate(w, rows, p, q, c, s);
                rotate(v, cols, p, q, c, s);
            }
        }
        if !rotated {
            return true;
        }
    }
    false
}

/// Cosine and sine of the rotation that zeroes the off-diagonal of the
/// symmetric 2x2 `[[alpha, gamma], [gamma, beta]]`.
#[inline]
pub(crate) fn rotation(alpha: f64, beta: f64, gamma: f64) -> (f64, f64) {
    let zeta = (beta - alpha) / (2.0 * gamma);
    let t = if zeta.abs() > 1e150 {
        0.5 / zeta
    } else {
        zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt())
    };
    let c = 1.0 / (1.0 + t * t).sqrt();
    (c, c * t)
}

/// Columns p, q of a column-major `len`-row matrix: (p, q) <- (c p - s q, s p + c q).
#[inline]
fn rotate(x: &mut [f64], len: usize, p: usize, q: usize, c: f64, s: f64) {
    for i in 0..len {
        let (xp, xq) = (x[p * len + i], x[q * len + i]);
        x[p * len + i] = c * xp - s * xq;
        x[q * len + i] = s * xp + c * xq;
    }
}

fn identity(n: usize) -> Vec<f64> {
    let mut id = vec![0.0f64; n * n];
    for i in 0..n {
        id[i * n + i] = 1.0;
    }
    id
}

#[inline]
fn norm(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Extend `basis` (rows x have, column-major, orthonormal apart from zero
/// columns) to `want` orthonormal columns. Zero columns are replaced and new
/// ones appended, both by orthogonalizing unit vectors e_0, e_1, ...
fn complete_basis(mut basis: Vec<f64>, rows: usize, have: usize, want: usize) -> Vec<f64> {
    basis.resize(rows * want, 0.0);
    // A unit vector with residual below this is too close to the span; one
    // with residual >= sqrt(1 / rows) always exists while the span is short.
    let accept = 0.5 / (rows as f64).sqrt();
    let mut candidate = 0;
    for col in 0..want {
        let filled = col < have && norm(&basis[col * rows..(col + 1) * rows]) > 0.5;
        if filled {
            continue;
        }
        while candidate < rows {
            let mut e = vec![0.0f64; rows];
            e[candidate] = 1.0;
            candidate += 1;
            // Two passes of classical Gram-Schmidt against every filled column.
            for _ in 0..2 {
                for other in 0..want {
                    if other == col {
                        continue;
                    }
                    let b = &basis[other * rows..(other + 1) * rows];
                    let proj: f64 = b.iter().zip(&e).map(|(x, y)| x * y).sum();
                    for i in 0..rows {
                        e[i] -= proj * b[i];
                    }
                }
            }
            let len = norm(&e);
            if len >= accept {
                for i in 0..rows {
                    basis[col * rows + i] = e[i] / len;
                }
                break;
            }
        }
    }
    basis
}
