//! Exported C entry points.
//!
//! ```c
//! void lapack_dgesdd(void **inputs, void **outputs);
//! ```
//!
//! Each symbol decodes its frame and runs the batched handler against
//! [`Lapacke`]. Frame layouts are documented on the types in
//! [`crate::frame`].

use std::ffi::c_void;

use crate::frame::{EighFrame, LuFrame, SvdFrame, TrsmFrame};
use crate::kernels;
use crate::native::Lapacke;

// ============================================================================
// LAPACK
// ============================================================================

/// Batched `dgesdd`. Outputs: `A, s, vt, u, status, iwork, work`.
///
/// # Safety
/// `inputs`/`outputs` must follow the [`SvdFrame`] layout and every buffer
/// must be sized for the batch.
#[no_mangle]
pub unsafe extern "C" fn lapack_dgesdd(inputs: *mut *mut c_void, outputs: *mut *mut c_void) {
    kernels::dgesdd(&mut Lapacke, SvdFrame::decode(inputs, outputs));
}

/// Batched `dsyevd` with eigenvectors.
///
/// # Safety
/// `inputs`/`outputs` must follow the [`EighFrame`] layout and every buffer
/// must be sized for the batch.
#[no_mangle]
pub unsafe extern "C" fn lapack_dsyevd(inputs: *mut *mut c_void, outputs: *mut *mut c_void) {
    kernels::dsyevd(&mut Lapacke, EighFrame::decode(inputs, outputs));
}

/// Batched `dgetrf`.
///
/// # Safety
/// `inputs`/`outputs` must follow the [`LuFrame`] layout with `f64` data.
#[no_mangle]
pub unsafe extern "C" fn lapack_dgetrf(inputs: *mut *mut c_void, outputs: *mut *mut c_void) {
    kernels::dgetrf(&mut Lapacke, LuFrame::decode(inputs, outputs));
}

/// Batched `zgetrf`.
///
/// # Safety
/// `inputs`/`outputs` must follow the [`LuFrame`] layout with interleaved
/// complex data.
#[no_mangle]
pub unsafe extern "C" fn lapack_zgetrf(inputs: *mut *mut c_void, outputs: *mut *mut c_void) {
    kernels::zgetrf(&mut Lapacke, LuFrame::decode(inputs, outputs));
}

// ============================================================================
// BLAS
// ============================================================================

/// Batched `dtrsm`.
///
/// # Safety
/// `inputs`/`outputs` must follow the [`TrsmFrame`] layout with `f64` data.
/// B must be square (`m == n`): its row stride is taken to be `m`.
#[no_mangle]
pub unsafe extern "C" fn blas_dtrsm(inputs: *mut *mut c_void, outputs: *mut *mut c_void) {
    kernels::dtrsm(&mut Lapacke, TrsmFrame::decode(inputs, outputs));
}

/// Batched `ztrsm`.
///
/// # Safety
/// `inputs`/`outputs` must follow the [`TrsmFrame`] layout with interleaved
/// complex data. B must be square (`m == n`): its row stride is taken to be
/// `m`.
#[no_mangle]
pub unsafe extern "C" fn blas_ztrsm(inputs: *mut *mut c_void, outputs: *mut *mut c_void) {
    kernels::ztrsm(&mut Lapacke, TrsmFrame::decode(inputs, outputs));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::EncodedArgs;
    use crate::shape::EighShape;
    use approx::assert_abs_diff_eq;
    use dispatch_core::Complex64;

    fn identity(n: usize) -> Vec<f64> {
        let mut out = vec![0.0; n * n];
        for i in 0..n {
            out[i * n + i] = 1.0;
        }
        out
    }

    /// Every entry is 0 or +-1 and every row and column holds exactly one
    /// non-zero: a signed permutation.
    fn assert_signed_permutation(q: &[f64], n: usize) {
        for i in 0..n {
            let row = (0..n).filter(|&j| q[i * n + j].abs() > 0.5).count();
            let col = (0..n).filter(|&j| q[j * n + i].abs() > 0.5).count();
            assert_eq!((row, col), (1, 1), "{q:?}");
        }
        for &x in q {
            assert!(x.abs() < 1e-12 || (x.abs() - 1.0).abs() < 1e-12, "{q:?}");
        }
    }

    #[test]
    fn test_dgesdd_identity_batch() {
        let (b, m, n) = (2usize, 3usize, 3usize);
        let (mut full, mut uv, mut bb, mut mm, mut nn) = (1i32, 1i32, b as i32, m as i32, n as i32);
        let mut lwork = 4 * (m * n) as i32 + 64;
        let mut a_in: Vec<f64> = (0..b).flat_map(|_| identity(n)).collect();
        let mut a = vec![0.0; b * m * n];
        let mut s = vec![0.0; b * n];
        let mut vt = vec![f64::NAN; b * n * n];
        let mut u = vec![f64::NAN; b * m * m];
        let mut info = vec![-1i32; b];
        let mut iwork = vec![0i32; 8 * n];
        let mut work = vec![0.0; lwork as usize];

        let mut inputs = EncodedArgs::new();
        inputs
            .push(&mut full as *mut i32, 0)
            .push(&mut uv as *mut i32, 0)
            .push(&mut bb as *mut i32, 0)
            .push(&mut mm as *mut i32, 0)
            .push(&mut nn as *mut i32, 0)
            .push(&mut lwork as *mut i32, 0)
            .push(a_in.as_mut_ptr(), 3);
        let mut outputs = EncodedArgs::new();
        outputs
            .push(a.as_mut_ptr(), 3)
            .push(s.as_mut_ptr(), 2)
            .push(vt.as_mut_ptr(), 3)
            .push(u.as_mut_ptr(), 3)
            .push(info.as_mut_ptr(), 1)
            .push(iwork.as_mut_ptr(), 1)
            .push(work.as_mut_ptr(), 1);

        unsafe { lapack_dgesdd(inputs.as_mut_ptr(), outputs.as_mut_ptr()) };

        assert_eq!(info, vec![0, 0]);
        for x in &s {
            assert_abs_diff_eq!(*x, 1.0, epsilon = 1e-12);
        }
        for i in 0..b {
            assert_signed_permutation(&u[i * m * m..(i + 1) * m * m], m);
            assert_signed_permutation(&vt[i * n * n..(i + 1) * n * n], n);
        }
    }

    #[test]
    fn test_dgesdd_vector_slots_rebuild_input() {
        let (b, n) = (2usize, 3usize);
        let (mut full, mut uv, mut bb, mut mm, mut nn) = (1i32, 1i32, b as i32, n as i32, n as i32);
        let mut lwork = 256i32;
        #[rustfmt::skip]
        let mut a_in = vec![
            2.0, -1.0, 0.5,
            1.0, 3.0, -2.0,
            0.0, 1.5, 4.0,

            1.0, 2.0, 0.0,
            0.0, 1.0, -3.0,
            4.0, 0.0, 1.0,
        ];
        let orig = a_in.clone();
        let mut a = vec![0.0; b * n * n];
        let mut s = vec![0.0; b * n];
        let mut slot2 = vec![0.0; b * n * n];
        let mut slot3 = vec![0.0; b * n * n];
        let mut info = vec![-1i32; b];
        let mut iwork = vec![0i32; 8 * n];
        let mut work = vec![0.0; lwork as usize];

        let mut inputs = EncodedArgs::new();
        inputs
            .push(&mut full as *mut i32, 0)
            .push(&mut uv as *mut i32, 0)
            .push(&mut bb as *mut i32, 0)
            .push(&mut mm as *mut i32, 0)
            .push(&mut nn as *mut i32, 0)
            .push(&mut lwork as *mut i32, 0)
            .push(a_in.as_mut_ptr(), 3);
        let mut outputs = EncodedArgs::new();
        outputs
            .push(a.as_mut_ptr(), 3)
            .push(s.as_mut_ptr(), 2)
            .push(slot2.as_mut_ptr(), 3)
            .push(slot3.as_mut_ptr(), 3)
            .push(info.as_mut_ptr(), 1)
            .push(iwork.as_mut_ptr(), 1)
            .push(work.as_mut_ptr(), 1);

        unsafe { lapack_dgesdd(inputs.as_mut_ptr(), outputs.as_mut_ptr()) };

        assert_eq!(info, vec![0, 0]);
        assert_eq!(a_in, orig);
        // Row-major: A = slot2 * diag(s) * slot3.
        for e in 0..b {
            let (p, q) = (&slot2[e * n * n..], &slot3[e * n * n..]);
            let sv = &s[e * n..(e + 1) * n];
            assert!(sv.windows(2).all(|w| w[0] >= w[1]), "{sv:?}");
            for i in 0..n {
                for j in 0..n {
                    let got: f64 = (0..n).map(|k| p[i * n + k] * sv[k] * q[k * n + j]).sum();
                    assert_abs_diff_eq!(got, orig[e * n * n + i * n + j], epsilon = 1e-10);
                }
            }
        }
    }

    #[test]
    fn test_dgetrf_identity_batch() {
        let (b, n) = (2usize, 2usize);
        let (mut bb, mut mm, mut nn) = (b as i32, n as i32, n as i32);
        let mut a_in: Vec<f64> = (0..b).flat_map(|_| identity(n)).collect();
        let mut a = vec![0.0; b * n * n];
        let mut ipiv = vec![0i32; b * n];
        let mut info = vec![-1i32; b];

        let mut inputs = EncodedArgs::new();
        inputs
            .push(&mut bb as *mut i32, 0)
            .push(&mut mm as *mut i32, 0)
            .push(&mut nn as *mut i32, 0)
            .push(a_in.as_mut_ptr(), 3);
        let mut outputs = EncodedArgs::new();
        outputs.push(a.as_mut_ptr(), 3).push(ipiv.as_mut_ptr(), 2).push(info.as_mut_ptr(), 1);

        unsafe { lapack_dgetrf(inputs.as_mut_ptr(), outputs.as_mut_ptr()) };

        assert_eq!(a, a_in);
        assert_eq!(ipiv, vec![1, 2, 1, 2]);
        assert_eq!(info, vec![0, 0]);
    }

    #[test]
    fn test_zgetrf_in_place_reports_singular_element() {
        let z = |re: f64, im: f64| Complex64::new(re, im);
        // Element 0 pivots on row 2, element 1 is singular.
        #[rustfmt::skip]
        let mut a = vec![
            z(0.0, 0.0), z(1.0, 0.0),
            z(0.0, 2.0), z(3.0, 0.0),
            z(1.0, 1.0), z(2.0, 2.0),
            z(2.0, 2.0), z(4.0, 4.0),
        ];
        let (mut bb, mut mm, mut nn) = (2i32, 2i32, 2i32);
        let mut ipiv = vec![0i32; 4];
        let mut info = vec![-1i32; 2];

        let mut inputs = EncodedArgs::new();
        inputs
            .push(&mut bb as *mut i32, 0)
            .push(&mut mm as *mut i32, 0)
            .push(&mut nn as *mut i32, 0)
            .push(a.as_mut_ptr(), 3);
        let mut outputs = EncodedArgs::new();
        outputs.push(a.as_mut_ptr(), 3).push(ipiv.as_mut_ptr(), 2).push(info.as_mut_ptr(), 1);

        unsafe { lapack_zgetrf(inputs.as_mut_ptr(), outputs.as_mut_ptr()) };

        assert_eq!(&ipiv[..2], &[2, 2]);
        assert_eq!(info, vec![0, 2]);
        // U[0] of element 0 is the swapped-in row.
        assert_eq!(a[0], z(0.0, 2.0));
        assert_eq!(a[1], z(3.0, 0.0));
    }

    #[test]
    fn test_dsyevd_batch() {
        let (b, n) = (2usize, 2usize);
        let shape = EighShape::new(n as i32);
        let (mut lower, mut bb, mut nn) = (1i32, b as i32, n as i32);
        // [[2, 1], [1, 2]] and diag(5, -1); the upper entries are never read.
        let mut a_in = vec![2.0, f64::NAN, 1.0, 2.0, 5.0, f64::NAN, 0.0, -1.0];
        let mut a = vec![0.0; b * n * n];
        let mut w = vec![0.0; b * n];
        let mut info = vec![-1i32; b];
        let mut work = vec![0.0; shape.lwork];
        let mut iwork = vec![0i32; shape.liwork];

        let mut inputs = EncodedArgs::new();
        inputs
            .push(&mut lower as *mut i32, 0)
            .push(&mut bb as *mut i32, 0)
            .push(&mut nn as *mut i32, 0)
            .push(a_in.as_mut_ptr(), 3);
        let mut outputs = EncodedArgs::new();
        outputs
            .push(a.as_mut_ptr(), 3)
            .push(w.as_mut_ptr(), 2)
            .push(info.as_mut_ptr(), 1)
            .push(work.as_mut_ptr(), 1)
            .push(iwork.as_mut_ptr(), 1);

        unsafe { lapack_dsyevd(inputs.as_mut_ptr(), outputs.as_mut_ptr()) };

        assert_eq!(info, vec![0, 0]);
        for (got, want) in w.iter().zip([1.0, 3.0, -1.0, 5.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        // Second element is already diagonal: eigenvectors are +-e1, +-e0.
        assert_signed_permutation(&a[4..], n);
        assert_abs_diff_eq!(a[4 + 1].abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dtrsm_batch() {
        let (b, n) = (2usize, 2usize);
        let mut flags = [1i32, 1, 0, 0, n as i32, n as i32, b as i32];
        let mut alpha = 1.0f64;
        // [[2, 0], [1, 1]] and [[1, 0], [0, 4]]
        let mut a = vec![2.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 4.0];
        let mut bm = vec![2.0, 4.0, 3.0, 5.0, 1.0, 2.0, 8.0, 4.0];
        let mut x = vec![0.0; b * n * n];

        let mut inputs = EncodedArgs::new();
        for flag in flags.iter_mut() {
            inputs.push(flag as *mut i32, 0);
        }
        inputs
            .push(&mut alpha as *mut f64, 0)
            .push(a.as_mut_ptr(), 3)
            .push(bm.as_mut_ptr(), 3);
        let mut outputs = EncodedArgs::new();
        outputs.push(x.as_mut_ptr(), 3);

        unsafe { blas_dtrsm(inputs.as_mut_ptr(), outputs.as_mut_ptr()) };

        for (got, want) in x.iter().zip([1.0, 2.0, 2.0, 3.0, 1.0, 2.0, 2.0, 1.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert_eq!(bm, vec![2.0, 4.0, 3.0, 5.0, 1.0, 2.0, 8.0, 4.0]);
    }

    #[test]
    fn test_ztrsm_conjugate_transpose() {
        let z = |re: f64, im: f64| Complex64::new(re, im);
        let n = 2usize;
        // Upper A = i * I, op(A) = A^H = -i * I, so X = alpha * i * B.
        let mut flags = [1i32, 0, 2, 0, n as i32, n as i32, 1];
        let mut alpha = z(2.0, 0.0);
        let mut a = vec![z(0.0, 1.0), z(0.0, 0.0), z(0.0, 0.0), z(0.0, 1.0)];
        let mut x = vec![z(1.0, 0.0), z(0.0, 1.0), z(3.0, 0.0), z(1.0, -1.0)];

        let mut inputs = EncodedArgs::new();
        for flag in flags.iter_mut() {
            inputs.push(flag as *mut i32, 0);
        }
        inputs
            .push(&mut alpha as *mut Complex64, 0)
            .push(a.as_mut_ptr(), 3)
            .push(x.as_mut_ptr(), 3);
        let mut outputs = EncodedArgs::new();
        outputs.push(x.as_mut_ptr(), 3);

        unsafe { blas_ztrsm(inputs.as_mut_ptr(), outputs.as_mut_ptr()) };

        let want = [z(0.0, 2.0), z(-2.0, 0.0), z(0.0, 6.0), z(2.0, 2.0)];
        for (got, want) in x.iter().zip(want) {
            assert_abs_diff_eq!(got.re, want.re, epsilon = 1e-12);
            assert_abs_diff_eq!(got.im, want.im, epsilon = 1e-12);
        }
    }
}
