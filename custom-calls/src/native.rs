//! The seam between the batch loop and the native linear-algebra routines.
//!
//! Handlers call a [`Native`] with one batch element's raw pointers and the
//! kernel's shape. [`Lapacke`] forwards to `dispatch-blas`/`dispatch-lapack`,
//! which run the system LAPACKE/CBLAS with `--features lapack` and the
//! pure-Rust kernels otherwise.

use dispatch_core::{Complex64, Layout, Scalar, SvdJob, Uplo};

use crate::frame::TrsmOp;
use crate::shape::{EighShape, LuShape, SvdShape, TrsmShape};

/// Native routines for one batch element. Pointers are already offset to
/// the element; returned values are LAPACK `info` codes.
///
/// # Safety
/// Implementations may read and write every buffer for the extent its shape
/// implies. Callers guarantee those extents are valid.
pub trait Native {
    /// Column-major SVD of the `m x n` matrix at `a`.
    unsafe fn dgesdd(
        &mut self,
        job: SvdJob,
        shape: &SvdShape,
        a: *mut f64,
        s: *mut f64,
        u: *mut f64,
        vt: *mut f64,
        work: *mut f64,
        lwork: usize,
        iwork: *mut i32,
    ) -> i32;

    /// Row-major symmetric eigendecomposition (`jobz = 'V'`).
    unsafe fn dsyevd(
        &mut self,
        uplo: Uplo,
        shape: &EighShape,
        a: *mut f64,
        w: *mut f64,
        work: *mut f64,
        iwork: *mut i32,
    ) -> i32;

    unsafe fn dtrsm(
        &mut self,
        op: &TrsmOp,
        shape: &TrsmShape,
        alpha: f64,
        a: *const f64,
        b: *mut f64,
    );

    unsafe fn ztrsm(
        &mut self,
        op: &TrsmOp,
        shape: &TrsmShape,
        alpha: Complex64,
        a: *const Complex64,
        b: *mut Complex64,
    );

    unsafe fn dgetrf(&mut self, shape: &LuShape, a: *mut f64, ipiv: *mut i32) -> i32;

    unsafe fn zgetrf(&mut self, shape: &LuShape, a: *mut Complex64, ipiv: *mut i32) -> i32;
}

/// Element types with a triangular solve and an LU factorization, so the
/// `d` and `z` handlers share one body.
pub trait Element: Scalar {
    const TRSM: &'static str;
    const GETRF: &'static str;

    unsafe fn trsm<N: Native>(
        native: &mut N,
        op: &TrsmOp,
        shape: &TrsmShape,
        alpha: Self,
        a: *const Self,
        b: *mut Self,
    );

    unsafe fn getrf<N: Native>(
        native: &mut N,
        shape: &LuShape,
        a: *mut Self,
        ipiv: *mut i32,
    ) -> i32;
}

impl Element for f64 {
    const TRSM: &'static str = "blas_dtrsm";
    const GETRF: &'static str = "lapack_dgetrf";

    #[inline]
    unsafe fn trsm<N: Native>(
        native: &mut N,
        op: &TrsmOp,
        shape: &TrsmShape,
        alpha: f64,
        a: *const f64,
        b: *mut f64,
    ) {
        native.dtrsm(op, shape, alpha, a, b)
    }

    #[inline]
    unsafe fn getrf<N: Native>(
        native: &mut N,
        shape: &LuShape,
        a: *mut f64,
        ipiv: *mut i32,
    ) -> i32 {
        native.dgetrf(shape, a, ipiv)
    }
}

impl Element for Complex64 {
    const TRSM: &'static str = "blas_ztrsm";
    const GETRF: &'static str = "lapack_zgetrf";

    #[inline]
    unsafe fn trsm<N: Native>(
        native: &mut N,
        op: &TrsmOp,
        shape: &TrsmShape,
        alpha: Complex64,
        a: *const Complex64,
        b: *mut Complex64,
    ) {
        native.ztrsm(op, shape, alpha, a, b)
    }

    #[inline]
    unsafe fn getrf<N: Native>(
        native: &mut N,
        shape: &LuShape,
        a: *mut Complex64,
        ipiv: *mut i32,
    ) -> i32 {
        native.zgetrf(shape, a, ipiv)
    }
}

// ============================================================================
// Production binding
// ============================================================================

/// The native library: slice routines of `dispatch-blas`/`dispatch-lapack`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lapacke;

/// View `len` elements at `ptr`. Null or empty yields an empty slice.
#[inline]
unsafe fn slice_mut<'a, T>(ptr: *mut T, len: usize) -> &'a mut [T] {
    if ptr.is_null() || len == 0 {
        &mut []
    } else {
        std::slice::from_raw_parts_mut(ptr, len)
    }
}

#[inline]
unsafe fn slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if ptr.is_null() || len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(ptr, len)
    }
}

impl Native for Lapacke {
    unsafe fn dgesdd(
        &mut self,
        job: SvdJob,
        shape: &SvdShape,
        a: *mut f64,
        s: *mut f64,
        u: *mut f64,
        vt: *mut f64,
        work: *mut f64,
        lwork: usize,
        iwork: *mut i32,
    ) -> i32 {
        dispatch_lapack::dgesdd(
            job,
            shape.m,
            shape.n,
            slice_mut(a, shape.a_stride()),
            shape.lda,
            slice_mut(s, shape.k),
            slice_mut(u, shape.u_len(job)),
            shape.ldu,
            slice_mut(vt, shape.vt_len(job)),
            shape.ldvt,
            slice_mut(work, lwork),
            slice_mut(iwork, shape.iwork_len()),
        )
    }

    unsafe fn dsyevd(
        &mut self,
        uplo: Uplo,
        shape: &EighShape,
        a: *mut f64,
        w: *mut f64,
        work: *mut f64,
        iwork: *mut i32,
    ) -> i32 {
        dispatch_lapack::dsyevd(
            Layout::RowMajor,
            b'V',
            uplo,
            shape.n,
            slice_mut(a, shape.a_stride()),
            shape.lda,
            slice_mut(w, shape.n),
            slice_mut(work, shape.lwork),
            slice_mut(iwork, shape.liwork),
        )
    }

    unsafe fn dtrsm(
        &mut self,
        op: &TrsmOp,
        shape: &TrsmShape,
        alpha: f64,
        a: *const f64,
        b: *mut f64,
    ) {
        dispatch_blas::dtrsm(
            Layout::RowMajor,
            op.side,
            op.uplo,
            op.trans,
            op.diag,
            shape.m,
            shape.n,
            alpha,
            slice(a, shape.a_stride()),
            shape.lda,
            slice_mut(b, shape.b_span()),
            shape.ldb,
        )
    }

    unsafe fn ztrsm(
        &mut self,
        op: &TrsmOp,
        shape: &TrsmShape,
        alpha: Complex64,
        a: *const Complex64,
        b: *mut Complex64,
    ) {
        dispatch_blas::ztrsm(
            Layout::RowMajor,
            op.side,
            op.uplo,
            op.trans,
            op.diag,
            shape.m,
            shape.n,
            alpha,
            slice(a, shape.a_stride()),
            shape.lda,
            slice_mut(b, shape.b_span()),
            shape.ldb,
        )
    }

    unsafe fn dgetrf(&mut self, shape: &LuShape, a: *mut f64, ipiv: *mut i32) -> i32 {
        dispatch_lapack::dgetrf(
            Layout::RowMajor,
            shape.m,
            shape.n,
            slice_mut(a, shape.a_stride()),
            shape.lda,
            slice_mut(ipiv, shape.k),
        )
    }

    unsafe fn zgetrf(&mut self, shape: &LuShape, a: *mut Complex64, ipiv: *mut i32) -> i32 {
        dispatch_lapack::zgetrf(
            Layout::RowMajor,
            shape.m,
            shape.n,
            slice_mut(a, shape.a_stride()),
            shape.lda,
            slice_mut(ipiv, shape.k),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_views() {
        let empty: &mut [f64] = unsafe { slice_mut(std::ptr::null_mut(), 4) };
        assert!(empty.is_empty());
        let mut x = [1.0f64];
        assert!(unsafe { slice_mut(x.as_mut_ptr(), 0) }.is_empty());
    }

    #[test]
    fn test_lapacke_dtrsm_square() {
        // [[2, 0], [1, 1]] X = [[2, 4], [3, 5]]
        let a = [2.0, 0.0, 1.0, 1.0];
        let mut b = [2.0, 4.0, 3.0, 5.0];
        let op = TrsmOp::from_flags(1, 1, 0, 0);
        unsafe { Lapacke.dtrsm(&op, &TrsmShape::new(true, 2, 2), 1.0, a.as_ptr(), b.as_mut_ptr()) };
        for (got, want) in b.iter().zip([1.0, 2.0, 2.0, 3.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lapacke_dgetrf_writes_pivots() {
        let mut a = [0.0, 1.0, 1.0, 0.0];
        let mut ipiv = [0i32; 2];
        let info = unsafe { Lapacke.dgetrf(
            &LuShape::new(2, 2),
            a.as_mut_ptr(),
            ipiv.as_mut_ptr(),
        ) };
        assert_eq!(info, 0);
        assert_eq!(ipiv, [2, 2]);
    }
}
