//! Raw FFI declarations for the system LAPACK / CBLAS.
//!
//! These map 1:1 to `cblas.h`, `lapacke.h` and the Fortran LAPACK ABI.
//! All functions are unsafe; safe wrappers live in the `dispatch-blas` and
//! `dispatch-lapack` routines behind `#[cfg(feature = "lapack")]`.
//!
//! Convention: Rust enums Layout, Transpose, Uplo, Side, Diag are #[repr(u32)]
//! with CBLAS values (101, 102, 111, ...) so they cast directly to c_int.
//! LAPACK character arguments are passed as `u8`.

#![allow(non_snake_case)]

use num_complex::Complex64;
use std::os::raw::{c_char, c_double, c_int, c_void};

// ═══════════════════════════════════════════════════════════════
// CBLAS Level 3
// ═══════════════════════════════════════════════════════════════

extern "C" {
    pub fn cblas_dtrsm(
        layout: c_int,
        side: c_int,
        uplo: c_int,
        trans: c_int,
        diag: c_int,
        m: c_int,
        n: c_int,
        alpha: c_double,
        a: *const c_double,
        lda: c_int,
        b: *mut c_double,
        ldb: c_int,
    );

    /// Complex scalars are passed by pointer (`const void *alpha`).
    pub fn cblas_ztrsm(
        layout: c_int,
        side: c_int,
        uplo: c_int,
        trans: c_int,
        diag: c_int,
        m: c_int,
        n: c_int,
        alpha: *const c_void,
        a: *const c_void,
        lda: c_int,
        b: *mut c_void,
        ldb: c_int,
    );
}

// ═══════════════════════════════════════════════════════════════
// LAPACKE
// ═══════════════════════════════════════════════════════════════

extern "C" {
    pub fn LAPACKE_dgetrf(
        layout: c_int,
        m: c_int,
        n: c_int,
        a: *mut c_double,
        lda: c_int,
        ipiv: *mut c_int,
    ) -> c_int;
    pub fn LAPACKE_zgetrf(
        layout: c_int,
        m: c_int,
        n: c_int,
        a: *mut Complex64,
        lda: c_int,
        ipiv: *mut c_int,
    ) -> c_int;

    /// Workspace variant: uses the caller's `work`/`iwork`, never allocates.
    pub fn LAPACKE_dsyevd_work(
        layout: c_int,
        jobz: u8,
        uplo: u8,
        n: c_int,
        a: *mut c_double,
        lda: c_int,
        w: *mut c_double,
        work: *mut c_double,
        lwork: c_int,
        iwork: *mut c_int,
        liwork: c_int,
    ) -> c_int;
}

// ═══════════════════════════════════════════════════════════════
// Fortran LAPACK (column-major, every argument by reference)
// ═══════════════════════════════════════════════════════════════

extern "C" {
    pub fn dgesdd_(
        jobz: *const c_char,
        m: *const c_int,
        n: *const c_int,
        a: *mut c_double,
        lda: *const c_int,
        s: *mut c_double,
        u: *mut c_double,
        ldu: *const c_int,
        vt: *mut c_double,
        ldvt: *const c_int,
        work: *mut c_double,
        lwork: *const c_int,
        iwork: *mut c_int,
        info: *mut c_int,
    );
}
