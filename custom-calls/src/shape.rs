//! Per-kernel leading dimensions and batch strides.
//!
//! Pure functions of the decoded dimensions. Every stride is an element
//! count for one batch slice of that buffer role; the batch loop advances
//! each role independently.

use dispatch_core::SvdJob;
use dispatch_lapack::{dsyevd_liwork, dsyevd_lwork};

/// Caller dimension as an element count. Negative values count as zero.
#[inline]
pub fn dim(v: i32) -> usize {
    usize::try_from(v).unwrap_or(0)
}

/// Clamp a workspace size to what a 32-bit LAPACK integer can carry.
#[inline]
fn lapack_int(v: usize) -> usize {
    v.min(i32::MAX as usize)
}

// ============================================================================
// SVD
// ============================================================================

/// `gesdd` geometry. The routine is column-major (Fortran).
///
/// `tdu` is the column count of `u` and `ldvt` the row count of `vt`; both
/// shrink to `k = min(m, n)` unless full matrices are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvdShape {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub lda: usize,
    pub ldu: usize,
    pub tdu: usize,
    pub ldvt: usize,
}

impl SvdShape {
    pub fn new(m: i32, n: i32, full_matrices: bool) -> Self {
        let (m, n) = (dim(m), dim(n));
        let k = m.min(n);
        Self {
            m,
            n,
            k,
            lda: m,
            ldu: m,
            tdu: if full_matrices { m } else { k },
            ldvt: if full_matrices { n } else { k },
        }
    }

    pub fn a_stride(&self) -> usize {
        self.m * self.n
    }

    pub fn s_stride(&self) -> usize {
        self.k
    }

    pub fn u_stride(&self) -> usize {
        self.m * self.tdu
    }

    pub fn vt_stride(&self) -> usize {
        self.ldvt * self.n
    }

    /// `iwork` entries `gesdd` needs.
    pub fn iwork_len(&self) -> usize {
        8 * self.k
    }

    /// Elements of `u` the routine may touch for `job`.
    pub fn u_len(&self, job: SvdJob) -> usize {
        if job.wants_vectors() {
            self.u_stride()
        } else {
            0
        }
    }

    /// Elements of `vt` the routine may touch for `job`.
    pub fn vt_len(&self, job: SvdJob) -> usize {
        if job.wants_vectors() {
            self.vt_stride()
        } else {
            0
        }
    }
}

// ============================================================================
// Symmetric eigendecomposition
// ============================================================================

/// `dsyevd` geometry, row-major with `lda = n`, plus the workspace sizes
/// (clamped to `i32::MAX`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EighShape {
    pub n: usize,
    pub lda: usize,
    pub lwork: usize,
    pub liwork: usize,
}

impl EighShape {
    pub fn new(n: i32) -> Self {
        let n = dim(n);
        Self {
            n,
            lda: n,
            lwork: lapack_int(dsyevd_lwork(n)),
            liwork: lapack_int(dsyevd_liwork(n)),
        }
    }

    pub fn a_stride(&self) -> usize {
        self.n * self.n
    }

    pub fn w_stride(&self) -> usize {
        self.n
    }
}

// ============================================================================
// Triangular solve
// ============================================================================

/// `trsm` geometry, row-major. A is `lda x lda` with `lda = m` on the left
/// and `n` on the right; `ldb = m`.
///
/// `ldb = m` is the row stride of B only when B is square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrsmShape {
    pub m: usize,
    pub n: usize,
    pub lda: usize,
    pub ldb: usize,
}

impl TrsmShape {
    pub fn new(left: bool, m: i32, n: i32) -> Self {
        let (m, n) = (dim(m), dim(n));
        Self {
            m,
            n,
            lda: if left { m } else { n },
            ldb: m,
        }
    }

    pub fn x_stride(&self) -> usize {
        self.m * self.n
    }

    pub fn a_stride(&self) -> usize {
        self.lda * self.lda
    }

    /// Elements of one B slice addressed with row stride `ldb`.
    pub fn b_span(&self) -> usize {
        if self.m == 0 || self.n == 0 {
            0
        } else {
            (self.m - 1) * self.ldb + self.n
        }
    }
}

// ============================================================================
// LU
// ============================================================================

/// `getrf` geometry, row-major with `lda = n`; `k = min(m, n)` pivots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LuShape {
    pub m: usize,
    pub n: usize,
    pub lda: usize,
    pub k: usize,
}

impl LuShape {
    pub fn new(m: i32, n: i32) -> Self {
        let (m, n) = (dim(m), dim(n));
        Self { m, n, lda: n, k: m.min(n) }
    }

    pub fn a_stride(&self) -> usize {
        self.m * self.n
    }

    pub fn ipiv_stride(&self) -> usize {
        self.k
    }
}
