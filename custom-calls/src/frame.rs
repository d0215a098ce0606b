//! Typed call frames: the positional contract of each kernel.
//!
//! Each `decode` is the only place a kernel's argument positions are known.
//! Scalar inputs (flags, dimensions, `alpha`) are read once here; matrix
//! arguments stay raw pointers for the batch loop.

use std::ffi::c_void;

use dispatch_core::{Diag, Side, Transpose, Uplo};

use crate::descriptor::decode;

/// Read the `i32` behind a decoded data pointer.
#[inline]
unsafe fn int(p: *mut c_void) -> i32 {
    *(p as *const i32)
}

// ============================================================================
// SVD: 7 inputs, 7 outputs
// ============================================================================

/// `lapack_dgesdd` frame.
///
/// | slot      | 0             | 1          | 2     | 3 | 4      | 5     | 6    |
/// |-----------|---------------|------------|-------|---|--------|-------|------|
/// | inputs    | full_matrices | compute_uv | batch | m | n      | lwork | A    |
/// | outputs   | A             | s          | vt    | u | status | iwork | work |
///
/// Output slot 2 receives the routine's `vt` argument and slot 3 its `u`
/// argument, the reverse of the routine's own argument order. Callers depend
/// on this ordering.
#[derive(Debug, Clone, Copy)]
pub struct SvdFrame {
    pub full_matrices: bool,
    pub compute_uv: bool,
    pub batch: i32,
    pub m: i32,
    pub n: i32,
    pub lwork: i32,
    pub a_in: *const f64,
    pub a: *mut f64,
    pub s: *mut f64,
    pub vt: *mut f64,
    pub u: *mut f64,
    pub info: *mut i32,
    pub iwork: *mut i32,
    pub work: *mut f64,
}

impl SvdFrame {
    /// # Safety
    /// `inputs` and `outputs` must each hold 7 descriptor handles laid out as
    /// in the table above, with live scalar inputs.
    pub unsafe fn decode(inputs: *const *mut c_void, outputs: *const *mut c_void) -> Self {
        let data = decode::<7>(inputs);
        let out = decode::<7>(outputs);
        Self {
            full_matrices: int(data[0]) != 0,
            compute_uv: int(data[1]) != 0,
            batch: int(data[2]),
            m: int(data[3]),
            n: int(data[4]),
            lwork: int(data[5]),
            a_in: data[6] as *const f64,
            a: out[0] as *mut f64,
            s: out[1] as *mut f64,
            vt: out[2] as *mut f64,
            u: out[3] as *mut f64,
            info: out[4] as *mut i32,
            iwork: out[5] as *mut i32,
            work: out[6] as *mut f64,
        }
    }
}

// ============================================================================
// Symmetric eigendecomposition: 4 inputs, 5 outputs
// ============================================================================

/// `lapack_dsyevd` frame.
///
/// inputs: `lower, batch, n, A`; outputs: `A, w, status, work, iwork`.
#[derive(Debug, Clone, Copy)]
pub struct EighFrame {
    pub lower: bool,
    pub batch: i32,
    pub n: i32,
    pub a_in: *const f64,
    pub a: *mut f64,
    pub w: *mut f64,
    pub info: *mut i32,
    pub work: *mut f64,
    pub iwork: *mut i32,
}

impl EighFrame {
    /// # Safety
    /// `inputs` must hold 4 and `outputs` 5 descriptor handles in the order
    /// documented on the type.
    pub unsafe fn decode(inputs: *const *mut c_void, outputs: *const *mut c_void) -> Self {
        let data = decode::<4>(inputs);
        let out = decode::<5>(outputs);
        Self {
            lower: int(data[0]) != 0,
            batch: int(data[1]),
            n: int(data[2]),
            a_in: data[3] as *const f64,
            a: out[0] as *mut f64,
            w: out[1] as *mut f64,
            info: out[2] as *mut i32,
            work: out[3] as *mut f64,
            iwork: out[4] as *mut i32,
        }
    }

    pub fn uplo(&self) -> Uplo {
        if self.lower {
            Uplo::Lower
        } else {
            Uplo::Upper
        }
    }
}

// ============================================================================
// Triangular solve: 10 inputs, 1 output
// ============================================================================

/// Side, triangle, transpose and diagonal of one `trsm` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrsmOp {
    pub side: Side,
    pub uplo: Uplo,
    pub trans: Transpose,
    pub diag: Diag,
}

impl TrsmOp {
    /// Translate the caller's flags. Transpose kinds outside `0..=2` fall
    /// back to no-transpose (with a warning).
    pub fn from_flags(left: i32, lower: i32, trans: i32, unit: i32) -> Self {
        Self {
            side: Side::from_flag(left),
            uplo: Uplo::from_flag(lower),
            trans: Transpose::from_flag(trans),
            diag: Diag::from_flag(unit),
        }
    }

    pub fn is_left(&self) -> bool {
        self.side == Side::Left
    }
}

/// `blas_dtrsm` / `blas_ztrsm` frame.
///
/// inputs: `left, lower, trans, unit, m, n, batch, alpha, A, B`;
/// outputs: `X`. B is copied into X, which is then solved in place.
#[derive(Debug, Clone, Copy)]
pub struct TrsmFrame<T> {
    pub op: TrsmOp,
    pub m: i32,
    pub n: i32,
    pub batch: i32,
    pub alpha: T,
    pub a: *const T,
    pub b: *const T,
    pub x: *mut T,
}

impl<T: Copy> TrsmFrame<T> {
    /// # Safety
    /// `inputs` must hold 10 descriptor handles and `outputs` 1, in the order
    /// documented on the type; `alpha` must point at a valid `T`.
    pub unsafe fn decode(inputs: *const *mut c_void, outputs: *const *mut c_void) -> Self {
        let data = decode::<10>(inputs);
        let [x] = decode::<1>(outputs);
        Self {
            op: TrsmOp::from_flags(int(data[0]), int(data[1]), int(data[2]), int(data[3])),
            m: int(data[4]),
            n: int(data[5]),
            batch: int(data[6]),
            alpha: *(data[7] as *const T),
            a: data[8] as *const T,
            b: data[9] as *const T,
            x: x as *mut T,
        }
    }
}

// ============================================================================
// LU: 4 inputs, 3 outputs
// ============================================================================

/// `lapack_dgetrf` / `lapack_zgetrf` frame.
///
/// inputs: `batch, m, n, A`; outputs: `A, ipiv, status`.
#[derive(Debug, Clone, Copy)]
pub struct LuFrame<T> {
    pub batch: i32,
    pub m: i32,
    pub n: i32,
    pub a_in: *const T,
    pub a: *mut T,
    pub ipiv: *mut i32,
    pub info: *mut i32,
}

impl<T> LuFrame<T> {
    /// # Safety
    /// `inputs` must hold 4 and `outputs` 3 descriptor handles in the order
    /// documented on the type.
    pub unsafe fn decode(inputs: *const *mut c_void, outputs: *const *mut c_void) -> Self {
        let data = decode::<4>(inputs);
        let out = decode::<3>(outputs);
        Self {
            batch: int(data[0]),
            m: int(data[1]),
            n: int(data[2]),
            a_in: data[3] as *const T,
            a: out[0] as *mut T,
            ipiv: out[1] as *mut i32,
            info: out[2] as *mut i32,
        }
    }
}
