//! CBLAS-style enumerations and the caller-flag translation into them.
//!
//! Callers encode every option as a 32-bit integer: booleans are "non-zero is
//! true", the transpose kind is `0 | 1 | 2`. The discriminants are the CBLAS
//! values (101, 111, 121, ...) so they cast directly to `c_int`.

use crate::error::FlagError;

/// Memory layout for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Layout {
    /// Row-major (C-style): elements in a row are contiguous.
    #[default]
    RowMajor = 101,
    /// Column-major (Fortran-style): elements in a column are contiguous.
    ColMajor = 102,
}

/// Transpose operation for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Transpose {
    /// No transpose.
    #[default]
    NoTrans = 111,
    /// Transpose.
    Trans = 112,
    /// Conjugate transpose (for complex types).
    ConjTrans = 113,
}

impl Layout {
    /// Leading dimension stride for an M x N matrix.
    #[inline(always)]
    pub fn leading_dim(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::RowMajor => cols,
            Layout::ColMajor => rows,
        }
    }

    /// Linear index into a flat array for element (i, j) of an M x N matrix.
    #[inline(always)]
    pub fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Layout::RowMajor => i * ld + j,
            Layout::ColMajor => j * ld + i,
        }
    }
}

impl Transpose {
    /// Strict decoding of the caller's transpose kind.
    pub fn try_from_flag(kind: i32) -> Result<Self, FlagError> {
        match kind {
            0 => Ok(Transpose::NoTrans),
            1 => Ok(Transpose::Trans),
            2 => Ok(Transpose::ConjTrans),
            other => Err(FlagError::Transpose(other)),
        }
    }

    /// Caller's transpose kind with the ABI fallback: anything outside
    /// `0..=2` is treated as no-transpose.
    pub fn from_flag(kind: i32) -> Self {
        Self::try_from_flag(kind).unwrap_or_else(|err| {
            log::warn!("{err}; falling back to no-transpose");
            Transpose::NoTrans
        })
    }

    /// LAPACK character form (`'N'`, `'T'`, `'C'`).
    pub fn as_char(self) -> u8 {
        match self {
            Transpose::NoTrans => b'N',
            Transpose::Trans => b'T',
            Transpose::ConjTrans => b'C',
        }
    }
}

/// BLAS triangle specifier (upper/lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Uplo {
    #[default]
    Upper = 121,
    Lower = 122,
}

impl Uplo {
    pub fn from_flag(lower: i32) -> Self {
        if lower != 0 {
            Uplo::Lower
        } else {
            Uplo::Upper
        }
    }

    /// LAPACK character form (`'U'`, `'L'`).
    pub fn as_char(self) -> u8 {
        match self {
            Uplo::Upper => b'U',
            Uplo::Lower => b'L',
        }
    }
}

/// BLAS side specifier (left/right multiplication).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Side {
    #[default]
    Left = 141,
    Right = 142,
}

impl Side {
    pub fn from_flag(left: i32) -> Self {
        if left != 0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// BLAS diagonal specifier (unit/non-unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Diag {
    #[default]
    NonUnit = 131,
    Unit = 132,
}

impl Diag {
    pub fn from_flag(unit: i32) -> Self {
        if unit != 0 {
            Diag::Unit
        } else {
            Diag::NonUnit
        }
    }
}

/// `gesdd` job selector. The discriminant is the LAPACK `jobz` character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SvdJob {
    /// Singular values only.
    None = b'N',
    /// Thin factors: `min(m, n)` columns of `U`, `min(m, n)` rows of `Vt`.
    Thin = b'S',
    /// Full square `U` (m x m) and `Vt` (n x n).
    All = b'A',
}

impl SvdJob {
    /// `compute_uv` wins over `full_matrices`: without vectors the job is `'N'`
    /// whatever the second flag says.
    pub fn from_flags(compute_uv: bool, full_matrices: bool) -> Self {
        if !compute_uv {
            SvdJob::None
        } else if !full_matrices {
            SvdJob::Thin
        } else {
            SvdJob::All
        }
    }

    #[inline]
    pub fn as_char(self) -> u8 {
        self as u8
    }

    pub fn wants_vectors(self) -> bool {
        self != SvdJob::None
    }
}
