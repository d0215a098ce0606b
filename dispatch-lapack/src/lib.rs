// LAPACK functions have many parameters matching standard API signatures.
// Numeric kernels use index loops for clarity.
#![allow(clippy::too_many_arguments, clippy::needless_range_loop)]

//! # Dispatch LAPACK
//!
//! The LAPACK routines behind the dispatch shim, each with the calling
//! contract of its system counterpart:
//!
//! - **LU factorization** (`dgetrf` / `zgetrf`): LAPACKE, 1-based pivots
//! - **Symmetric eigendecomposition** (`dsyevd`): LAPACKE, ascending eigenvalues
//! - **Singular value decomposition** (`dgesdd`): Fortran, column-major
//!
//! Pure Rust by default (partial-pivoting LU, cyclic and one-sided Jacobi);
//! `--features lapack` routes every call to the system library instead.
//! Every routine returns the LAPACK `info` code.

pub mod eigen;
pub mod lapack;
pub mod svd;

pub use eigen::{dsyevd, dsyevd_liwork, dsyevd_lwork};
pub use lapack::{dgetrf, getrf, zgetrf};
pub use svd::dgesdd;

/// Jacobi sweeps before a routine reports non-convergence through `info`.
pub(crate) const MAX_SWEEPS: usize = 100;
