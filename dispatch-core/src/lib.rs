//! # Dispatch Core
//!
//! Shared vocabulary for the batched linear-algebra dispatch workspace.
//!
//! This crate provides:
//! - **CBLAS/LAPACK enumerations**: `Layout`, `Transpose`, `Uplo`, `Side`, `Diag`
//!   with their CBLAS integer values, plus the `gesdd` job selector `SvdJob`.
//! - **Flag translation**: 32-bit caller flags to those enumerations.
//! - **Scalar**: the element trait shared by the real and complex kernels.
//! - **Raw FFI**: LAPACKE / CBLAS / Fortran LAPACK declarations (`--features lapack`).

pub mod error;
pub mod layout;
pub mod scalar;

// System LAPACK FFI bindings (only compiled when --features lapack is enabled)
#[cfg(feature = "lapack")]
pub mod lapack_ffi;

pub use error::FlagError;
pub use layout::{Diag, Layout, Side, SvdJob, Transpose, Uplo};
pub use num_complex::Complex64;
pub use scalar::Scalar;
