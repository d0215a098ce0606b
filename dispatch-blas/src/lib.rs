// BLAS functions match CBLAS signatures; many parameters are inherent to the API.
#![allow(clippy::too_many_arguments)]

//! # Dispatch BLAS
//!
//! The BLAS Level 3 routines the dispatch shim needs: `dtrsm` and `ztrsm`.
//!
//! Pure Rust by default; with `--features lapack` every call goes straight to
//! the system `cblas_?trsm`. Both layouts are accepted through the CBLAS-style
//! `Layout` parameter.

pub mod level3;

pub use dispatch_core::layout::{Diag, Layout, Side, Transpose, Uplo};
pub use level3::{dtrsm, trsm, ztrsm};
