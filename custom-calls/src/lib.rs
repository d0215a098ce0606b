// Kernel signatures mirror LAPACK/CBLAS argument lists.
#![allow(clippy::too_many_arguments)]

//! # Custom Calls
//!
//! Batched LAPACK/BLAS kernels behind a rank/type-erased buffer-descriptor
//! C ABI. Every entry point has the shape
//!
//! ```c
//! void kernel(void **inputs, void **outputs);
//! ```
//!
//! where each handle points at an [`EncodedMemref`]. Six kernels are exported:
//!
//! | symbol          | native routine        | inputs | outputs |
//! |-----------------|-----------------------|--------|---------|
//! | `lapack_dgesdd` | `dgesdd` (SVD)        | 7      | 7       |
//! | `lapack_dsyevd` | `dsyevd` (eigh)       | 4      | 5       |
//! | `blas_dtrsm`    | `dtrsm`               | 10     | 1       |
//! | `blas_ztrsm`    | `ztrsm`               | 10     | 1       |
//! | `lapack_dgetrf` | `dgetrf` (LU)         | 4      | 3       |
//! | `lapack_zgetrf` | `zgetrf` (LU)         | 4      | 3       |
//!
//! The positional layout of each frame lives in [`frame`]; per-kernel leading
//! dimensions and batch strides in [`shape`]; the shared batch loop and
//! alias copy in [`batch`]. Native routines are reached through the
//! [`Native`] trait, implemented for production by [`Lapacke`].
//!
//! Nothing is validated: arity, element types and shapes are the caller's
//! responsibility. Per-element status codes are written to the caller's
//! status slots and never inspected.

pub mod batch;
pub mod descriptor;
pub mod ffi;
pub mod frame;
pub mod kernels;
pub mod native;
pub mod shape;

#[cfg(test)]
pub(crate) mod recording;

pub use batch::{AliasCopy, Batch, Strided};
pub use descriptor::{decode, EncodedArgs, EncodedMemref};
pub use frame::{EighFrame, LuFrame, SvdFrame, TrsmFrame, TrsmOp};
pub use native::{Element, Lapacke, Native};
pub use shape::{EighShape, LuShape, SvdShape, TrsmShape};
