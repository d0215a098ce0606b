//! Encoded buffer descriptors: the caller's rank/type-erased argument handles.
//!
//! Every kernel receives `void **inputs, void **outputs`. Each entry points at
//! an [`EncodedMemref`]; only its aligned data pointer is consumed. Rank and
//! dtype are never inspected: decoding is purely positional.

use std::ffi::c_void;

/// Caller-side descriptor for one argument buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EncodedMemref {
    pub rank: i64,
    pub data_aligned: *mut c_void,
    pub dtype: i8,
}

impl EncodedMemref {
    pub fn new<T>(data: *mut T, rank: i64, dtype: i8) -> Self {
        Self {
            rank,
            data_aligned: data as *mut c_void,
            dtype,
        }
    }
}

/// Data pointers of the first `N` descriptors in `handles`.
///
/// # Safety
/// `handles` must point to at least `N` pointers, each to a live
/// [`EncodedMemref`]. Arity is not checked.
#[inline]
pub unsafe fn decode<const N: usize>(handles: *const *mut c_void) -> [*mut c_void; N] {
    std::array::from_fn(|i| {
        let memref = *handles.add(i) as *const EncodedMemref;
        (*memref).data_aligned
    })
}

/// Owned argument list in the caller's encoding, for building call frames
/// from Rust (tests, benchmarks, embedding programs).
///
/// The descriptors borrow nothing: the caller keeps the buffers alive for as
/// long as the handle array is in use.
#[derive(Debug, Default)]
pub struct EncodedArgs {
    memrefs: Vec<EncodedMemref>,
    handles: Vec<*mut c_void>,
}

impl EncodedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor for `data`. `rank` is informational.
    pub fn push<T>(&mut self, data: *mut T, rank: i64) -> &mut Self {
        self.memrefs.push(EncodedMemref::new(data, rank, 0));
        self
    }

    pub fn len(&self) -> usize {
        self.memrefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memrefs.is_empty()
    }

    /// The `void **` handle array. Valid until the next `push`.
    pub fn as_mut_ptr(&mut self) -> *mut *mut c_void {
        self.handles = self
            .memrefs
            .iter_mut()
            .map(|m| m as *mut EncodedMemref as *mut c_void)
            .collect();
        self.handles.as_mut_ptr()
    }
}
