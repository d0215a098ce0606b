//! The batched strided invocation shared by every kernel.
//!
//! A kernel seeds its output matrix with [`AliasCopy`], then lets [`Batch`]
//! call the native routine once per element, handing it each buffer role's
//! pointer from a [`Strided`].

use crate::shape::dim;

/// One buffer role: a base pointer advanced by `stride` elements per batch
/// element.
#[derive(Debug, Clone, Copy)]
pub struct Strided<T> {
    base: *mut T,
    stride: usize,
}

impl<T> Strided<T> {
    pub fn new(base: *mut T, stride: usize) -> Self {
        Self { base, stride }
    }

    /// A role that does not advance (shared workspace).
    pub fn fixed(base: *mut T) -> Self {
        Self::new(base, 0)
    }

    /// Pointer for batch element `i`. Computed without dereferencing.
    #[inline]
    pub fn at(&self, i: usize) -> *mut T {
        self.base.wrapping_add(i * self.stride)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

/// Seeds the output matrix with the input before a destructive native call.
///
/// Equal addresses mean the caller asked for in-place operation and nothing
/// is copied. Otherwise the whole batch is copied at once.
#[derive(Debug, Clone, Copy)]
pub struct AliasCopy<T> {
    src: *const T,
    dst: *mut T,
    len: usize,
}

impl<T> AliasCopy<T> {
    pub fn new(src: *const T, dst: *mut T, len: usize) -> Self {
        Self { src, dst, len }
    }

    pub fn is_in_place(&self) -> bool {
        std::ptr::eq(self.src, self.dst)
    }

    /// Copy `len` elements from `src` to `dst` unless they alias. Returns
    /// whether a copy happened.
    ///
    /// # Safety
    /// Both buffers must be valid for `len` elements and either be the same
    /// buffer or not overlap.
    pub unsafe fn apply(&self) -> bool {
        if self.is_in_place() || self.len == 0 {
            return false;
        }
        log::debug!(
            "seeding output with {} elements ({} bytes)",
            self.len,
            self.len * std::mem::size_of::<T>()
        );
        std::ptr::copy_nonoverlapping(self.src, self.dst, self.len);
        true
    }
}

/// Sequential loop over the batch elements of one dispatch call.
#[derive(Debug, Clone, Copy)]
pub struct Batch {
    name: &'static str,
    count: usize,
}

impl Batch {
    pub fn new(name: &'static str, count: i32) -> Self {
        Self {
            name,
            count: dim(count),
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Call `f` with every batch index in ascending order.
    pub fn run(&self, mut f: impl FnMut(usize)) {
        for i in 0..self.count {
            f(i);
        }
    }
}
