//! A [`Native`] that records every call instead of computing.

use dispatch_core::{Complex64, SvdJob, Uplo};

use crate::frame::TrsmOp;
use crate::native::Native;
use crate::shape::{EighShape, LuShape, SvdShape, TrsmShape};

/// One intercepted native call. Pointers are kept as addresses; `entry` is
/// the primary matrix as the routine found it (complex values interleaved).
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Gesdd {
        job: SvdJob,
        m: usize,
        n: usize,
        a: usize,
        s: usize,
        u: usize,
        vt: usize,
        work: usize,
        lwork: usize,
        iwork: usize,
        entry: Vec<f64>,
    },
    Syevd {
        uplo: Uplo,
        n: usize,
        a: usize,
        w: usize,
        work: usize,
        iwork: usize,
        entry: Vec<f64>,
    },
    Trsm {
        complex: bool,
        op: TrsmOp,
        lda: usize,
        ldb: usize,
        alpha: (f64, f64),
        a: usize,
        b: usize,
        entry: Vec<f64>,
    },
    Getrf {
        complex: bool,
        m: usize,
        n: usize,
        lda: usize,
        a: usize,
        ipiv: usize,
        entry: Vec<f64>,
    },
}

#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub calls: Vec<Call>,
    /// Overwrite the matrix with `-1.0` after the snapshot.
    scribble: bool,
}

impl Recorder {
    pub fn scribbling() -> Self {
        Self {
            calls: Vec::new(),
            scribble: true,
        }
    }

    /// Status each of the first `b` calls reported.
    pub fn statuses(&self, b: usize) -> Vec<i32> {
        (0..b).map(|i| 100 + i as i32).collect()
    }

    fn next_status(&self) -> i32 {
        100 + self.calls.len() as i32
    }

    unsafe fn take(&self, a: *mut f64, len: usize) -> Vec<f64> {
        if a.is_null() || len == 0 {
            return Vec::new();
        }
        let entry = std::slice::from_raw_parts(a, len).to_vec();
        if self.scribble {
            std::slice::from_raw_parts_mut(a, len).fill(-1.0);
        }
        entry
    }
}

impl Native for Recorder {
    unsafe fn dgesdd(
        &mut self,
        job: SvdJob,
        shape: &SvdShape,
        a: *mut f64,
        s: *mut f64,
        u: *mut f64,
        vt: *mut f64,
        work: *mut f64,
        lwork: usize,
        iwork: *mut i32,
    ) -> i32 {
        let status = self.next_status();
        let entry = self.take(a, shape.a_stride());
        self.calls.push(Call::Gesdd {
            job,
            m: shape.m,
            n: shape.n,
            a: a as usize,
            s: s as usize,
            u: u as usize,
            vt: vt as usize,
            work: work as usize,
            lwork,
            iwork: iwork as usize,
            entry,
        });
        status
    }

    unsafe fn dsyevd(
        &mut self,
        uplo: Uplo,
        shape: &EighShape,
        a: *mut f64,
        w: *mut f64,
        work: *mut f64,
        iwork: *mut i32,
    ) -> i32 {
        let status = self.next_status();
        let entry = self.take(a, shape.a_stride());
        self.calls.push(Call::Syevd {
            uplo,
            n: shape.n,
            a: a as usize,
            w: w as usize,
            work: work as usize,
            iwork: iwork as usize,
            entry,
        });
        status
    }

    unsafe fn dtrsm(
        &mut self,
        op: &TrsmOp,
        shape: &TrsmShape,
        alpha: f64,
        a: *const f64,
        b: *mut f64,
    ) {
        let entry = self.take(b, shape.x_stride());
        self.calls.push(Call::Trsm {
            complex: false,
            op: *op,
            lda: shape.lda,
            ldb: shape.ldb,
            alpha: (alpha, 0.0),
            a: a as usize,
            b: b as usize,
            entry,
        });
    }

    unsafe fn ztrsm(
        &mut self,
        op: &TrsmOp,
        shape: &TrsmShape,
        alpha: Complex64,
        a: *const Complex64,
        b: *mut Complex64,
    ) {
        let entry = self.take(b as *mut f64, 2 * shape.x_stride());
        self.calls.push(Call::Trsm {
            complex: true,
            op: *op,
            lda: shape.lda,
            ldb: shape.ldb,
            alpha: (alpha.re, alpha.im),
            a: a as usize,
            b: b as usize,
            entry,
        });
    }

    unsafe fn dgetrf(&mut self, shape: &LuShape, a: *mut f64, ipiv: *mut i32) -> i32 {
        let status = self.next_status();
        let entry = self.take(a, shape.a_stride());
        self.calls.push(Call::Getrf {
            complex: false,
            m: shape.m,
            n: shape.n,
            lda: shape.lda,
            a: a as usize,
            ipiv: ipiv as usize,
            entry,
        });
        status
    }

    unsafe fn zgetrf(&mut self, shape: &LuShape, a: *mut Complex64, ipiv: *mut i32) -> i32 {
        let status = self.next_status();
        let entry = self.take(a as *mut f64, 2 * shape.a_stride());
        self.calls.push(Call::Getrf {
            complex: true,
            m: shape.m,
            n: shape.n,
            lda: shape.lda,
            a: a as usize,
            ipiv: ipiv as usize,
            entry,
        });
        status
    }
}
