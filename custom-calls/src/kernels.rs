//! The six batched handlers.
//!
//! Each one derives its shape, seeds the output matrix, then calls the
//! native routine once per batch element with every role advanced by its
//! own stride. Status codes go to the caller's per-element slots unread.

use dispatch_core::{Complex64, SvdJob};

use crate::batch::{AliasCopy, Batch, Strided};
use crate::frame::{EighFrame, LuFrame, SvdFrame, TrsmFrame};
use crate::native::{Element, Native};
use crate::shape::{dim, EighShape, LuShape, SvdShape, TrsmShape};

/// Batched SVD.
///
/// # Safety
/// Every pointer in `frame` must cover `batch` slices of its role.
pub unsafe fn dgesdd<N: Native>(native: &mut N, frame: SvdFrame) {
    let batch = Batch::new("lapack_dgesdd", frame.batch);
    let shape = SvdShape::new(frame.m, frame.n, frame.full_matrices);
    let job = SvdJob::from_flags(frame.compute_uv, frame.full_matrices);
    log::trace!(
        "{}: batch={} m={} n={} jobz={} ldu={} tdu={} ldvt={}",
        batch.name(),
        batch.len(),
        shape.m,
        shape.n,
        job.as_char() as char,
        shape.ldu,
        shape.tdu,
        shape.ldvt
    );

    AliasCopy::new(frame.a_in, frame.a, batch.len() * shape.a_stride()).apply();

    let a = Strided::new(frame.a, shape.a_stride());
    let s = Strided::new(frame.s, shape.s_stride());
    let u = Strided::new(frame.u, shape.u_stride());
    let vt = Strided::new(frame.vt, shape.vt_stride());
    let info = Strided::new(frame.info, 1);
    let lwork = dim(frame.lwork);

    batch.run(|i| {
        *info.at(i) = native.dgesdd(
            job,
            &shape,
            a.at(i),
            s.at(i),
            u.at(i),
            vt.at(i),
            frame.work,
            lwork,
            frame.iwork,
        );
    });
}

/// Batched symmetric eigendecomposition; eigenvectors overwrite A.
///
/// # Safety
/// Every pointer in `frame` must cover `batch` slices of its role; `work`
/// and `iwork` must hold the sizes in [`EighShape`].
pub unsafe fn dsyevd<N: Native>(native: &mut N, frame: EighFrame) {
    let batch = Batch::new("lapack_dsyevd", frame.batch);
    let shape = EighShape::new(frame.n);
    let uplo = frame.uplo();
    log::trace!(
        "{}: batch={} n={} uplo={} lwork={} liwork={}",
        batch.name(),
        batch.len(),
        shape.n,
        uplo.as_char() as char,
        shape.lwork,
        shape.liwork
    );

    AliasCopy::new(frame.a_in, frame.a, batch.len() * shape.a_stride()).apply();

    let a = Strided::new(frame.a, shape.a_stride());
    let w = Strided::new(frame.w, shape.w_stride());
    let info = Strided::new(frame.info, 1);

    batch.run(|i| {
        *info.at(i) = native.dsyevd(uplo, &shape, a.at(i), w.at(i), frame.work, frame.iwork);
    });
}

/// Batched triangular solve, `X <- alpha * op(A)^-1 X` (left) or
/// `X <- alpha * X op(A)^-1` (right), with X seeded from B.
///
/// # Safety
/// `a`, `b` and `x` must cover `batch` slices; B must be square.
pub unsafe fn trsm<T: Element, N: Native>(native: &mut N, frame: TrsmFrame<T>) {
    let batch = Batch::new(T::TRSM, frame.batch);
    let shape = TrsmShape::new(frame.op.is_left(), frame.m, frame.n);
    log::trace!(
        "{}: batch={} m={} n={} lda={} ldb={} op={:?}",
        batch.name(),
        batch.len(),
        shape.m,
        shape.n,
        shape.lda,
        shape.ldb,
        frame.op
    );

    AliasCopy::new(frame.b, frame.x, batch.len() * shape.x_stride()).apply();

    let a = Strided::new(frame.a as *mut T, shape.a_stride());
    let x = Strided::new(frame.x, shape.x_stride());

    batch.run(|i| {
        T::trsm(native, &frame.op, &shape, frame.alpha, a.at(i), x.at(i));
    });
}

/// Batched LU factorization with partial pivoting.
///
/// # Safety
/// Every pointer in `frame` must cover `batch` slices of its role.
pub unsafe fn getrf<T: Element, N: Native>(native: &mut N, frame: LuFrame<T>) {
    let batch = Batch::new(T::GETRF, frame.batch);
    let shape = LuShape::new(frame.m, frame.n);
    log::trace!(
        "{}: batch={} m={} n={} lda={}",
        batch.name(),
        batch.len(),
        shape.m,
        shape.n,
        shape.lda
    );

    AliasCopy::new(frame.a_in, frame.a, batch.len() * shape.a_stride()).apply();

    let a = Strided::new(frame.a, shape.a_stride());
    let ipiv = Strided::new(frame.ipiv, shape.ipiv_stride());
    let info = Strided::new(frame.info, 1);

    batch.run(|i| {
        *info.at(i) = T::getrf(native, &shape, a.at(i), ipiv.at(i));
    });
}

pub unsafe fn dtrsm<N: Native>(native: &mut N, frame: TrsmFrame<f64>) {
    trsm(native, frame)
}

pub unsafe fn ztrsm<N: Native>(native: &mut N, frame: TrsmFrame<Complex64>) {
    trsm(native, frame)
}

pub unsafe fn dgetrf<N: Native>(native: &mut N, frame: LuFrame<f64>) {
    getrf(native, frame)
}

pub unsafe fn zgetrf<N: Native>(native: &mut N, frame: LuFrame<Complex64>) {
    getrf(native, frame)
}
