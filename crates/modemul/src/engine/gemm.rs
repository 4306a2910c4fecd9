//! GEMM-based contraction path.
//!
//! When every free mode lives in exactly one source and every summed mode
//! pairs both sources, the contraction is a single matrix product
//! `C(m, n) = A(m, k) * B(k, n)` with `m` the free modes of source 1, `n`
//! the free modes of source 2 and `k` the summed modes. The sources are
//! packed into column-major scratch buffers, faer's `matmul` does the
//! arithmetic, and the result is scattered through the destination's
//! strides.

use faer::linalg::matmul::matmul;
use faer::{Accum, Mat, MatRef, Par};

use crate::plan::{ContractionPlan, LoopAxis};
use crate::scalar::Scalar;
use crate::strides::linear_to_cartesian;

use super::StridedTensor;

fn extent_product(axes: &[&LoopAxis]) -> usize {
    axes.iter().map(|ax| ax.extent).product()
}

/// Pack one source into a column-major `(rows, cols)` buffer, rows indexed
/// by `row_axes` and columns by `col_axes`.
fn pack<T: Scalar>(
    src: &StridedTensor<'_, T>,
    row_axes: &[&LoopAxis],
    col_axes: &[&LoopAxis],
    rows: usize,
    cols: usize,
    pick: impl Fn(&LoopAxis) -> isize,
) -> Vec<T> {
    let row_extents: Vec<usize> = row_axes.iter().map(|ax| ax.extent).collect();
    let col_extents: Vec<usize> = col_axes.iter().map(|ax| ax.extent).collect();

    let mut buf = Vec::with_capacity(rows * cols);
    for col in 0..cols {
        let col_idx = linear_to_cartesian(col, &col_extents);
        let mut col_off = src.origin();
        for (i, ax) in col_axes.iter().enumerate() {
            col_off += col_idx[i] as isize * pick(ax);
        }
        for row in 0..rows {
            let row_idx = linear_to_cartesian(row, &row_extents);
            let mut off = col_off;
            for (i, ax) in row_axes.iter().enumerate() {
                off += row_idx[i] as isize * pick(ax);
            }
            // SAFETY: plan offsets were bounds-checked against this handle
            // in `mult`.
            buf.push(unsafe { src.read(off) });
        }
    }
    buf
}

pub(super) fn mult_gemm<T: Scalar>(
    dest: &StridedTensor<'_, T>,
    src1: &StridedTensor<'_, T>,
    src2: &StridedTensor<'_, T>,
    plan: &ContractionPlan,
    par: Par,
) {
    let m_axes: Vec<&LoopAxis> = plan.free.iter().filter(|ax| ax.src1.is_some()).collect();
    let n_axes: Vec<&LoopAxis> = plan.free.iter().filter(|ax| ax.src2.is_some()).collect();
    let k_axes: Vec<&LoopAxis> = plan.summed.iter().collect();

    let m = extent_product(&m_axes);
    let n = extent_product(&n_axes);
    let k = extent_product(&k_axes);

    if m == 0 || n == 0 {
        return;
    }

    let a_buf = pack(src1, &m_axes, &k_axes, m, k, |ax| ax.src1.unwrap_or(0));
    let b_buf = pack(src2, &k_axes, &n_axes, k, n, |ax| ax.src2.unwrap_or(0));

    let a_mat = MatRef::from_column_major_slice(&a_buf, m, k);
    let b_mat = MatRef::from_column_major_slice(&b_buf, k, n);

    let mut c = Mat::<T>::zeros(m, n);
    matmul(c.as_mut(), Accum::Replace, a_mat, b_mat, T::one(), par);

    let m_extents: Vec<usize> = m_axes.iter().map(|ax| ax.extent).collect();
    let n_extents: Vec<usize> = n_axes.iter().map(|ax| ax.extent).collect();
    for col in 0..n {
        let col_idx = linear_to_cartesian(col, &n_extents);
        let mut col_off = dest.origin();
        for (i, ax) in n_axes.iter().enumerate() {
            col_off += col_idx[i] as isize * ax.dest.unwrap_or(0);
        }
        for row in 0..m {
            let row_idx = linear_to_cartesian(row, &m_extents);
            let mut off = col_off;
            for (i, ax) in m_axes.iter().enumerate() {
                off += row_idx[i] as isize * ax.dest.unwrap_or(0);
            }
            // SAFETY: bounds-checked in `mult`; `dest` is the destination
            // handle of this call.
            unsafe { dest.write(off, c[(row, col)]) };
        }
    }
}
