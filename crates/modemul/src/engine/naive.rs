//! Strided loop fallback.
//!
//! Handles every plan the GEMM path cannot express: batch modes carried by
//! all three operands, summed modes living in only one source, and
//! broadcast (zero) strides. Offsets are walked directly from the plan's
//! per-operand strides, so no permutation or packing is needed.

use crate::plan::ContractionPlan;
use crate::scalar::Scalar;
use crate::strides::linear_to_cartesian;

use super::StridedTensor;

pub(super) fn mult_strided<T: Scalar>(
    dest: &StridedTensor<'_, T>,
    src1: &StridedTensor<'_, T>,
    src2: &StridedTensor<'_, T>,
    plan: &ContractionPlan,
) {
    let free_extents = plan.free_extents();
    let summed_extents = plan.summed_extents();

    // Product over an empty axis list is 1, so a rank-0 destination still
    // receives its single element; a zero extent anywhere empties the loop.
    let n_free: usize = free_extents.iter().product();
    let n_summed: usize = summed_extents.iter().product();

    for out_linear in 0..n_free {
        let out_idx = linear_to_cartesian(out_linear, &free_extents);

        let mut d_off = dest.origin();
        let mut a_base = src1.origin();
        let mut b_base = src2.origin();
        for (i, ax) in plan.free.iter().enumerate() {
            let k = out_idx[i] as isize;
            d_off += k * ax.dest.unwrap_or(0);
            a_base += k * ax.src1.unwrap_or(0);
            b_base += k * ax.src2.unwrap_or(0);
        }

        let mut sum = T::zero();
        for sum_linear in 0..n_summed {
            let sum_idx = linear_to_cartesian(sum_linear, &summed_extents);

            let mut a_off = a_base;
            let mut b_off = b_base;
            for (i, ax) in plan.summed.iter().enumerate() {
                let k = sum_idx[i] as isize;
                a_off += k * ax.src1.unwrap_or(0);
                b_off += k * ax.src2.unwrap_or(0);
            }

            // SAFETY: every offset reachable from the plan was bounds-checked
            // against these handles in `mult` before the loops started.
            sum = sum + unsafe { src1.read(a_off) } * unsafe { src2.read(b_off) };
        }

        // SAFETY: as above, and `dest` is the exclusively borrowed
        // destination of this call.
        unsafe { dest.write(d_off, sum) };
    }
}

#[cfg(test)]
mod tests {
    use faer::Par;

    use crate::engine::{StridedTensor, mult};
    use crate::plan::ContractionPlan;
    use crate::view::{TensorView, TensorViewMut};

    #[test]
    fn test_batch_mode_contraction() {
        // dest[i] = sum_j src1[i,j] * src2[j,i]: mode 0 batches all three.
        let a = [1.0f64, 4.0, 2.0, 5.0, 3.0, 6.0]; // 2x3 column-major
        let b = [1.0f64, 1.0, 1.0, 1.0, 1.0, 1.0]; // 3x2 column-major
        let mut c = [0.0f64; 2];

        let src1 = TensorView::from_slice(&a, &[2, 3], &[0, 1]).unwrap();
        let src2 = TensorView::from_slice(&b, &[3, 2], &[1, 0]).unwrap();
        let mut dest = TensorViewMut::from_slice(&mut c, &[2], &[0]).unwrap();

        let plan =
            ContractionPlan::build(dest.layout(), src1.layout(), src2.layout()).unwrap();
        assert!(!plan.is_gemm_compatible());

        mult(
            &StridedTensor::exclusive(&mut dest),
            &StridedTensor::shared(&src1),
            &StridedTensor::shared(&src2),
            &plan,
            Par::Seq,
        )
        .unwrap();

        assert_eq!(c, [1.0 + 2.0 + 3.0, 4.0 + 5.0 + 6.0]);
    }

    #[test]
    fn test_one_sided_row_sum() {
        // dest[i] = sum_j src1[i,j] * src2[i]: mode 1 lives only in src1.
        let a = [1.0f64, 4.0, 2.0, 5.0, 3.0, 6.0]; // 2x3 column-major
        let b = [10.0f64, 100.0];
        let mut c = [0.0f64; 2];

        let src1 = TensorView::from_slice(&a, &[2, 3], &[0, 1]).unwrap();
        let src2 = TensorView::from_slice(&b, &[2], &[0]).unwrap();
        let mut dest = TensorViewMut::from_slice(&mut c, &[2], &[0]).unwrap();

        let plan =
            ContractionPlan::build(dest.layout(), src1.layout(), src2.layout()).unwrap();
        assert!(!plan.is_gemm_compatible());

        mult(
            &StridedTensor::exclusive(&mut dest),
            &StridedTensor::shared(&src1),
            &StridedTensor::shared(&src2),
            &plan,
            Par::Seq,
        )
        .unwrap();

        assert_eq!(c, [60.0, 1500.0]);
    }

    #[test]
    fn test_zero_extent_sum_writes_zeros() {
        let a: [f64; 0] = [];
        let b: [f64; 0] = [];
        let mut c = [7.0f64, 7.0];

        let src1 = TensorView::new(&a, 0, &[2, 0], &[0, 1], &[0, 1]).unwrap();
        let src2 = TensorView::new(&b, 0, &[0], &[1], &[1]).unwrap();
        let mut dest = TensorViewMut::from_slice(&mut c, &[2], &[0]).unwrap();

        let plan =
            ContractionPlan::build(dest.layout(), src1.layout(), src2.layout()).unwrap();

        mult(
            &StridedTensor::exclusive(&mut dest),
            &StridedTensor::shared(&src1),
            &StridedTensor::shared(&src2),
            &plan,
            Par::Seq,
        )
        .unwrap();

        // Summing over an empty index space overwrites with zeros.
        assert_eq!(c, [0.0, 0.0]);
    }
}
