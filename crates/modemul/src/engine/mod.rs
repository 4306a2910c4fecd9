//! Numerical engine boundary.
//!
//! The engine receives one [`StridedTensor`] handle per operand plus the
//! validated [`ContractionPlan`] and performs the generalized
//! multiply-and-accumulate over shared modes, writing the destination in a
//! single pass with identity scale. Two implementations sit behind
//! [`mult`]:
//!
//! - `gemm`: pack the sources, run `faer::linalg::matmul`, scatter into the
//!   destination (used when the plan is GEMM-shaped)
//! - `naive`: strided loop fallback covering batch modes, one-sided sums
//!   and broadcast strides
//!
//! The heavy arithmetic is faer's; this module only adapts strided,
//! mode-labeled operands to its calling convention.

mod gemm;
mod naive;

use std::marker::PhantomData;

use faer::Par;

use crate::error::ContractError;
use crate::plan::{ContractionPlan, LoopAxis};
use crate::scalar::Scalar;
use crate::strides::offset_span;
use crate::view::{TensorView, TensorViewMut};

/// Engine-native tensor handle: a non-owning raw descriptor bound to the
/// same memory as the view it was built from. No data is copied.
///
/// The engine calling convention addresses every operand through a mutable
/// pointer, destination or not. [`StridedTensor::shared`] is therefore the
/// one place where a read-only borrow is cast to that convention; the
/// engine must never write through a handle that is not the destination of
/// the call.
pub struct StridedTensor<'a, T> {
    ptr: *mut T,
    len: usize,
    origin: isize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: Scalar> StridedTensor<'a, T> {
    /// Build the destination handle from an exclusively borrowed view.
    pub fn exclusive(view: &'a mut TensorViewMut<'_, T>) -> Self {
        let origin = view.offset() as isize;
        let data = view.data_mut();
        Self {
            ptr: data.as_mut_ptr(),
            len: data.len(),
            origin,
            _marker: PhantomData,
        }
    }

    /// Build a source handle from a shared view.
    ///
    /// The pointer is cast to mutable solely to satisfy the engine calling
    /// convention; the engine does not mutate operands that are not the
    /// destination, so no mutable alias of source data ever escapes.
    pub fn shared(view: &'a TensorView<'_, T>) -> Self {
        let data = view.data();
        Self {
            ptr: data.as_ptr() as *mut T,
            len: data.len(),
            origin: view.offset() as isize,
            _marker: PhantomData,
        }
    }

    /// Element offset of the view origin within the backing buffer.
    #[inline]
    pub fn origin(&self) -> isize {
        self.origin
    }

    /// Length of the backing buffer, in elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the element at an absolute buffer offset.
    ///
    /// # Safety
    ///
    /// `offset` must lie within `0..len`, which [`mult`] establishes for
    /// every offset the plan can produce before any element is touched.
    #[inline]
    pub(crate) unsafe fn read(&self, offset: isize) -> T {
        debug_assert!(offset >= 0 && (offset as usize) < self.len);
        unsafe { *self.ptr.offset(offset) }
    }

    /// Write the element at an absolute buffer offset.
    ///
    /// # Safety
    ///
    /// Same bounds contract as [`StridedTensor::read`], and the handle must
    /// be the destination of the call.
    #[inline]
    pub(crate) unsafe fn write(&self, offset: isize, value: T) {
        debug_assert!(offset >= 0 && (offset as usize) < self.len);
        unsafe { *self.ptr.offset(offset) = value }
    }
}

/// Extents and strides of the plan axes one operand actually carries.
fn operand_axes(
    plan: &ContractionPlan,
    pick: impl Fn(&LoopAxis) -> Option<isize>,
) -> (Vec<usize>, Vec<isize>) {
    let mut shape = Vec::new();
    let mut strides = Vec::new();
    for ax in plan.free.iter().chain(plan.summed.iter()) {
        if let Some(stride) = pick(ax) {
            shape.push(ax.extent);
            strides.push(stride);
        }
    }
    (shape, strides)
}

fn check_handle<T>(
    handle: &StridedTensor<'_, T>,
    shape: &[usize],
    strides: &[isize],
) -> Result<(), ContractError> {
    if let Some((lo, hi)) = offset_span(shape, strides) {
        let min = handle.origin + lo;
        let max = handle.origin + hi;
        if min < 0 || max >= handle.len as isize {
            return Err(ContractError::OutOfBounds {
                min,
                max,
                len: handle.len,
            });
        }
    }
    Ok(())
}

/// Generalized tensor multiply: for every assignment of the plan's free
/// modes, write the sum over all summed-mode assignments of the product of
/// the two source elements. Identity scale, one write pass over the
/// destination, `par` selects the execution context of the underlying
/// matmul.
///
/// # Errors
///
/// Returns [`ContractError::OutOfBounds`] if the plan addresses memory
/// outside a handle's buffer. This is re-verified here so the unchecked
/// element accesses below stay sound even if a caller pairs a plan with
/// handles it was not built from.
pub fn mult<T: Scalar>(
    dest: &StridedTensor<'_, T>,
    src1: &StridedTensor<'_, T>,
    src2: &StridedTensor<'_, T>,
    plan: &ContractionPlan,
    par: Par,
) -> Result<(), ContractError> {
    let (d_shape, d_strides) = operand_axes(plan, |ax| ax.dest);
    check_handle(dest, &d_shape, &d_strides)?;
    let (a_shape, a_strides) = operand_axes(plan, |ax| ax.src1);
    check_handle(src1, &a_shape, &a_strides)?;
    let (b_shape, b_strides) = operand_axes(plan, |ax| ax.src2);
    check_handle(src2, &b_shape, &b_strides)?;

    if plan.is_gemm_compatible() {
        gemm::mult_gemm(dest, src1, src2, plan, par);
    } else {
        naive::mult_strided(dest, src1, src2, plan);
    }
    Ok(())
}
