//! Non-owning strided tensor views.
//!
//! A view describes one operand of a contraction: element type, shape,
//! strides (in elements, possibly negative or zero), and a mode label per
//! axis. Views never own data; they borrow a caller-owned slice for the
//! duration of a single contraction call and are validated on construction
//! so that every downstream access stays inside the backing buffer.

use crate::error::ContractError;
use crate::scalar::{ElementType, Scalar};
use crate::strides::{column_major_strides, offset_span};

/// Borrowed shape/stride/mode descriptor of one operand.
///
/// This is what mode analysis consumes; it carries no element type and no
/// data reference.
#[derive(Debug, Clone, Copy)]
pub struct OperandLayout<'a> {
    pub shape: &'a [usize],
    pub strides: &'a [isize],
    pub modes: &'a [i32],
}

fn validate_layout(
    shape: &[usize],
    strides: &[isize],
    modes: &[i32],
    offset: usize,
    len: usize,
) -> Result<(), ContractError> {
    let rank = shape.len();
    if strides.len() != rank {
        return Err(ContractError::ShapeMismatch {
            what: "strides",
            rank,
            actual: strides.len(),
        });
    }
    if modes.len() != rank {
        return Err(ContractError::ShapeMismatch {
            what: "modes",
            rank,
            actual: modes.len(),
        });
    }

    // Empty views address nothing; any offset is acceptable.
    if let Some((lo, hi)) = offset_span(shape, strides) {
        let min = offset as isize + lo;
        let max = offset as isize + hi;
        if min < 0 || max >= len as isize {
            return Err(ContractError::OutOfBounds { min, max, len });
        }
    }
    Ok(())
}

/// Read-only strided view over a caller-owned buffer.
#[derive(Debug, Clone)]
pub struct TensorView<'a, T: Scalar> {
    data: &'a [T],
    offset: usize,
    shape: Vec<usize>,
    strides: Vec<isize>,
    modes: Vec<i32>,
}

impl<'a, T: Scalar> TensorView<'a, T> {
    /// Create a view with explicit strides and origin offset.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ShapeMismatch`] if `strides` or `modes`
    /// disagree with the rank implied by `shape`, and
    /// [`ContractError::OutOfBounds`] if any addressable element falls
    /// outside `data`.
    ///
    /// # Examples
    ///
    /// ```
    /// use modemul::TensorView;
    ///
    /// // A 2x3 row-major matrix labeled with modes 0 and 2.
    /// let data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
    /// let v = TensorView::new(&data, 0, &[2, 3], &[3, 1], &[0, 2]).unwrap();
    /// assert_eq!(v.rank(), 2);
    /// ```
    pub fn new(
        data: &'a [T],
        offset: usize,
        shape: &[usize],
        strides: &[isize],
        modes: &[i32],
    ) -> Result<Self, ContractError> {
        validate_layout(shape, strides, modes, offset, data.len())?;
        Ok(Self {
            data,
            offset,
            shape: shape.to_vec(),
            strides: strides.to_vec(),
            modes: modes.to_vec(),
        })
    }

    /// Create a contiguous column-major view over `data`.
    pub fn from_slice(
        data: &'a [T],
        shape: &[usize],
        modes: &[i32],
    ) -> Result<Self, ContractError> {
        let strides = column_major_strides(shape);
        Self::new(data, 0, shape, &strides, modes)
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn modes(&self) -> &[i32] {
        &self.modes
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        self.data
    }

    /// The runtime tag of this view's element type.
    #[inline]
    pub fn element_type(&self) -> ElementType {
        T::ELEMENT
    }

    /// Shape/stride/mode descriptor for mode analysis.
    #[inline]
    pub fn layout(&self) -> OperandLayout<'_> {
        OperandLayout {
            shape: &self.shape,
            strides: &self.strides,
            modes: &self.modes,
        }
    }
}

/// Exclusively borrowed strided view; the contraction destination.
#[derive(Debug)]
pub struct TensorViewMut<'a, T: Scalar> {
    data: &'a mut [T],
    offset: usize,
    shape: Vec<usize>,
    strides: Vec<isize>,
    modes: Vec<i32>,
}

impl<'a, T: Scalar> TensorViewMut<'a, T> {
    /// Create a mutable view with explicit strides and origin offset.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TensorView::new`].
    pub fn new(
        data: &'a mut [T],
        offset: usize,
        shape: &[usize],
        strides: &[isize],
        modes: &[i32],
    ) -> Result<Self, ContractError> {
        validate_layout(shape, strides, modes, offset, data.len())?;
        Ok(Self {
            data,
            offset,
            shape: shape.to_vec(),
            strides: strides.to_vec(),
            modes: modes.to_vec(),
        })
    }

    /// Create a contiguous column-major mutable view over `data`.
    pub fn from_slice(
        data: &'a mut [T],
        shape: &[usize],
        modes: &[i32],
    ) -> Result<Self, ContractError> {
        let strides = column_major_strides(shape);
        Self::new(data, 0, shape, &strides, modes)
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn modes(&self) -> &[i32] {
        &self.modes
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data
    }

    /// The runtime tag of this view's element type.
    #[inline]
    pub fn element_type(&self) -> ElementType {
        T::ELEMENT
    }

    /// Shape/stride/mode descriptor for mode analysis.
    #[inline]
    pub fn layout(&self) -> OperandLayout<'_> {
        OperandLayout {
            shape: &self.shape,
            strides: &self.strides,
            modes: &self.modes,
        }
    }
}
