//! Task context: the three operands of one contraction call.
//!
//! The task framework hands operands over with the element type known only
//! at runtime, so each operand is wrapped in an enum over the four
//! supported kinds. The per-variant entry points in
//! [`dispatch`](crate::dispatch) match the wrappers back to one typed
//! specialization.

use crate::error::ContractError;
use crate::plan::ContractionPlan;
use crate::scalar::{ElementType, c32, c64};
use crate::view::{OperandLayout, TensorView, TensorViewMut};

/// A source operand of any supported element type.
#[derive(Debug)]
pub enum AnySource<'a> {
    F32(TensorView<'a, f32>),
    F64(TensorView<'a, f64>),
    C32(TensorView<'a, c32>),
    C64(TensorView<'a, c64>),
}

impl<'a> AnySource<'a> {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::F32(v) => v.element_type(),
            Self::F64(v) => v.element_type(),
            Self::C32(v) => v.element_type(),
            Self::C64(v) => v.element_type(),
        }
    }

    pub fn layout(&self) -> OperandLayout<'_> {
        match self {
            Self::F32(v) => v.layout(),
            Self::F64(v) => v.layout(),
            Self::C32(v) => v.layout(),
            Self::C64(v) => v.layout(),
        }
    }
}

impl<'a> From<TensorView<'a, f32>> for AnySource<'a> {
    fn from(view: TensorView<'a, f32>) -> Self {
        Self::F32(view)
    }
}

impl<'a> From<TensorView<'a, f64>> for AnySource<'a> {
    fn from(view: TensorView<'a, f64>) -> Self {
        Self::F64(view)
    }
}

impl<'a> From<TensorView<'a, c32>> for AnySource<'a> {
    fn from(view: TensorView<'a, c32>) -> Self {
        Self::C32(view)
    }
}

impl<'a> From<TensorView<'a, c64>> for AnySource<'a> {
    fn from(view: TensorView<'a, c64>) -> Self {
        Self::C64(view)
    }
}

/// The destination operand of any supported element type.
#[derive(Debug)]
pub enum AnyDest<'a> {
    F32(TensorViewMut<'a, f32>),
    F64(TensorViewMut<'a, f64>),
    C32(TensorViewMut<'a, c32>),
    C64(TensorViewMut<'a, c64>),
}

impl<'a> AnyDest<'a> {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::F32(v) => v.element_type(),
            Self::F64(v) => v.element_type(),
            Self::C32(v) => v.element_type(),
            Self::C64(v) => v.element_type(),
        }
    }

    pub fn layout(&self) -> OperandLayout<'_> {
        match self {
            Self::F32(v) => v.layout(),
            Self::F64(v) => v.layout(),
            Self::C32(v) => v.layout(),
            Self::C64(v) => v.layout(),
        }
    }
}

impl<'a> From<TensorViewMut<'a, f32>> for AnyDest<'a> {
    fn from(view: TensorViewMut<'a, f32>) -> Self {
        Self::F32(view)
    }
}

impl<'a> From<TensorViewMut<'a, f64>> for AnyDest<'a> {
    fn from(view: TensorViewMut<'a, f64>) -> Self {
        Self::F64(view)
    }
}

impl<'a> From<TensorViewMut<'a, c32>> for AnyDest<'a> {
    fn from(view: TensorViewMut<'a, c32>) -> Self {
        Self::C32(view)
    }
}

impl<'a> From<TensorViewMut<'a, c64>> for AnyDest<'a> {
    fn from(view: TensorViewMut<'a, c64>) -> Self {
        Self::C64(view)
    }
}

/// One contraction request: destination plus two sources.
///
/// Contexts are transient; they borrow the operand buffers for a single
/// submit and are never retained by the dispatch layer.
#[derive(Debug)]
pub struct TaskContext<'a> {
    pub dest: AnyDest<'a>,
    pub src1: AnySource<'a>,
    pub src2: AnySource<'a>,
}

impl<'a> TaskContext<'a> {
    pub fn new(
        dest: impl Into<AnyDest<'a>>,
        src1: impl Into<AnySource<'a>>,
        src2: impl Into<AnySource<'a>>,
    ) -> Self {
        Self {
            dest: dest.into(),
            src1: src1.into(),
            src2: src2.into(),
        }
    }

    /// Element-type tags of (destination, source 1, source 2).
    pub fn element_types(&self) -> (ElementType, ElementType, ElementType) {
        (
            self.dest.element_type(),
            self.src1.element_type(),
            self.src2.element_type(),
        )
    }

    /// Full fail-fast validation: one shared element type, then mode and
    /// extent analysis. Nothing is written on failure.
    pub fn validate(&self) -> Result<(), ContractError> {
        let (dest, src1, src2) = self.element_types();
        if dest != src1 || dest != src2 {
            return Err(ContractError::TypeMismatch { dest, src1, src2 });
        }
        ContractionPlan::build(
            self.dest.layout(),
            self.src1.layout(),
            self.src2.layout(),
        )?;
        Ok(())
    }
}
