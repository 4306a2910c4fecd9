//! Scalar trait for supported element types.

use std::fmt::Debug;
use std::ops::{Add, Mul};

use faer_traits::ComplexField;

pub use faer::{c32, c64};

/// Runtime tag for an element type.
///
/// Exactly one contraction specialization exists per
/// (`ElementType`, [`ExecutionVariant`](crate::dispatch::ExecutionVariant))
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Float32,
    Float64,
    Complex64,
    Complex128,
}

/// Trait for scalar types supported by modemul.
///
/// This trait wraps faer's `ComplexField` with the additional bounds
/// required for strided contraction, and ties each concrete type to its
/// runtime [`ElementType`] tag.
pub trait Scalar:
    ComplexField + Copy + Debug + Default + PartialEq + Add<Output = Self> + Mul<Output = Self> + 'static
{
    /// The runtime tag for this scalar type.
    const ELEMENT: ElementType;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;
}

impl Scalar for f32 {
    const ELEMENT: ElementType = ElementType::Float32;

    fn one() -> Self {
        1.0
    }
}

impl Scalar for f64 {
    const ELEMENT: ElementType = ElementType::Float64;

    fn one() -> Self {
        1.0
    }
}

impl Scalar for c32 {
    const ELEMENT: ElementType = ElementType::Complex64;

    fn one() -> Self {
        c32::new(1.0, 0.0)
    }
}

impl Scalar for c64 {
    const ELEMENT: ElementType = ElementType::Complex128;

    fn one() -> Self {
        c64::new(1.0, 0.0)
    }
}
