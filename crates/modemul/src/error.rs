//! Error types for modemul.

use thiserror::Error;

use crate::dispatch::ExecutionVariant;
use crate::scalar::ElementType;

/// Errors that can occur while validating or dispatching a contraction.
///
/// Every variant is detected before the numerical engine is invoked; once
/// the engine runs, the destination is written in a single pass or the call
/// does not return normally.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Descriptor sequence length inconsistent with the operand's rank.
    #[error("shape mismatch: {what} has {actual} entries for rank {rank}")]
    ShapeMismatch {
        what: &'static str,
        rank: usize,
        actual: usize,
    },

    /// Operands sharing a mode disagree on its extent.
    #[error("extent mismatch for mode {mode}: {extent} vs {other}")]
    ExtentMismatch {
        mode: i32,
        extent: usize,
        other: usize,
    },

    /// Destination mode absent from both sources.
    #[error("destination mode {mode} does not appear in either source")]
    UncoveredMode { mode: i32 },

    /// Mode label repeated within a single operand.
    #[error("mode {mode} repeated within one operand")]
    DuplicateMode { mode: i32 },

    /// View addresses memory beyond its backing buffer.
    #[error("view spans offsets {min}..={max} but buffer holds {len} elements")]
    OutOfBounds { min: isize, max: isize, len: usize },

    /// Operands do not share a single element type.
    #[error("element type mismatch: destination {dest:?}, sources {src1:?} and {src2:?}")]
    TypeMismatch {
        dest: ElementType,
        src1: ElementType,
        src2: ElementType,
    },

    /// No contraction kernel registered for the requested variant.
    ///
    /// This indicates a configuration defect, not a transient condition;
    /// callers must not retry.
    #[error("no contraction kernel registered for variant {variant:?}")]
    UnsupportedOperation { variant: ExecutionVariant },
}
