//! Per-variant contraction entry points and typed specializations.
//!
//! Dispatch is total over the supported (element type, execution variant)
//! pairs: each variant entry point matches the context's operands to
//! exactly one typed specialization, and mixed element types fall through
//! to [`ContractError::TypeMismatch`] before any engine work happens.

use faer::Par;

use crate::context::{AnyDest, AnySource, TaskContext};
use crate::engine::{self, StridedTensor};
use crate::error::ContractError;
use crate::plan::ContractionPlan;
use crate::scalar::Scalar;
use crate::view::{TensorView, TensorViewMut};

/// Selects which execution context performs a contraction.
///
/// Orthogonal to the element type: every variant serves all four element
/// kinds through the same entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionVariant {
    /// Sequential execution on the calling thread.
    Cpu,
    /// Multi-threaded execution through faer's rayon parallelism.
    Parallel,
}

impl ExecutionVariant {
    fn par(self) -> Par {
        match self {
            Self::Cpu => Par::Seq,
            Self::Parallel => Par::rayon(0),
        }
    }
}

/// Typed contraction specialization: validate the mode structure, adapt
/// the three views into engine handles and run the engine primitive.
///
/// The destination receives exactly the Einstein sum over modes absent
/// from it, in `T`'s precision, with no scaling applied.
pub fn contract_into<T: Scalar>(
    dest: &mut TensorViewMut<'_, T>,
    src1: &TensorView<'_, T>,
    src2: &TensorView<'_, T>,
    variant: ExecutionVariant,
) -> Result<(), ContractError> {
    let plan = ContractionPlan::build(dest.layout(), src1.layout(), src2.layout())?;
    engine::mult(
        &StridedTensor::exclusive(dest),
        &StridedTensor::shared(src1),
        &StridedTensor::shared(src2),
        &plan,
        variant.par(),
    )
}

fn run_variant(
    ctx: &mut TaskContext<'_>,
    variant: ExecutionVariant,
) -> Result<(), ContractError> {
    let (dest, src1, src2) = ctx.element_types();
    match (&mut ctx.dest, &ctx.src1, &ctx.src2) {
        (AnyDest::F32(d), AnySource::F32(a), AnySource::F32(b)) => {
            contract_into(d, a, b, variant)
        }
        (AnyDest::F64(d), AnySource::F64(a), AnySource::F64(b)) => {
            contract_into(d, a, b, variant)
        }
        (AnyDest::C32(d), AnySource::C32(a), AnySource::C32(b)) => {
            contract_into(d, a, b, variant)
        }
        (AnyDest::C64(d), AnySource::C64(a), AnySource::C64(b)) => {
            contract_into(d, a, b, variant)
        }
        _ => Err(ContractError::TypeMismatch { dest, src1, src2 }),
    }
}

/// Sequential entry point for one contraction task.
pub fn cpu_variant(ctx: &mut TaskContext<'_>) -> Result<(), ContractError> {
    run_variant(ctx, ExecutionVariant::Cpu)
}

/// Rayon-parallel entry point for one contraction task.
pub fn parallel_variant(ctx: &mut TaskContext<'_>) -> Result<(), ContractError> {
    run_variant(ctx, ExecutionVariant::Parallel)
}
