//! modemul - mode-labeled tensor contraction dispatch
//!
//! This crate routes generalized (Einstein-summation style) contraction
//! requests over strided tensor views to a numerical engine, handling the
//! per-element-type and per-execution-variant dispatch in between.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Registry (registry module)
//!     → explicit kernel table keyed by ExecutionVariant, populated at
//!       startup; submit = validate, look up, invoke
//!
//! Level 2: Dispatch (dispatch, context modules)
//!     → one entry point per variant; a four-arm element-type match
//!       selects the typed specialization (f32, f64, c32, c64)
//!
//! Level 3: Engine (engine module)
//!     → StridedTensor handles bound to caller memory; GEMM path through
//!       faer's matmul, strided loop fallback
//! ```
//!
//! Views never own data: the destination is exclusively borrowed, sources
//! are shared read-only, all for the duration of a single call. Modes
//! shared across operands pair axes; modes absent from the destination are
//! summed over, so matrix multiplication and dot products are special
//! cases.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), modemul::ContractError> {
//! use modemul::{ExecutionVariant, Registry, TaskContext, TensorView, TensorViewMut};
//!
//! // Row-major 2x3 and 3x2 matrices; modes 0/1 are the output rows and
//! // columns, mode 2 is summed.
//! let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let b = [7.0f64, 8.0, 9.0, 10.0, 11.0, 12.0];
//! let mut c = [0.0f64; 4];
//!
//! let registry = Registry::with_default_variants();
//! let mut ctx = TaskContext::new(
//!     TensorViewMut::new(&mut c, 0, &[2, 2], &[2, 1], &[0, 1])?,
//!     TensorView::new(&a, 0, &[2, 3], &[3, 1], &[0, 2])?,
//!     TensorView::new(&b, 0, &[3, 2], &[2, 1], &[2, 1])?,
//! );
//! registry.submit(ExecutionVariant::Cpu, &mut ctx)?;
//!
//! assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod plan;
pub mod registry;
pub mod scalar;
pub mod strides;
pub mod view;

pub use context::{AnyDest, AnySource, TaskContext};
pub use dispatch::{ExecutionVariant, contract_into, cpu_variant, parallel_variant};
pub use error::ContractError;
pub use plan::ContractionPlan;
pub use registry::Registry;
pub use scalar::{ElementType, Scalar, c32, c64};
pub use view::{TensorView, TensorViewMut};
