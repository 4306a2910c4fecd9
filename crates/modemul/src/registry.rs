//! Explicit kernel registration.
//!
//! Variants are registered by a caller-invoked initialization step rather
//! than a load-time side effect, so the task framework controls when the
//! table is populated and tests can swap kernels in. A registry without a
//! variant reports [`ContractError::UnsupportedOperation`], which callers
//! must treat as a configuration defect rather than a retryable failure.

use std::collections::HashMap;
use std::fmt;

use crate::context::TaskContext;
use crate::dispatch::{self, ExecutionVariant};
use crate::error::ContractError;

/// A registered contraction kernel for one execution variant.
pub type ContractionKernel =
    Box<dyn Fn(&mut TaskContext<'_>) -> Result<(), ContractError> + Send + Sync>;

/// Table of contraction kernels keyed by execution variant.
pub struct Registry {
    kernels: HashMap<ExecutionVariant, ContractionKernel>,
}

impl Registry {
    /// An empty registry. Every submit fails with `UnsupportedOperation`
    /// until variants are registered.
    pub fn new() -> Self {
        Self {
            kernels: HashMap::new(),
        }
    }

    /// The standard initialization step: registers the built-in kernels
    /// for every execution variant. Call once during task-framework
    /// startup.
    pub fn with_default_variants() -> Self {
        let mut registry = Self::new();
        registry.register(ExecutionVariant::Cpu, dispatch::cpu_variant);
        registry.register(ExecutionVariant::Parallel, dispatch::parallel_variant);
        registry
    }

    /// Register (or replace) the kernel for a variant.
    pub fn register<F>(&mut self, variant: ExecutionVariant, kernel: F)
    where
        F: Fn(&mut TaskContext<'_>) -> Result<(), ContractError> + Send + Sync + 'static,
    {
        self.kernels.insert(variant, Box::new(kernel));
    }

    /// Whether a kernel is registered for the variant.
    pub fn supports(&self, variant: ExecutionVariant) -> bool {
        self.kernels.contains_key(&variant)
    }

    /// Run one contraction synchronously.
    ///
    /// Validation is completed before the kernel is invoked: the variant
    /// must be registered, the operands must share one element type, and
    /// the mode structure must be consistent. On any failure the
    /// destination is untouched.
    pub fn submit(
        &self,
        variant: ExecutionVariant,
        ctx: &mut TaskContext<'_>,
    ) -> Result<(), ContractError> {
        let kernel = self
            .kernels
            .get(&variant)
            .ok_or(ContractError::UnsupportedOperation { variant })?;
        ctx.validate()?;
        kernel(ctx)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut variants: Vec<&ExecutionVariant> = self.kernels.keys().collect();
        variants.sort_by_key(|v| format!("{v:?}"));
        f.debug_struct("Registry").field("variants", &variants).finish()
    }
}
