//! Mode analysis for a contraction.
//!
//! A [`ContractionPlan`] classifies every mode appearing across the three
//! operands as either *free* (present in the destination, one output loop
//! axis each) or *summed* (absent from the destination, accumulated over),
//! records the agreed extent per mode, and keeps each operand's stride for
//! the modes it carries. The plan is the fail-fast validation step: the
//! engine is only invoked on plans that built successfully.

use crate::error::ContractError;
use crate::view::OperandLayout;

/// One loop axis of the contraction.
///
/// `dest`, `src1` and `src2` hold the operand's stride for this mode, or
/// `None` when the operand does not carry the mode. A present stride may be
/// zero (broadcast).
#[derive(Debug, Clone, Copy)]
pub struct LoopAxis {
    pub mode: i32,
    pub extent: usize,
    pub dest: Option<isize>,
    pub src1: Option<isize>,
    pub src2: Option<isize>,
}

/// Loop structure of one contraction: free axes in destination order,
/// summed axes in order of first appearance (source 1, then source 2).
#[derive(Debug, Clone)]
pub struct ContractionPlan {
    pub free: Vec<LoopAxis>,
    pub summed: Vec<LoopAxis>,
}

fn find(modes: &[i32], mode: i32) -> Option<usize> {
    modes.iter().position(|&m| m == mode)
}

fn check_duplicates(layout: &OperandLayout<'_>) -> Result<(), ContractError> {
    for (i, &mode) in layout.modes.iter().enumerate() {
        if layout.modes[..i].contains(&mode) {
            return Err(ContractError::DuplicateMode { mode });
        }
    }
    Ok(())
}

impl ContractionPlan {
    /// Build and validate the loop structure for one contraction.
    ///
    /// # Errors
    ///
    /// - [`ContractError::DuplicateMode`] if a mode repeats within one
    ///   operand.
    /// - [`ContractError::UncoveredMode`] if a destination mode appears in
    ///   neither source.
    /// - [`ContractError::ExtentMismatch`] if operands sharing a mode
    ///   disagree on its extent.
    pub fn build(
        dest: OperandLayout<'_>,
        src1: OperandLayout<'_>,
        src2: OperandLayout<'_>,
    ) -> Result<Self, ContractError> {
        check_duplicates(&dest)?;
        check_duplicates(&src1)?;
        check_duplicates(&src2)?;

        let mut free = Vec::with_capacity(dest.modes.len());
        for (axis, &mode) in dest.modes.iter().enumerate() {
            let extent = dest.shape[axis];
            let i1 = find(src1.modes, mode);
            let i2 = find(src2.modes, mode);
            if i1.is_none() && i2.is_none() {
                return Err(ContractError::UncoveredMode { mode });
            }
            for &other in [
                i1.map(|i| src1.shape[i]),
                i2.map(|i| src2.shape[i]),
            ]
            .iter()
            .flatten()
            {
                if other != extent {
                    return Err(ContractError::ExtentMismatch { mode, extent, other });
                }
            }
            free.push(LoopAxis {
                mode,
                extent,
                dest: Some(dest.strides[axis]),
                src1: i1.map(|i| src1.strides[i]),
                src2: i2.map(|i| src2.strides[i]),
            });
        }

        let mut summed: Vec<LoopAxis> = Vec::new();
        for (layout, first) in [(&src1, true), (&src2, false)] {
            for (axis, &mode) in layout.modes.iter().enumerate() {
                if find(dest.modes, mode).is_some() {
                    continue;
                }
                if !first && find(src1.modes, mode).is_some() {
                    // Already recorded from source 1.
                    continue;
                }
                let extent = layout.shape[axis];
                let i2 = if first { find(src2.modes, mode) } else { None };
                if let Some(i) = i2 {
                    let other = src2.shape[i];
                    if other != extent {
                        return Err(ContractError::ExtentMismatch { mode, extent, other });
                    }
                }
                summed.push(LoopAxis {
                    mode,
                    extent,
                    dest: None,
                    src1: if first {
                        Some(layout.strides[axis])
                    } else {
                        None
                    },
                    src2: if first {
                        i2.map(|i| src2.strides[i])
                    } else {
                        Some(layout.strides[axis])
                    },
                });
            }
        }

        Ok(Self { free, summed })
    }

    /// Extents of the free axes, destination order.
    pub fn free_extents(&self) -> Vec<usize> {
        self.free.iter().map(|ax| ax.extent).collect()
    }

    /// Extents of the summed axes.
    pub fn summed_extents(&self) -> Vec<usize> {
        self.summed.iter().map(|ax| ax.extent).collect()
    }

    /// Whether the contraction maps directly onto a single GEMM:
    /// every free mode lives in exactly one source and every summed mode
    /// pairs both sources. Batch modes and one-sided sums take the strided
    /// loop path instead.
    pub fn is_gemm_compatible(&self) -> bool {
        self.free
            .iter()
            .all(|ax| ax.src1.is_some() != ax.src2.is_some())
            && self
                .summed
                .iter()
                .all(|ax| ax.src1.is_some() && ax.src2.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout<'a>(
        shape: &'a [usize],
        strides: &'a [isize],
        modes: &'a [i32],
    ) -> OperandLayout<'a> {
        OperandLayout { shape, strides, modes }
    }

    #[test]
    fn test_matrix_multiply_plan() {
        // dest[0,1] = src1[0,2] * src2[2,1]
        let plan = ContractionPlan::build(
            layout(&[2, 2], &[1, 2], &[0, 1]),
            layout(&[2, 3], &[1, 2], &[0, 2]),
            layout(&[3, 2], &[1, 3], &[2, 1]),
        )
        .unwrap();

        assert_eq!(plan.free_extents(), vec![2, 2]);
        assert_eq!(plan.summed_extents(), vec![3]);
        assert_eq!(plan.summed[0].mode, 2);
        assert!(plan.is_gemm_compatible());
    }

    #[test]
    fn test_full_contraction_plan() {
        // Scalar destination: everything summed.
        let plan = ContractionPlan::build(
            layout(&[], &[], &[]),
            layout(&[3], &[1], &[0]),
            layout(&[3], &[1], &[0]),
        )
        .unwrap();

        assert!(plan.free.is_empty());
        assert_eq!(plan.summed_extents(), vec![3]);
        assert!(plan.is_gemm_compatible());
    }

    #[test]
    fn test_batch_mode_not_gemm() {
        // Mode 0 appears in all three operands.
        let plan = ContractionPlan::build(
            layout(&[2], &[1], &[0]),
            layout(&[2, 3], &[1, 2], &[0, 1]),
            layout(&[3, 2], &[1, 3], &[1, 0]),
        )
        .unwrap();

        assert_eq!(plan.free_extents(), vec![2]);
        assert_eq!(plan.summed_extents(), vec![3]);
        assert!(!plan.is_gemm_compatible());
    }

    #[test]
    fn test_one_sided_sum_not_gemm() {
        // Mode 1 is summed but lives only in source 1 (a row sum).
        let plan = ContractionPlan::build(
            layout(&[2], &[1], &[0]),
            layout(&[2, 3], &[1, 2], &[0, 1]),
            layout(&[2], &[1], &[0]),
        )
        .unwrap();

        assert_eq!(plan.summed_extents(), vec![3]);
        assert!(!plan.is_gemm_compatible());
    }

    #[test]
    fn test_uncovered_destination_mode() {
        let err = ContractionPlan::build(
            layout(&[2, 2], &[1, 2], &[0, 7]),
            layout(&[2], &[1], &[0]),
            layout(&[2], &[1], &[0]),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::UncoveredMode { mode: 7 }));
    }

    #[test]
    fn test_extent_mismatch() {
        let err = ContractionPlan::build(
            layout(&[], &[], &[]),
            layout(&[3], &[1], &[0]),
            layout(&[4], &[1], &[0]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::ExtentMismatch { mode: 0, extent: 3, other: 4 }
        ));
    }

    #[test]
    fn test_duplicate_mode_rejected() {
        let err = ContractionPlan::build(
            layout(&[2, 2], &[1, 2], &[0, 0]),
            layout(&[2, 2], &[1, 2], &[0, 1]),
            layout(&[2, 2], &[1, 2], &[1, 0]),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::DuplicateMode { mode: 0 }));
    }
}
