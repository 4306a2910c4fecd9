//! Stride arithmetic for strided views.
//!
//! Strides are measured in elements and may be negative or zero
//! (broadcast). Column-major (Fortran) order is the default produced by
//! [`column_major_strides`], matching faer.

/// Compute column-major strides from a shape.
///
/// For shape [d0, d1, d2, ...], returns strides [1, d0, d0*d1, ...].
///
/// # Examples
///
/// ```
/// use modemul::strides::column_major_strides;
///
/// assert_eq!(column_major_strides(&[3, 4, 5]), vec![1, 3, 12]);
/// assert_eq!(column_major_strides(&[2, 3]), vec![1, 2]);
/// assert_eq!(column_major_strides(&[]), vec![]);
/// ```
pub fn column_major_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = Vec::with_capacity(shape.len());
    let mut stride = 1isize;

    for &dim in shape.iter() {
        strides.push(stride);
        stride *= dim as isize;
    }

    strides
}

/// Convert a linear index to cartesian indices for the given extents.
///
/// The first extent varies fastest, matching column-major order.
#[inline]
pub fn linear_to_cartesian(mut linear: usize, extents: &[usize]) -> Vec<usize> {
    let mut indices = Vec::with_capacity(extents.len());

    for &dim in extents.iter() {
        indices.push(linear % dim);
        linear /= dim;
    }

    indices
}

/// Element offset reached by cartesian indices under the given strides.
#[inline]
pub fn offset_of(indices: &[usize], strides: &[isize]) -> isize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx as isize * stride)
        .sum()
}

/// Smallest and largest element offsets addressable by a shape/stride pair,
/// relative to the view origin.
///
/// Returns `None` when the view holds no elements (some extent is zero).
pub fn offset_span(shape: &[usize], strides: &[isize]) -> Option<(isize, isize)> {
    if shape.contains(&0) {
        return None;
    }

    let mut lo = 0isize;
    let mut hi = 0isize;
    for (&dim, &stride) in shape.iter().zip(strides.iter()) {
        let reach = (dim as isize - 1) * stride;
        if reach < 0 {
            lo += reach;
        } else {
            hi += reach;
        }
    }
    Some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_major_strides() {
        assert_eq!(column_major_strides(&[3, 4, 5]), vec![1, 3, 12]);
        assert_eq!(column_major_strides(&[5]), vec![1]);
        assert_eq!(column_major_strides(&[]), Vec::<isize>::new());
    }

    #[test]
    fn test_offset_of() {
        let strides = column_major_strides(&[3, 4, 5]);
        assert_eq!(offset_of(&[0, 0, 0], &strides), 0);
        assert_eq!(offset_of(&[1, 0, 0], &strides), 1);
        assert_eq!(offset_of(&[0, 1, 0], &strides), 3);
        assert_eq!(offset_of(&[2, 3, 4], &strides), 2 + 3 * 3 + 4 * 12);
    }

    #[test]
    fn test_offset_of_negative_stride() {
        assert_eq!(offset_of(&[2], &[-1]), -2);
        assert_eq!(offset_of(&[1, 1], &[-2, 3]), 1);
    }

    #[test]
    fn test_linear_to_cartesian_roundtrip() {
        let shape = [3, 4, 5];
        let strides = column_major_strides(&shape);
        for linear in 0..60 {
            let cart = linear_to_cartesian(linear, &shape);
            assert_eq!(offset_of(&cart, &strides), linear as isize);
        }
    }

    #[test]
    fn test_offset_span() {
        assert_eq!(offset_span(&[2, 3], &[1, 2]), Some((0, 5)));
        assert_eq!(offset_span(&[3], &[-1]), Some((-2, 0)));
        assert_eq!(offset_span(&[3, 2], &[-1, 3]), Some((-2, 3)));
        assert_eq!(offset_span(&[4], &[0]), Some((0, 0)));
        assert_eq!(offset_span(&[2, 0], &[1, 2]), None);
        assert_eq!(offset_span(&[], &[]), Some((0, 0)));
    }
}
