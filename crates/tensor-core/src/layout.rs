// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape and stride arithmetic.
//!
//! Strides are measured in elements. Element `(i0, …, ik)` of a tensor lives
//! at `buffer[Σ ij · strides[j]]`. A layout is *canonical* when its strides
//! are the row-major strides of its shape.
//!
//! Most of the kernels in [`crate::ops`] are built on one move: take a flat
//! position in a canonical destination, [`decompose`] it into a multi-index
//! against the destination shape, then [`relinearize`] that multi-index
//! against the *source* strides. [`source_offset`] fuses the two without
//! allocating.

use crate::{Shape, TensorError};

/// Row-major strides: `strides[n-1] = 1`, `strides[j] = strides[j+1] * dims[j+1]`.
///
/// ```
/// use tensor_core::layout::canonical_strides;
/// assert_eq!(canonical_strides(&[2, 3, 4]), vec![12, 4, 1]);
/// ```
pub fn canonical_strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![0usize; dims.len()];
    let mut acc = 1usize;
    for (stride, &dim) in strides.iter_mut().zip(dims).rev() {
        *stride = acc;
        acc *= dim;
    }
    strides
}

/// Element count of `dims`.
///
/// # Errors
/// [`TensorError::InvalidShape`] if `dims` is empty, contains a zero, or its
/// product overflows.
pub fn size_of(dims: &[usize]) -> Result<usize, TensorError> {
    if dims.is_empty() {
        return Err(TensorError::InvalidShape {
            dims: dims.to_vec(),
            reason: "a tensor needs at least one axis",
        });
    }
    if dims.contains(&0) {
        return Err(TensorError::InvalidShape {
            dims: dims.to_vec(),
            reason: "every axis must have a positive extent",
        });
    }
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| TensorError::InvalidShape {
            dims: dims.to_vec(),
            reason: "element count overflows usize",
        })
}

/// `true` if `strides` are the row-major strides of `dims`.
pub fn is_canonical(dims: &[usize], strides: &[usize]) -> bool {
    if dims.len() != strides.len() {
        return false;
    }
    let mut expected = 1usize;
    for (&dim, &stride) in dims.iter().zip(strides).rev() {
        if stride != expected {
            return false;
        }
        expected *= dim;
    }
    true
}

/// Storage offset of `index`, with bounds checking.
///
/// # Errors
/// [`TensorError::IndexOutOfRange`] if `index` has the wrong rank or any
/// component is outside `[0, dims[j])`.
pub fn linear_offset(
    dims: &[usize],
    strides: &[usize],
    index: &[usize],
) -> Result<usize, TensorError> {
    let in_range = index.len() == dims.len() && index.iter().zip(dims).all(|(&i, &d)| i < d);
    if !in_range {
        return Err(TensorError::IndexOutOfRange {
            index: index.to_vec(),
            shape: Shape::from(dims),
        });
    }
    Ok(relinearize(index, strides))
}

/// `Σ index[j] * strides[j]`, unchecked.
#[inline]
pub fn relinearize(index: &[usize], strides: &[usize]) -> usize {
    index.iter().zip(strides).map(|(&i, &s)| i * s).sum()
}

/// Mixed-radix decomposition of `flat` against `dims`, most significant
/// axis first.
///
/// ```
/// use tensor_core::layout::decompose;
/// assert_eq!(decompose(7, &[2, 3, 2]), vec![1, 0, 1]);
/// ```
pub fn decompose(flat: usize, dims: &[usize]) -> Vec<usize> {
    let mut index = vec![0usize; dims.len()];
    decompose_into(flat, dims, &mut index);
    index
}

/// [`decompose`] into a caller-provided slice of length `dims.len()`.
pub fn decompose_into(mut flat: usize, dims: &[usize], index: &mut [usize]) {
    for (slot, &dim) in index.iter_mut().zip(dims).rev() {
        *slot = flat % dim;
        flat /= dim;
    }
}

/// Offset in a buffer laid out with `strides` of the element whose row-major
/// position under `dims` is `flat`.
///
/// Equivalent to `relinearize(&decompose(flat, dims), strides)`.
#[inline]
pub fn source_offset(mut flat: usize, dims: &[usize], strides: &[usize]) -> usize {
    let mut offset = 0usize;
    for (&dim, &stride) in dims.iter().zip(strides).rev() {
        offset += (flat % dim) * stride;
        flat /= dim;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_strides() {
        assert_eq!(canonical_strides(&[5]), vec![1]);
        assert_eq!(canonical_strides(&[3, 4]), vec![4, 1]);
        assert_eq!(canonical_strides(&[2, 1, 3]), vec![3, 3, 1]);
    }

    #[test]
    fn test_size_of() {
        assert_eq!(size_of(&[2, 3, 4]), Ok(24));
        assert_eq!(size_of(&[1]), Ok(1));
        assert!(size_of(&[]).is_err());
        assert!(size_of(&[3, 0]).is_err());
        assert!(size_of(&[usize::MAX, 2]).is_err());
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical(&[2, 3], &[3, 1]));
        assert!(!is_canonical(&[3, 2], &[1, 3]));
        assert!(!is_canonical(&[2, 3], &[3]));
    }

    #[test]
    fn test_linear_offset() {
        let dims = [2, 3];
        let strides = canonical_strides(&dims);
        assert_eq!(linear_offset(&dims, &strides, &[1, 2]), Ok(5));
        assert!(matches!(
            linear_offset(&dims, &strides, &[2, 0]),
            Err(TensorError::IndexOutOfRange { .. })
        ));
        assert!(linear_offset(&dims, &strides, &[1]).is_err());
    }

    #[test]
    fn test_decompose_round_trip() {
        let dims = [3, 4, 5];
        let strides = canonical_strides(&dims);
        for flat in 0..60 {
            let index = decompose(flat, &dims);
            assert_eq!(relinearize(&index, &strides), flat);
        }
    }

    #[test]
    fn test_source_offset_against_permuted_strides() {
        // A [2, 3] buffer viewed as its [3, 2] transpose.
        let dims = [3, 2];
        let strides = [1, 3];
        let offsets: Vec<usize> = (0..6).map(|i| source_offset(i, &dims, &strides)).collect();
        assert_eq!(offsets, vec![0, 3, 1, 4, 2, 5]);
        for flat in 0..6 {
            assert_eq!(
                source_offset(flat, &dims, &strides),
                relinearize(&decompose(flat, &dims), &strides)
            );
        }
    }
}
