// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors.

use crate::{layout, TensorError};
use std::fmt;

/// Per-axis extents of a [`crate::Tensor`].
///
/// A `Shape` can be built from any dimension list; validity (non-empty, every
/// extent positive) is checked by [`Shape::validate`] when a tensor is
/// constructed from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// # Examples
    /// ```
    /// use tensor_core::Shape;
    /// let s = Shape::new(vec![2, 3, 4]);
    /// assert_eq!(s.rank(), 3);
    /// assert_eq!(s.num_elements(), 24);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// 1-D shape.
    pub fn vector(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// 2-D shape.
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self {
            dims: vec![rows, cols],
        }
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Product of the extents.
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Extent of axis `index`, or `None` past the last axis.
    pub fn dim(&self, index: usize) -> Option<usize> {
        self.dims.get(index).copied()
    }

    /// Row-major strides for this shape.
    pub fn strides(&self) -> Vec<usize> {
        layout::canonical_strides(&self.dims)
    }

    /// Checks the shape and returns its element count.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] for a rank-0 shape, a zero extent, or an
    /// element count that overflows `usize`.
    pub fn validate(&self) -> Result<usize, TensorError> {
        layout::size_of(&self.dims)
    }

    /// Same shape with axis `axis` removed.
    pub(crate) fn without_axis(&self, axis: usize) -> Shape {
        let dims = self
            .dims
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != axis)
            .map(|(_, &d)| d)
            .collect();
        Shape { dims }
    }

    /// Same shape with axis `axis` collapsed to extent 1.
    pub(crate) fn with_unit_axis(&self, axis: usize) -> Shape {
        let mut dims = self.dims.clone();
        dims[axis] = 1;
        Shape { dims }
    }

    /// Shape whose axis `j` is `self.dims[axes[j]]`. `axes` must already be
    /// a validated permutation.
    pub(crate) fn permuted(&self, axes: &[usize]) -> Shape {
        Shape {
            dims: axes.iter().map(|&a| self.dims[a]).collect(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_shape() {
        let s = Shape::vector(5);
        assert_eq!(s.rank(), 1);
        assert_eq!(s.num_elements(), 5);
        assert_eq!(s.strides(), vec![1]);
    }

    #[test]
    fn test_matrix_shape() {
        let s = Shape::matrix(3, 4);
        assert_eq!(s.rank(), 2);
        assert_eq!(s.num_elements(), 12);
        assert_eq!(s.strides(), vec![4, 1]);
    }

    #[test]
    fn test_3d_strides() {
        assert_eq!(Shape::new(vec![2, 3, 4]).strides(), vec![12, 4, 1]);
    }

    #[test]
    fn test_validate() {
        assert_eq!(Shape::new(vec![2, 3]).validate(), Ok(6));
        assert!(matches!(
            Shape::new(vec![2, 0]).validate(),
            Err(TensorError::InvalidShape { .. })
        ));
        assert!(matches!(
            Shape::new(vec![]).validate(),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_axis_helpers() {
        let s = Shape::new(vec![2, 3, 4]);
        assert_eq!(s.without_axis(1), Shape::new(vec![2, 4]));
        assert_eq!(s.with_unit_axis(2), Shape::new(vec![2, 3, 1]));
        assert_eq!(s.permuted(&[2, 0, 1]), Shape::new(vec![4, 2, 3]));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Shape::new(vec![2, 3, 4])), "[2, 3, 4]");
    }

    #[test]
    fn test_from_conversions() {
        let s1: Shape = vec![2, 3].into();
        let s2: Shape = (&[2, 3][..]).into();
        let s3: Shape = [2, 3].into();
        assert_eq!(s1, s2);
        assert_eq!(s2, s3);
    }
}
