// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor operations.

use crate::Shape;
use buffer_pool::PoolError;

/// Errors that can occur during tensor operations.
///
/// Every fallible entry point of this crate returns one of these; nothing
/// in the crate aborts the process.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TensorError {
    /// The buffer pool could not provide storage.
    #[error("allocation failed: {0}")]
    Allocation(#[from] PoolError),

    /// A shape is empty or has a zero-sized dimension.
    #[error("invalid shape {dims:?}: {reason}")]
    InvalidShape {
        dims: Vec<usize>,
        reason: &'static str,
    },

    /// Caller data does not have exactly one value per element of the shape.
    #[error("buffer size mismatch: shape needs {expected} elements, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Two shapes differ in rank or in some axis extent.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// An axis argument is outside `[0, ndim)`.
    #[error("axis {axis} is out of range for {op} on a rank-{ndim} tensor")]
    InvalidAxis {
        op: &'static str,
        axis: isize,
        ndim: usize,
    },

    /// An axis ordering is not a permutation of `0..ndim`.
    #[error("{axes:?} is not a permutation of the axes of a rank-{ndim} tensor")]
    InvalidPermutation { axes: Vec<usize>, ndim: usize },

    /// A multi-index falls outside the shape.
    #[error("index {index:?} is out of range for shape {shape}")]
    IndexOutOfRange { index: Vec<usize>, shape: Shape },

    /// The operation is not defined for tensors of this rank.
    #[error("{op} does not support rank-{rank} tensors")]
    RankUnsupported { op: &'static str, rank: usize },

    /// Reshape was asked to reinterpret a non-canonically strided tensor.
    #[error("cannot reshape tensor of shape {shape} with non-canonical strides {strides:?}; materialize it first")]
    UnsupportedReshape { shape: Shape, strides: Vec<usize> },
}
