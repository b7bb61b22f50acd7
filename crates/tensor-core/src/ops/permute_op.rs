// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Axis permutation, for any rank.
//!
//! One routine covers the full-reversal transpose, arbitrary permutations
//! and two-axis swaps: build the permuted view's strides, then gather it
//! into a fresh canonical buffer. The input is never modified.

use crate::materialize::gather_into;
use crate::tensor::check_permutation;
use crate::{Tensor, TensorError};

/// Returns a canonical tensor whose axis `j` is axis `axes[j]` of `input`.
///
/// ```
/// use buffer_pool::BufferPool;
/// use tensor_core::{ops, Shape, Tensor};
///
/// let pool = BufferPool::unbounded();
/// let x = Tensor::zeros(&pool, Shape::new(vec![2, 3, 4])).unwrap();
/// let y = ops::permute(&x, &[2, 0, 1]).unwrap();
/// assert_eq!(y.dims(), &[4, 2, 3]);
/// ```
///
/// # Errors
/// [`TensorError::InvalidPermutation`] if `axes` is not a permutation of
/// `0..ndim`.
pub fn permute(input: &Tensor, axes: &[usize]) -> Result<Tensor, TensorError> {
    check_permutation(axes, input.ndim())?;
    let shape = input.shape().permuted(axes);
    let strides: Vec<usize> = axes.iter().map(|&a| input.strides()[a]).collect();

    let mut out = input.pool().allocate(input.size())?;
    gather_into(input.as_slice(), shape.dims(), &strides, &mut out);
    Ok(Tensor::from_canonical(shape, out))
}

/// Full reversal of the axes: `out[i_{n-1}, …, i_0] = in[i_0, …, i_{n-1}]`.
/// Rank 1 is an identity copy.
pub fn transpose(input: &Tensor) -> Result<Tensor, TensorError> {
    let axes: Vec<usize> = (0..input.ndim()).rev().collect();
    permute(input, &axes)
}

/// Exchanges axes `a` and `b`.
///
/// # Errors
/// [`TensorError::InvalidAxis`] if either axis is not in `0..ndim`.
pub fn swap_axes(input: &Tensor, a: usize, b: usize) -> Result<Tensor, TensorError> {
    let ndim = input.ndim();
    for axis in [a, b] {
        if axis >= ndim {
            return Err(TensorError::InvalidAxis {
                op: "swap_axes",
                axis: axis as isize,
                ndim,
            });
        }
    }
    let mut axes: Vec<usize> = (0..ndim).collect();
    axes.swap(a, b);
    permute(input, &axes)
}
