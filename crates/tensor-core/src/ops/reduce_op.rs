// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sum reduction.

use crate::{layout, Shape, Tensor, TensorError};

/// Which axes [`sum`] collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceAxis {
    /// Every element into one value.
    All,
    /// A single axis, `0..ndim`.
    Dim(usize),
}

/// Sums `input` over `axis`.
///
/// - `ReduceAxis::All` accumulates every element in storage order. The result
///   has shape `[1]`, or `[1; ndim]` with `keepdim`.
/// - `ReduceAxis::Dim(a)` removes axis `a` from the shape, or keeps it with
///   extent 1 when `keepdim` is set. Reducing the only axis of a rank-1
///   tensor without `keepdim` yields shape `[1]`.
///
/// ```
/// use buffer_pool::BufferPool;
/// use tensor_core::{ops, ReduceAxis, Shape, Tensor};
///
/// let pool = BufferPool::unbounded();
/// let x = Tensor::from_f32(&pool, Shape::matrix(2, 3), &[1., 2., 3., 4., 5., 6.]).unwrap();
/// let s = ops::sum(&x, ReduceAxis::Dim(0), true).unwrap();
/// assert_eq!(s.dims(), &[1, 3]);
/// assert_eq!(s.as_slice(), &[5., 7., 9.]);
/// ```
///
/// # Errors
/// [`TensorError::InvalidAxis`] if the axis is not in `0..ndim`.
pub fn sum(input: &Tensor, axis: ReduceAxis, keepdim: bool) -> Result<Tensor, TensorError> {
    match axis {
        ReduceAxis::All => sum_all(input, keepdim),
        ReduceAxis::Dim(a) => sum_axis(input, a, keepdim),
    }
}

fn sum_all(input: &Tensor, keepdim: bool) -> Result<Tensor, TensorError> {
    let total: f32 = input.as_slice().iter().sum();
    let shape = if keepdim {
        Shape::new(vec![1; input.ndim()])
    } else {
        Shape::vector(1)
    };
    let buffer = input.pool().allocate_from_slice(&[total])?;
    Ok(Tensor::from_canonical(shape, buffer))
}

fn sum_axis(input: &Tensor, axis: usize, keepdim: bool) -> Result<Tensor, TensorError> {
    let ndim = input.ndim();
    if axis >= ndim {
        return Err(TensorError::InvalidAxis {
            op: "sum",
            axis: axis as isize,
            ndim,
        });
    }

    // Walk the kept axes in output order; each output slot sums a strided
    // run of `extent` elements along the reduced axis.
    let kept = input.shape().without_axis(axis);
    let kept_strides: Vec<usize> = input
        .strides()
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != axis)
        .map(|(_, &s)| s)
        .collect();
    let extent = input.dims()[axis];
    let step = input.strides()[axis];
    let out_len = kept.num_elements();

    let src = input.as_slice();
    let mut out = input.pool().allocate(out_len)?;
    for (i, slot) in out.iter_mut().enumerate() {
        let base = layout::source_offset(i, kept.dims(), &kept_strides);
        *slot = (0..extent).map(|k| src[base + k * step]).sum();
    }

    let shape = if keepdim {
        input.shape().with_unit_axis(axis)
    } else if kept.rank() == 0 {
        Shape::vector(1)
    } else {
        kept
    };
    Ok(Tensor::from_canonical(shape, out))
}
