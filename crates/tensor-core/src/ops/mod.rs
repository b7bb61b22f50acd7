// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor operations.
//!
//! Every operation allocates its output from the pool of its (first) input,
//! computes it in one pass and returns it in canonical layout. Inputs are
//! read through their strides, so permuted views are valid operands.
//! Validation happens before allocation: a rejected call allocates nothing.

mod binary_op;
mod matmul_op;
mod permute_op;
mod reduce_op;
mod reshape_op;
mod unary_op;

pub use binary_op::{add, div, mul, sub};
pub use matmul_op::matmul;
pub use permute_op::{permute, swap_axes, transpose};
pub use reduce_op::{sum, ReduceAxis};
pub use reshape_op::{reshape, ReshapePolicy};
pub use unary_op::{
    add_scalar, copy, div_scalar, log, mul_scalar, neg, pow_scalar, scalar_div, scalar_pow,
    scalar_sub, sigmoid,
};

use crate::{Tensor, TensorError};

/// Output of the same shape as `input`, with `f` applied to each element in
/// logical order.
pub(crate) fn map_elements(input: &Tensor, f: impl Fn(f32) -> f32) -> Result<Tensor, TensorError> {
    let mut out = input.pool().allocate(input.size())?;
    if input.is_contiguous() {
        for (o, &x) in out.iter_mut().zip(input.as_slice()) {
            *o = f(x);
        }
    } else {
        for (i, o) in out.iter_mut().enumerate() {
            *o = f(input.at_logical(i));
        }
    }
    Ok(Tensor::from_canonical(input.shape().clone(), out))
}
