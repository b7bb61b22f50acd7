// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise binary arithmetic.
//!
//! Operands must have identical shapes; there is no broadcasting. Division
//! follows IEEE semantics, so `x / 0.0` is `±inf` or `NaN`.

use crate::{Tensor, TensorError};

/// `lhs + rhs`, elementwise.
///
/// # Errors
/// [`TensorError::ShapeMismatch`] if the shapes differ (in rank or in any
/// axis). No output is allocated in that case.
pub fn add(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    zip_with("add", lhs, rhs, |a, b| a + b)
}

/// `lhs - rhs`, elementwise.
pub fn sub(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    zip_with("sub", lhs, rhs, |a, b| a - b)
}

/// `lhs * rhs`, elementwise.
pub fn mul(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    zip_with("mul", lhs, rhs, |a, b| a * b)
}

/// `lhs / rhs`, elementwise.
pub fn div(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    zip_with("div", lhs, rhs, |a, b| a / b)
}

fn zip_with(
    op: &'static str,
    lhs: &Tensor,
    rhs: &Tensor,
    f: impl Fn(f32, f32) -> f32,
) -> Result<Tensor, TensorError> {
    if lhs.shape() != rhs.shape() {
        return Err(TensorError::ShapeMismatch {
            op,
            lhs: lhs.shape().clone(),
            rhs: rhs.shape().clone(),
        });
    }

    let mut out = lhs.pool().allocate(lhs.size())?;
    if lhs.is_contiguous() && rhs.is_contiguous() {
        for ((o, &a), &b) in out.iter_mut().zip(lhs.as_slice()).zip(rhs.as_slice()) {
            *o = f(a, b);
        }
    } else {
        for (i, o) in out.iter_mut().enumerate() {
            *o = f(lhs.at_logical(i), rhs.at_logical(i));
        }
    }
    Ok(Tensor::from_canonical(lhs.shape().clone(), out))
}
