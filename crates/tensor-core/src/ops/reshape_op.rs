// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reshape.

use crate::materialize::gather_into;
use crate::{Shape, Tensor, TensorError};

/// How [`reshape`] treats an input whose strides are not canonical.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReshapePolicy {
    /// Read the input in logical order through its strides.
    #[default]
    Materialize,
    /// Fail with [`TensorError::UnsupportedReshape`].
    Reject,
}

/// Copies `input` into a new tensor of shape `shape`, element order
/// unchanged (row-major logical order of the input).
///
/// ```
/// use buffer_pool::BufferPool;
/// use tensor_core::{ops, ReshapePolicy, Shape, Tensor};
///
/// let pool = BufferPool::unbounded();
/// let x = Tensor::from_f32(&pool, Shape::matrix(2, 3), &[1., 2., 3., 4., 5., 6.]).unwrap();
/// let y = ops::reshape(&x, Shape::matrix(3, 2), ReshapePolicy::default()).unwrap();
/// assert_eq!(y.get(&[2, 0]).unwrap(), 5.0);
/// ```
///
/// # Errors
/// - [`TensorError::InvalidShape`] if `shape` is empty or has a zero extent.
/// - [`TensorError::ShapeMismatch`] if the element counts differ.
/// - [`TensorError::UnsupportedReshape`] if `input` is not canonical and the
///   policy is [`ReshapePolicy::Reject`].
pub fn reshape(input: &Tensor, shape: Shape, policy: ReshapePolicy) -> Result<Tensor, TensorError> {
    let size = shape.validate()?;
    if size != input.size() {
        return Err(TensorError::ShapeMismatch {
            op: "reshape",
            lhs: input.shape().clone(),
            rhs: shape,
        });
    }

    if input.is_contiguous() {
        let out = input.pool().allocate_from_slice(input.as_slice())?;
        return Ok(Tensor::from_canonical(shape, out));
    }

    match policy {
        ReshapePolicy::Reject => Err(TensorError::UnsupportedReshape {
            shape: input.shape().clone(),
            strides: input.strides().to_vec(),
        }),
        ReshapePolicy::Materialize => {
            tracing::debug!(
                from = %input.shape(),
                to = %shape,
                strides = ?input.strides(),
                "reshape of strided input, gathering in logical order"
            );
            let mut out = input.pool().allocate(size)?;
            gather_into(input.as_slice(), input.dims(), input.strides(), &mut out);
            Ok(Tensor::from_canonical(shape, out))
        }
    }
}
