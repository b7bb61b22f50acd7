// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Unary and tensor-scalar operations.
//!
//! None of these guard their domain: `log` of a non-positive value and
//! division by zero produce IEEE `NaN`/`±inf`, not errors.

use super::map_elements;
use crate::{Tensor, TensorError};

/// Canonical copy of `input` (a permuted view comes out materialized).
pub fn copy(input: &Tensor) -> Result<Tensor, TensorError> {
    map_elements(input, |x| x)
}

/// Natural logarithm.
pub fn log(input: &Tensor) -> Result<Tensor, TensorError> {
    map_elements(input, f32::ln)
}

/// Logistic sigmoid.
///
/// Uses `1 / (1 + e^-x)` for `x >= 0` and `e^x / (1 + e^x)` for `x < 0`, so
/// neither branch evaluates `exp` of a large positive argument.
///
/// ```
/// use buffer_pool::BufferPool;
/// use tensor_core::{ops, Shape, Tensor};
///
/// let pool = BufferPool::unbounded();
/// let x = Tensor::from_f32(&pool, Shape::vector(3), &[-1000.0, 0.0, 1000.0]).unwrap();
/// let y = ops::sigmoid(&x).unwrap();
/// assert_eq!(y.as_slice(), &[0.0, 0.5, 1.0]);
/// ```
pub fn sigmoid(input: &Tensor) -> Result<Tensor, TensorError> {
    map_elements(input, stable_sigmoid)
}

#[inline]
fn stable_sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// `x^exponent`.
pub fn pow_scalar(input: &Tensor, exponent: f32) -> Result<Tensor, TensorError> {
    map_elements(input, |x| x.powf(exponent))
}

/// `base^x`.
pub fn scalar_pow(base: f32, input: &Tensor) -> Result<Tensor, TensorError> {
    map_elements(input, |x| base.powf(x))
}

/// `x * s`.
pub fn mul_scalar(input: &Tensor, s: f32) -> Result<Tensor, TensorError> {
    map_elements(input, |x| x * s)
}

/// `x / s`.
pub fn div_scalar(input: &Tensor, s: f32) -> Result<Tensor, TensorError> {
    map_elements(input, |x| x / s)
}

/// `s / x`.
pub fn scalar_div(s: f32, input: &Tensor) -> Result<Tensor, TensorError> {
    map_elements(input, |x| s / x)
}

/// `x + s`.
pub fn add_scalar(input: &Tensor, s: f32) -> Result<Tensor, TensorError> {
    map_elements(input, |x| x + s)
}

/// `s - x`.
pub fn scalar_sub(s: f32, input: &Tensor) -> Result<Tensor, TensorError> {
    map_elements(input, |x| s - x)
}

/// `-x`.
pub fn neg(input: &Tensor) -> Result<Tensor, TensorError> {
    mul_scalar(input, -1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;
    use buffer_pool::BufferPool;

    fn approx_eq(a: &[f32], b: &[f32], tol: f32) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < tol)
    }

    fn vector(pool: &BufferPool, data: &[f32]) -> Tensor {
        Tensor::from_f32(pool, Shape::vector(data.len()), data).unwrap()
    }

    #[test]
    fn test_sigmoid_is_stable_at_extremes() {
        let pool = BufferPool::unbounded();
        let out = sigmoid(&vector(&pool, &[-1000.0, 0.0, 1000.0])).unwrap();
        let v = out.as_slice();
        assert!(v.iter().all(|x| x.is_finite()));
        assert!(v[0].abs() < 1e-6);
        assert_eq!(v[1], 0.5);
        assert!((v[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sigmoid_symmetry() {
        let pool = BufferPool::unbounded();
        let out = sigmoid(&vector(&pool, &[-2.0, 2.0])).unwrap();
        let v = out.as_slice();
        assert!((v[0] + v[1] - 1.0).abs() < 1e-6);
        assert!((v[1] - 0.880_797).abs() < 1e-5);
    }

    #[test]
    fn test_log() {
        let pool = BufferPool::unbounded();
        let out = log(&vector(&pool, &[1.0, std::f32::consts::E, 0.0, -1.0])).unwrap();
        let v = out.as_slice();
        assert!(approx_eq(&v[..2], &[0.0, 1.0], 1e-6));
        assert_eq!(v[2], f32::NEG_INFINITY);
        assert!(v[3].is_nan());
    }

    #[test]
    fn test_pow_both_directions() {
        let pool = BufferPool::unbounded();
        let x = vector(&pool, &[1.0, 2.0, 3.0]);
        assert!(approx_eq(
            pow_scalar(&x, 2.0).unwrap().as_slice(),
            &[1.0, 4.0, 9.0],
            1e-6
        ));
        assert!(approx_eq(
            scalar_pow(2.0, &x).unwrap().as_slice(),
            &[2.0, 4.0, 8.0],
            1e-6
        ));
    }

    #[test]
    fn test_scalar_arithmetic() {
        let pool = BufferPool::unbounded();
        let x = vector(&pool, &[1.0, 2.0, 4.0]);
        assert_eq!(mul_scalar(&x, 3.0).unwrap().as_slice(), &[3.0, 6.0, 12.0]);
        assert_eq!(div_scalar(&x, 2.0).unwrap().as_slice(), &[0.5, 1.0, 2.0]);
        assert_eq!(scalar_div(4.0, &x).unwrap().as_slice(), &[4.0, 2.0, 1.0]);
        assert_eq!(add_scalar(&x, 1.0).unwrap().as_slice(), &[2.0, 3.0, 5.0]);
        assert_eq!(scalar_sub(1.0, &x).unwrap().as_slice(), &[0.0, -1.0, -3.0]);
        assert_eq!(neg(&x).unwrap().as_slice(), &[-1.0, -2.0, -4.0]);
    }

    #[test]
    fn test_scalar_div_by_zero_element() {
        let pool = BufferPool::unbounded();
        let out = scalar_div(1.0, &vector(&pool, &[0.0])).unwrap();
        assert_eq!(out.as_slice(), &[f32::INFINITY]);
    }

    #[test]
    fn test_copy_materializes_view() {
        let pool = BufferPool::unbounded();
        let view = Tensor::from_f32(&pool, Shape::matrix(2, 2), &[1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .into_permuted(&[1, 0])
            .unwrap();
        let c = copy(&view).unwrap();
        assert!(c.is_contiguous());
        assert_eq!(c.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
        assert_eq!(c.shape(), view.shape());
    }
}
