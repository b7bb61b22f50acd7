// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Matrix multiplication operation.

use crate::{Shape, Tensor, TensorError};

/// Matrix product `lhs @ rhs`.
///
/// `lhs` is `[M, K]`, `rhs` is `[K, P]` and the result is `[M, P]`. Either
/// operand may be a permuted view; elements are read through its strides.
///
/// # Errors
/// - [`TensorError::RankUnsupported`] if either operand is not rank 2.
/// - [`TensorError::ShapeMismatch`] if the inner dimensions differ.
pub fn matmul(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    for operand in [lhs, rhs] {
        if operand.ndim() != 2 {
            return Err(TensorError::RankUnsupported {
                op: "matmul",
                rank: operand.ndim(),
            });
        }
    }

    let (m, k) = (lhs.dims()[0], lhs.dims()[1]);
    let (k2, p) = (rhs.dims()[0], rhs.dims()[1]);
    if k != k2 {
        return Err(TensorError::ShapeMismatch {
            op: "matmul",
            lhs: lhs.shape().clone(),
            rhs: rhs.shape().clone(),
        });
    }

    let mut out = lhs.pool().allocate(m * p)?;
    matmul_f32_strided(Operand::of(lhs), Operand::of(rhs), &mut out, m, k, p);
    Ok(Tensor::from_canonical(Shape::matrix(m, p), out))
}

/// A rank-2 operand: its storage plus row and column strides.
#[derive(Clone, Copy)]
struct Operand<'a> {
    data: &'a [f32],
    row: usize,
    col: usize,
}

impl<'a> Operand<'a> {
    fn of(t: &'a Tensor) -> Self {
        Self {
            data: t.as_slice(),
            row: t.strides()[0],
            col: t.strides()[1],
        }
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.row + j * self.col]
    }
}

/// Naive triple loop in ikj order, so the innermost loop walks one row of
/// the output. `c` is assumed zeroed.
fn matmul_f32_strided(a: Operand<'_>, b: Operand<'_>, c: &mut [f32], m: usize, k: usize, p: usize) {
    for i in 0..m {
        let c_row = &mut c[i * p..(i + 1) * p];
        for kk in 0..k {
            let a_ik = a.at(i, kk);
            for (j, c_ij) in c_row.iter_mut().enumerate() {
                *c_ij += a_ik * b.at(kk, j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buffer_pool::BufferPool;

    #[test]
    fn test_matmul_2x3_times_3x2() {
        // A = [[1, 2, 3], [4, 5, 6]]
        // B = [[7, 8], [9, 10], [11, 12]]
        // C = [[58, 64], [139, 154]]
        let pool = BufferPool::unbounded();
        let a = Tensor::from_f32(&pool, Shape::matrix(2, 3), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap();
        let b = Tensor::from_f32(&pool, Shape::matrix(3, 2), &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0])
            .unwrap();

        let c = matmul(&a, &b).unwrap();

        assert_eq!(c.dims(), &[2, 2]);
        assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_matmul_identity() {
        let pool = BufferPool::unbounded();
        let a = Tensor::from_f32(&pool, Shape::matrix(2, 2), &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let eye = Tensor::from_f32(&pool, Shape::matrix(2, 2), &[1.0, 0.0, 0.0, 1.0]).unwrap();

        let c = matmul(&a, &eye).unwrap();

        assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_matmul_shape_mismatch() {
        let pool = BufferPool::unbounded();
        let a = Tensor::zeros(&pool, Shape::matrix(2, 3)).unwrap();
        let b = Tensor::zeros(&pool, Shape::matrix(4, 2)).unwrap(); // 4 != 3

        let result = matmul(&a, &b);
        assert!(matches!(
            result,
            Err(TensorError::ShapeMismatch { op: "matmul", .. })
        ));
    }

    #[test]
    fn test_matmul_rank_unsupported() {
        let pool = BufferPool::unbounded();
        let a = Tensor::zeros(&pool, Shape::new(vec![2, 2, 2])).unwrap();
        let b = Tensor::zeros(&pool, Shape::matrix(2, 2)).unwrap();
        assert!(matches!(
            matmul(&a, &b),
            Err(TensorError::RankUnsupported { rank: 3, .. })
        ));
        let v = Tensor::zeros(&pool, Shape::vector(2)).unwrap();
        assert!(matches!(
            matmul(&b, &v),
            Err(TensorError::RankUnsupported { rank: 1, .. })
        ));
    }

    #[test]
    fn test_matmul_1x1() {
        let pool = BufferPool::unbounded();
        let a = Tensor::from_f32(&pool, Shape::matrix(1, 1), &[3.0]).unwrap();
        let b = Tensor::from_f32(&pool, Shape::matrix(1, 1), &[4.0]).unwrap();

        let c = matmul(&a, &b).unwrap();
        assert!((c.as_slice()[0] - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_matmul_transposed_operand() {
        // Aᵀ where A = [[1, 3, 5], [2, 4, 6]] is [[1, 2], [3, 4], [5, 6]].
        let pool = BufferPool::unbounded();
        let a_t = Tensor::from_f32(&pool, Shape::matrix(2, 3), &[1.0, 3.0, 5.0, 2.0, 4.0, 6.0])
            .unwrap()
            .into_permuted(&[1, 0])
            .unwrap();
        let b = Tensor::from_f32(&pool, Shape::matrix(2, 1), &[1.0, 1.0]).unwrap();

        let c = matmul(&a_t, &b).unwrap();
        assert_eq!(c.dims(), &[3, 1]);
        assert_eq!(c.as_slice(), &[3.0, 7.0, 11.0]);
    }
}
