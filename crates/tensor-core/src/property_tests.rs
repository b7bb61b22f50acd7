// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property-based tests for layout and tensor operations.

use crate::{layout, ops, ReduceAxis, Shape, Tensor};
use buffer_pool::BufferPool;
use proptest::prelude::*;

/// Rank 1..=4, each extent 1..=4.
fn dims_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..=4, 1..=4)
}

/// A shape together with one value per element.
fn tensor_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<f32>)> {
    dims_strategy().prop_flat_map(|dims| {
        let n = dims.iter().product::<usize>();
        (Just(dims), prop::collection::vec(-100.0f32..100.0, n))
    })
}

/// A shape with small integer values, so sums are exact in `f32`.
fn integer_tensor_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<f32>)> {
    dims_strategy().prop_flat_map(|dims| {
        let n = dims.iter().product::<usize>();
        let values = prop::collection::vec((-100i32..100).prop_map(|v| v as f32), n);
        (Just(dims), values)
    })
}

/// A shape, two value vectors for it, and a permutation of its axes.
fn pair_and_axes_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<f32>, Vec<f32>, Vec<usize>)> {
    dims_strategy().prop_flat_map(|dims| {
        let n = dims.iter().product::<usize>();
        let rank = dims.len();
        (
            Just(dims),
            prop::collection::vec(-100.0f32..100.0, n),
            prop::collection::vec(-100.0f32..100.0, n),
            Just((0..rank).collect::<Vec<usize>>()).prop_shuffle(),
        )
    })
}

proptest! {
    /// Every multi-index reads back the value it was constructed with.
    #[test]
    fn prop_construction_round_trip((dims, data) in tensor_strategy()) {
        let pool = BufferPool::unbounded();
        let t = Tensor::from_f32(&pool, Shape::new(dims.clone()), &data).unwrap();
        for (flat, &expected) in data.iter().enumerate() {
            let index = layout::decompose(flat, &dims);
            prop_assert_eq!(t.get(&index).unwrap(), expected);
        }
    }

    /// `(a + b) - b ≈ a`.
    #[test]
    fn prop_additive_inverse((dims, a, b, _axes) in pair_and_axes_strategy()) {
        let pool = BufferPool::unbounded();
        let shape = Shape::new(dims);
        let ta = Tensor::from_f32(&pool, shape.clone(), &a).unwrap();
        let tb = Tensor::from_f32(&pool, shape, &b).unwrap();
        let back = ops::sub(&ops::add(&ta, &tb).unwrap(), &tb).unwrap();
        for (x, y) in back.as_slice().iter().zip(&a) {
            prop_assert!((x - y).abs() < 1e-4, "{} vs {}", x, y);
        }
    }

    /// Transposing twice restores shape and values, at any rank.
    #[test]
    fn prop_transpose_involution((dims, data) in tensor_strategy()) {
        let pool = BufferPool::unbounded();
        let t = Tensor::from_f32(&pool, Shape::new(dims), &data).unwrap();
        let back = ops::transpose(&ops::transpose(&t).unwrap()).unwrap();
        prop_assert_eq!(back.shape(), t.shape());
        prop_assert_eq!(back.as_slice(), t.as_slice());
    }

    /// A permuted view, once materialized, matches the gathered permute.
    #[test]
    fn prop_view_then_materialize_matches_permute((dims, a, _b, axes) in pair_and_axes_strategy()) {
        let pool = BufferPool::unbounded();
        let t = Tensor::from_f32(&pool, Shape::new(dims), &a).unwrap();
        let gathered = ops::permute(&t, &axes).unwrap();
        let materialized = t.into_permuted(&axes).unwrap().into_contiguous().unwrap();
        prop_assert!(materialized.is_contiguous());
        prop_assert_eq!(materialized.shape(), gathered.shape());
        prop_assert_eq!(materialized.as_slice(), gathered.as_slice());
    }

    /// Materializing a canonical tensor leaves its values unchanged.
    #[test]
    fn prop_materialization_idempotent((dims, data) in tensor_strategy()) {
        let pool = BufferPool::unbounded();
        let mut t = Tensor::from_f32(&pool, Shape::new(dims), &data).unwrap();
        t.make_contiguous().unwrap();
        prop_assert_eq!(t.as_slice(), data.as_slice());
        t.make_contiguous().unwrap();
        prop_assert_eq!(t.as_slice(), data.as_slice());
    }

    /// Summing over every axis in turn agrees with the full sum.
    #[test]
    fn prop_axis_sums_agree_with_full_sum((dims, data) in integer_tensor_strategy()) {
        let pool = BufferPool::unbounded();
        let t = Tensor::from_f32(&pool, Shape::new(dims.clone()), &data).unwrap();
        let full = ops::sum(&t, ReduceAxis::All, false).unwrap().as_slice()[0];

        let mut acc = ops::copy(&t).unwrap();
        for _ in 0..dims.len() {
            acc = ops::sum(&acc, ReduceAxis::Dim(0), false).unwrap();
        }
        prop_assert_eq!(acc.size(), 1);
        prop_assert_eq!(acc.as_slice()[0], full);
    }

    /// Strided offsets never leave the buffer.
    #[test]
    fn prop_source_offset_in_bounds((dims, _a, _b, axes) in pair_and_axes_strategy()) {
        let n: usize = dims.iter().product();
        let strides = layout::canonical_strides(&dims);
        let pdims: Vec<usize> = axes.iter().map(|&a| dims[a]).collect();
        let pstrides: Vec<usize> = axes.iter().map(|&a| strides[a]).collect();
        let mut seen = vec![false; n];
        for flat in 0..n {
            let off = layout::source_offset(flat, &pdims, &pstrides);
            prop_assert!(off < n);
            prop_assert!(!seen[off]);
            seen[off] = true;
        }
    }
}
