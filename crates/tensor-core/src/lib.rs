// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Strided `f32` tensors over pooled storage.
//!
//! This crate provides:
//! - [`Tensor`]: an owned n-dimensional tensor (shape, strides, buffer and
//!   [`Placement`] as one value) whose storage returns to its
//!   [`buffer_pool::BufferPool`] when dropped.
//! - [`Shape`] and the [`layout`] arithmetic (canonical strides, offsets,
//!   mixed-radix decomposition).
//! - [`ops`]: elementwise binary and scalar operations, `sigmoid`, `log`,
//!   `pow`, `sum` reductions, `matmul`, axis permutation for any rank, and
//!   `reshape`.
//! - The contiguity materializer, [`Tensor::make_contiguous`].
//!
//! # Example
//! ```
//! use buffer_pool::{BufferPool, MemoryBudget};
//! use tensor_core::{ops, ReduceAxis, Shape, Tensor};
//!
//! let pool = BufferPool::new(MemoryBudget::from_mb(1));
//! let a = Tensor::from_f32(&pool, Shape::matrix(2, 3), &[1., 2., 3., 4., 5., 6.]).unwrap();
//! let at = ops::transpose(&a).unwrap();
//! let gram = ops::matmul(&a, &at).unwrap();
//! let total = ops::sum(&gram, ReduceAxis::All, false).unwrap();
//! assert_eq!(total.as_slice(), &[14. + 32. + 32. + 77.]);
//! ```
//!
//! # Design Goals
//! - Single ownership: no `Clone`, no reference-counted storage.
//! - Every fallible call returns [`TensorError`]; nothing aborts.
//! - Operands are always read through their strides.

mod error;
pub mod layout;
mod materialize;
pub mod ops;
mod placement;
mod shape;
mod tensor;

#[cfg(test)]
mod property_tests;

pub use error::TensorError;
pub use ops::{ReduceAxis, ReshapePolicy};
pub use placement::Placement;
pub use shape::Shape;
pub use tensor::Tensor;
