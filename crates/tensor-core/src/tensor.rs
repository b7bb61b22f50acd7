// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The strided tensor entity.

use crate::{layout, Placement, Shape, TensorError};
use buffer_pool::{BufferPool, FloatBuffer};

/// An owned, n-dimensional `f32` tensor.
///
/// A `Tensor` owns its shape, its strides and its [`FloatBuffer`] as one
/// value. Storage comes from a [`BufferPool`] and goes back to it when the
/// tensor is dropped or [released](Tensor::release). There is no `Clone`:
/// copies are explicit and fallible ([`Tensor::try_clone`],
/// [`crate::ops::copy`]).
///
/// # Memory Layout
/// Tensors built by constructors and by every operation in [`crate::ops`]
/// are canonical (row-major). [`Tensor::into_permuted`] produces a
/// non-canonical view over the same storage; [`Tensor::make_contiguous`]
/// rewrites it back into canonical order.
#[derive(Debug)]
pub struct Tensor {
    shape: Shape,
    strides: Vec<usize>,
    buffer: FloatBuffer,
    placement: Placement,
}

impl Tensor {
    /// Creates a tensor holding a copy of `values`.
    ///
    /// # Examples
    /// ```
    /// use buffer_pool::BufferPool;
    /// use tensor_core::{Shape, Tensor};
    ///
    /// let pool = BufferPool::unbounded();
    /// let t = Tensor::from_f32(&pool, Shape::matrix(2, 2), &[1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(t.get(&[1, 0]).unwrap(), 3.0);
    /// assert_eq!(t.strides(), &[2, 1]);
    /// ```
    ///
    /// # Errors
    /// - [`TensorError::InvalidShape`] if the shape is empty or has a zero extent.
    /// - [`TensorError::BufferSizeMismatch`] if `values.len()` differs from
    ///   the shape's element count (this includes empty `values`).
    /// - [`TensorError::Allocation`] if the pool refuses the request.
    pub fn from_f32(pool: &BufferPool, shape: Shape, values: &[f32]) -> Result<Self, TensorError> {
        let expected = shape.validate()?;
        if values.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        let buffer = pool.allocate_from_slice(values)?;
        Ok(Self::from_canonical(shape, buffer))
    }

    /// Creates a tensor of zeros.
    pub fn zeros(pool: &BufferPool, shape: Shape) -> Result<Self, TensorError> {
        let size = shape.validate()?;
        let buffer = pool.allocate(size)?;
        Ok(Self::from_canonical(shape, buffer))
    }

    /// Creates a tensor with every element set to `value`.
    pub fn full(pool: &BufferPool, shape: Shape, value: f32) -> Result<Self, TensorError> {
        let mut t = Self::zeros(pool, shape)?;
        t.buffer.fill(value);
        Ok(t)
    }

    /// Zeros with this tensor's shape, from this tensor's pool.
    pub fn zeros_like(&self) -> Result<Self, TensorError> {
        Self::zeros(&self.pool(), self.shape.clone())
    }

    /// Ones with this tensor's shape, from this tensor's pool.
    pub fn ones_like(&self) -> Result<Self, TensorError> {
        Self::full(&self.pool(), self.shape.clone(), 1.0)
    }

    /// Wraps a buffer already filled in row-major order for `shape`.
    pub(crate) fn from_canonical(shape: Shape, buffer: FloatBuffer) -> Self {
        debug_assert_eq!(shape.num_elements(), buffer.len());
        let strides = shape.strides();
        Self {
            shape,
            strides,
            buffer,
            placement: Placement::Host,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Rank.
    pub fn ndim(&self) -> usize {
        self.shape.rank()
    }

    /// Element count.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// `true` if the strides are the row-major strides of the shape.
    pub fn is_contiguous(&self) -> bool {
        layout::is_canonical(self.shape.dims(), &self.strides)
    }

    /// Handle to the pool this tensor's storage came from.
    pub fn pool(&self) -> BufferPool {
        self.buffer.pool()
    }

    /// Raw storage, in storage order (not logical order when the tensor is a
    /// permuted view).
    pub fn as_slice(&self) -> &[f32] {
        self.buffer.as_slice()
    }

    /// Element at a multi-index.
    ///
    /// # Errors
    /// [`TensorError::IndexOutOfRange`] if `index` has the wrong rank or any
    /// component is out of range.
    pub fn get(&self, index: &[usize]) -> Result<f32, TensorError> {
        let offset = layout::linear_offset(self.shape.dims(), &self.strides, index)?;
        Ok(self.buffer[offset])
    }

    /// Value at logical (row-major) position `flat`, read through the strides.
    #[inline]
    pub(crate) fn at_logical(&self, flat: usize) -> f32 {
        self.buffer[layout::source_offset(flat, self.shape.dims(), &self.strides)]
    }

    /// All elements in logical (row-major) order.
    pub fn to_vec(&self) -> Vec<f32> {
        if self.is_contiguous() {
            return self.buffer.to_vec();
        }
        (0..self.size()).map(|i| self.at_logical(i)).collect()
    }

    /// Copies this tensor's storage and layout verbatim into a new buffer
    /// from the same pool. A permuted view stays a permuted view.
    pub fn try_clone(&self) -> Result<Self, TensorError> {
        let buffer = self.pool().allocate_from_slice(self.buffer.as_slice())?;
        Ok(Self {
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            buffer,
            placement: self.placement,
        })
    }

    /// Overwrites every element of `self` with the element of `src` at the
    /// same multi-index. Both tensors may have any strides.
    ///
    /// # Errors
    /// [`TensorError::ShapeMismatch`] if the shapes differ; `self` is left
    /// untouched.
    pub fn assign(&mut self, src: &Tensor) -> Result<(), TensorError> {
        if self.shape != src.shape {
            return Err(TensorError::ShapeMismatch {
                op: "assign",
                lhs: self.shape.clone(),
                rhs: src.shape.clone(),
            });
        }
        if self.is_contiguous() && src.is_contiguous() {
            self.buffer.copy_from_slice(src.as_slice());
            return Ok(());
        }
        let dims = self.shape.dims();
        for i in 0..src.size() {
            let dst = layout::source_offset(i, dims, &self.strides);
            self.buffer[dst] = src.at_logical(i);
        }
        Ok(())
    }

    /// Reorders the axes without moving data: axis `j` of the result is axis
    /// `axes[j]` of `self`. The result is generally non-canonical; pass it
    /// through [`Tensor::make_contiguous`] or any operation in
    /// [`crate::ops`] to obtain canonical storage.
    ///
    /// # Errors
    /// [`TensorError::InvalidPermutation`] if `axes` is not a permutation of
    /// `0..ndim`.
    pub fn into_permuted(self, axes: &[usize]) -> Result<Self, TensorError> {
        check_permutation(axes, self.ndim())?;
        let shape = self.shape.permuted(axes);
        let strides = axes.iter().map(|&a| self.strides[a]).collect();
        Ok(Self {
            shape,
            strides,
            buffer: self.buffer,
            placement: self.placement,
        })
    }

    /// Exchanges axes `a` and `b` without moving data.
    ///
    /// # Errors
    /// [`TensorError::InvalidAxis`] if either axis is out of range.
    pub fn into_swapped(self, a: usize, b: usize) -> Result<Self, TensorError> {
        let ndim = self.ndim();
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
        self.into_permuted(&axes)
    }

    /// Replaces the layout wholesale. Used by the materializer.
    pub(crate) fn replace_storage(
        &mut self,
        buffer: FloatBuffer,
        strides: Vec<usize>,
    ) -> FloatBuffer {
        self.strides = strides;
        std::mem::replace(&mut self.buffer, buffer)
    }

    /// Releases the tensor's storage back to its pool.
    ///
    /// Equivalent to dropping the tensor; provided so call sites can make
    /// the end of a tensor's life explicit. Releasing twice does not compile.
    pub fn release(self) {
        drop(self);
    }
}

/// Checks that `axes` contains each of `0..ndim` exactly once.
pub(crate) fn check_permutation(axes: &[usize], ndim: usize) -> Result<(), TensorError> {
    let invalid = || TensorError::InvalidPermutation {
        axes: axes.to_vec(),
        ndim,
    };
    if axes.len() != ndim {
        return Err(invalid());
    }
    let mut seen = vec![false; ndim];
    for &a in axes {
        if a >= ndim || seen[a] {
            return Err(invalid());
        }
        seen[a] = true;
    }
    Ok(())
}
