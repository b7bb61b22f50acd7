// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Contiguity materializer.
//!
//! Rewrites a tensor carrying arbitrary strides into canonical row-major
//! storage. The new buffer is allocated from the tensor's own pool and fully
//! written before the old buffer is handed back; the borrow checker holds
//! the ordering, since the old buffer is only reachable through `&mut self`
//! until [`Tensor::replace_storage`] returns it.

use crate::{layout, Tensor, TensorError};

/// Strided gather: `dst[i] = src[source_offset(i, dims, strides)]` for every
/// logical position `i` of `dst`.
pub(crate) fn gather_into(src: &[f32], dims: &[usize], strides: &[usize], dst: &mut [f32]) {
    for (i, slot) in dst.iter_mut().enumerate() {
        *slot = src[layout::source_offset(i, dims, strides)];
    }
}

impl Tensor {
    /// Rewrites the tensor into canonical row-major storage.
    ///
    /// A tensor that is already canonical is left as is. Otherwise every
    /// element is gathered into a fresh buffer, after which the buffer and
    /// strides are replaced together and the old buffer is released.
    ///
    /// # Errors
    /// [`TensorError::Allocation`] if the pool cannot hold the new buffer
    /// alongside the old one. The tensor is unchanged in that case.
    pub fn make_contiguous(&mut self) -> Result<(), TensorError> {
        if self.is_contiguous() {
            return Ok(());
        }
        let mut fresh = self.pool().allocate(self.size())?;
        gather_into(self.as_slice(), self.dims(), self.strides(), &mut fresh);
        tracing::trace!(
            shape = %self.shape(),
            from = ?self.strides(),
            "materialized strided tensor"
        );
        let canonical = self.shape().strides();
        let old = self.replace_storage(fresh, canonical);
        drop(old);
        Ok(())
    }

    /// Consuming form of [`Tensor::make_contiguous`].
    pub fn into_contiguous(mut self) -> Result<Self, TensorError> {
        self.make_contiguous()?;
        Ok(self)
    }
}
