// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Exclusively owned `f32` storage that returns to its pool on drop.

use crate::pool::PoolInner;
use crate::BufferPool;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// A run of `f32` values owned by exactly one holder.
///
/// `FloatBuffer` is not `Clone`: a tensor's storage is never
/// shared. Dropping the buffer hands its storage back to the
/// [`BufferPool`](crate::BufferPool) it came from and releases its share of
/// the budget.
///
/// ```
/// use buffer_pool::{BufferPool, MemoryBudget};
///
/// let pool = BufferPool::new(MemoryBudget::from_mb(1));
/// let mut buf = pool.allocate(4).unwrap();
/// buf[2] = 7.5;
/// assert_eq!(&buf[..], &[0.0, 0.0, 7.5, 0.0]);
/// drop(buf);
/// assert_eq!(pool.allocated_bytes(), 0);
/// ```
pub struct FloatBuffer {
    data: Vec<f32>,
    pool: Arc<PoolInner>,
}

impl FloatBuffer {
    pub(crate) fn new(data: Vec<f32>, pool: Arc<PoolInner>) -> Self {
        Self { data, pool }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes charged against the pool budget for this buffer.
    pub fn size_bytes(&self) -> usize {
        self.data.len() * crate::ELEMENT_BYTES
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Handle to the pool this buffer will return to.
    pub fn pool(&self) -> BufferPool {
        BufferPool::from_inner(Arc::clone(&self.pool))
    }

    /// `true` when both buffers were handed out by the same pool.
    pub fn same_pool(&self, other: &FloatBuffer) -> bool {
        Arc::ptr_eq(&self.pool, &other.pool)
    }
}

impl Deref for FloatBuffer {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.data
    }
}

impl DerefMut for FloatBuffer {
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

impl Drop for FloatBuffer {
    fn drop(&mut self) {
        let data = std::mem::take(&mut self.data);
        self.pool.reclaim(data);
    }
}

impl fmt::Debug for FloatBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatBuffer")
            .field("len", &self.data.len())
            .field("size_bytes", &self.size_bytes())
            .finish()
    }
}
