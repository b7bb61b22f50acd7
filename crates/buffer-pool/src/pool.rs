// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Budgeted pool of `f32` tensor buffers.
//!
//! The [`BufferPool`] is where every tensor's storage comes from. It:
//!
//! 1. Enforces a hard ceiling on live bytes; a request that would cross it
//!    fails with [`PoolError::OutOfMemory`] instead of aborting.
//! 2. Keeps returned storage in a free list binned by size class, so the
//!    allocate/compute/release rhythm of tensor operations reuses memory.
//! 3. Records [`AllocationStats`].
//!
//! # Size Classes
//! A request for `len` elements is binned under the smallest power of two
//! that is `>= len` and `>= MIN_SIZE_CLASS`. Reused storage is cleared and
//! resized to exactly `len` zeroed elements before it is handed out.
//!
//! Storage is grown with `try_reserve_exact`, so a request that fits the
//! budget but not the host fails with [`PoolError::AllocationFailed`].
//!
//! # Thread Safety
//! The pool is `Send + Sync`; buffers hold an `Arc` to the shared state so
//! they can be moved across threads independently of the pool handle.

use crate::{AllocationStats, FloatBuffer, MemoryBudget, PoolError, ELEMENT_BYTES};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Smallest size class, in elements.
const MIN_SIZE_CLASS: usize = 1024;

/// State shared between the pool handle and every live [`FloatBuffer`].
pub(crate) struct PoolInner {
    budget: MemoryBudget,
    /// Bytes held by live buffers.
    allocated_bytes: AtomicUsize,
    /// size class → cached storage.
    free_buffers: Mutex<HashMap<usize, Vec<Vec<f32>>>>,
    free_list_bytes: AtomicUsize,
    stats: Mutex<AllocationStats>,
}

impl PoolInner {
    /// Takes storage back from a dropped [`FloatBuffer`].
    pub(crate) fn reclaim(&self, buffer: Vec<f32>) {
        let size_bytes = buffer.len() * ELEMENT_BYTES;
        self.allocated_bytes.fetch_sub(size_bytes, Ordering::AcqRel);

        if let Ok(mut stats) = self.stats.lock() {
            stats.record_deallocation();
        }

        if buffer.is_empty() {
            return;
        }

        let size_class = size_class_for(buffer.len());
        if let Ok(mut free) = self.free_buffers.lock() {
            self.free_list_bytes.fetch_add(size_bytes, Ordering::AcqRel);
            free.entry(size_class).or_default().push(buffer);
        }
        tracing::trace!(size_bytes, size_class, "buffer returned to pool");
    }

    fn take_cached(&self, len: usize) -> Option<Vec<f32>> {
        let size_class = size_class_for(len);
        let mut free = self.free_buffers.lock().ok()?;
        let mut buf = free.get_mut(&size_class)?.pop()?;
        self.free_list_bytes
            .fetch_sub(buf.len() * ELEMENT_BYTES, Ordering::AcqRel);
        buf.clear();
        Some(buf)
    }
}

/// Allocator for tensor storage.
///
/// ```
/// use buffer_pool::{BufferPool, MemoryBudget, PoolError};
///
/// let pool = BufferPool::new(MemoryBudget::from_kb(4)); // 1024 elements
/// let buf = pool.allocate(1000).unwrap();
/// assert!(matches!(pool.allocate(100), Err(PoolError::OutOfMemory { .. })));
/// drop(buf);
/// assert!(pool.allocate(100).is_ok());
/// ```
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<PoolInner>,
}

impl BufferPool {
    pub fn new(budget: MemoryBudget) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                budget,
                allocated_bytes: AtomicUsize::new(0),
                free_buffers: Mutex::new(HashMap::new()),
                free_list_bytes: AtomicUsize::new(0),
                stats: Mutex::new(AllocationStats::default()),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<PoolInner>) -> Self {
        Self { inner }
    }

    /// A pool whose budget never runs out.
    pub fn unbounded() -> Self {
        Self::new(MemoryBudget::unlimited())
    }

    /// Allocates `len` zeroed `f32` elements.
    ///
    /// Storage is taken from the free list when a buffer of the matching
    /// size class is cached (cache hit), otherwise freshly allocated.
    pub fn allocate(&self, len: usize) -> Result<FloatBuffer, PoolError> {
        if len == 0 {
            return Err(PoolError::ZeroSizedAllocation);
        }
        let size_bytes = len
            .checked_mul(ELEMENT_BYTES)
            .ok_or(PoolError::SizeOverflow { len })?;

        self.reserve(size_bytes)?;

        let cached = self.inner.take_cached(len);
        let is_hit = cached.is_some();
        let mut data = cached.unwrap_or_default();
        if data.try_reserve_exact(len).is_err() {
            self.inner
                .allocated_bytes
                .fetch_sub(size_bytes, Ordering::AcqRel);
            if let Ok(mut stats) = self.inner.stats.lock() {
                stats.record_oom();
            }
            tracing::debug!(len, size_bytes, "system allocator refused buffer");
            return Err(PoolError::AllocationFailed { len, size_bytes });
        }
        data.resize(len, 0.0);

        if let Ok(mut stats) = self.inner.stats.lock() {
            if is_hit {
                stats.record_cache_hit(size_bytes);
            } else {
                stats.record_cache_miss(size_bytes);
            }
            stats.update_peak(self.inner.allocated_bytes.load(Ordering::Acquire));
        }
        tracing::trace!(len, size_bytes, cache_hit = is_hit, "buffer allocated");

        Ok(FloatBuffer::new(data, Arc::clone(&self.inner)))
    }

    /// Allocates a buffer holding a copy of `values`.
    pub fn allocate_from_slice(&self, values: &[f32]) -> Result<FloatBuffer, PoolError> {
        let mut buf = self.allocate(values.len())?;
        buf.copy_from_slice(values);
        Ok(buf)
    }

    /// Charges `size_bytes` against the budget, failing without side effects
    /// on the live counter if it does not fit.
    fn reserve(&self, size_bytes: usize) -> Result<(), PoolError> {
        let budget = self.inner.budget.as_bytes();
        let reserved = self.inner.allocated_bytes.fetch_update(
            Ordering::AcqRel,
            Ordering::Acquire,
            |current| {
                current
                    .checked_add(size_bytes)
                    .filter(|&total| total <= budget)
            },
        );

        match reserved {
            Ok(_) => Ok(()),
            Err(current) => {
                if let Ok(mut stats) = self.inner.stats.lock() {
                    stats.record_oom();
                }
                tracing::debug!(
                    requested = size_bytes,
                    live = current,
                    budget,
                    "buffer allocation refused"
                );
                Err(PoolError::OutOfMemory {
                    requested_bytes: size_bytes,
                    available_bytes: budget.saturating_sub(current),
                    budget_bytes: budget,
                })
            }
        }
    }

    /// Bytes held by live buffers.
    pub fn allocated_bytes(&self) -> usize {
        self.inner.allocated_bytes.load(Ordering::Acquire)
    }

    /// Bytes that can still be allocated before hitting the budget.
    pub fn available_bytes(&self) -> usize {
        self.inner
            .budget
            .as_bytes()
            .saturating_sub(self.allocated_bytes())
    }

    pub fn budget(&self) -> MemoryBudget {
        self.inner.budget
    }

    /// Snapshot of the allocation counters.
    pub fn stats(&self) -> AllocationStats {
        self.inner
            .stats
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Drops every cached free buffer. Live buffers are unaffected.
    pub fn shrink(&self) {
        if let Ok(mut free) = self.inner.free_buffers.lock() {
            free.clear();
            let released = self.inner.free_list_bytes.swap(0, Ordering::AcqRel);
            tracing::debug!(released_bytes = released, "buffer pool shrunk");
        }
    }

    /// Whether `other` is a handle to this same pool.
    pub fn same_pool(&self, other: &BufferPool) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Bytes currently parked in the free list.
    pub fn free_list_bytes(&self) -> usize {
        self.inner.free_list_bytes.load(Ordering::Acquire)
    }
}

/// Smallest power of two that is `>= len` and `>= MIN_SIZE_CLASS`.
fn size_class_for(len: usize) -> usize {
    len.max(MIN_SIZE_CLASS).next_power_of_two()
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("budget", &self.inner.budget)
            .field("allocated_bytes", &self.allocated_bytes())
            .field("available_bytes", &self.available_bytes())
            .finish()
    }
}
