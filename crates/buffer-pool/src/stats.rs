// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Counters describing how a [`crate::BufferPool`] has been used.

/// Cumulative allocation counters for one pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AllocationStats {
    /// Allocation requests, successful or not.
    pub total_allocations: u64,
    /// Requests served from the free list.
    pub cache_hits: u64,
    /// Requests that needed fresh storage.
    pub cache_misses: u64,
    /// Requests refused because of the budget.
    pub oom_count: u64,
    /// High-water mark of live bytes.
    pub peak_allocated_bytes: usize,
    /// Sum of the sizes of every successful allocation.
    pub cumulative_allocated_bytes: u64,
    /// Buffers dropped back into the pool.
    pub total_deallocations: u64,
}

impl AllocationStats {
    /// Fraction of successful allocations served from the free list.
    pub fn cache_hit_ratio(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / total as f64
    }

    /// Buffers handed out and not yet dropped.
    pub fn live_buffers(&self) -> u64 {
        (self.cache_hits + self.cache_misses).saturating_sub(self.total_deallocations)
    }

    pub(crate) fn record_cache_hit(&mut self, size_bytes: usize) {
        self.total_allocations += 1;
        self.cache_hits += 1;
        self.cumulative_allocated_bytes += size_bytes as u64;
    }

    pub(crate) fn record_cache_miss(&mut self, size_bytes: usize) {
        self.total_allocations += 1;
        self.cache_misses += 1;
        self.cumulative_allocated_bytes += size_bytes as u64;
    }

    pub(crate) fn record_oom(&mut self) {
        self.total_allocations += 1;
        self.oom_count += 1;
    }

    pub(crate) fn record_deallocation(&mut self) {
        self.total_deallocations += 1;
    }

    pub(crate) fn update_peak(&mut self, live_bytes: usize) {
        self.peak_allocated_bytes = self.peak_allocated_bytes.max(live_bytes);
    }

    /// One-line human-readable report.
    pub fn summary(&self) -> String {
        let peak_kb = self.peak_allocated_bytes as f64 / 1024.0;
        format!(
            "buffers: {} requested ({} reused, {} fresh, {:.0}% reuse), {} refused, \
             {} live, peak {:.1} KB",
            self.total_allocations,
            self.cache_hits,
            self.cache_misses,
            self.cache_hit_ratio() * 100.0,
            self.oom_count,
            self.live_buffers(),
            peak_kb,
        )
    }
}
