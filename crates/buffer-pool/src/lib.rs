// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # buffer-pool
//!
//! Ownership layer for the flat `f32` storage behind every tensor.
//!
//! # Key Components
//!
//! - [`MemoryBudget`]: a hard ceiling on live buffer bytes, parsed from
//!   strings such as `"256M"` or `"1G"`.
//! - [`BufferPool`]: hands out zeroed buffers, refuses requests that would
//!   exceed the budget, and recycles returned storage by size class.
//! - [`FloatBuffer`]: an exclusively owned run of `f32` values. It cannot
//!   be cloned or shared; dropping it is the only way to release it, and the
//!   drop hands the storage back to the pool.
//! - [`AllocationStats`]: hit/miss counters, peak usage and OOM count.
//!
//! # Ownership Model
//!
//! ```text
//! BufferPool::allocate(len)
//!       │
//!       ▼
//!   FloatBuffer  ◄─── owns Vec<f32>, holds Arc<PoolInner>
//!       │
//!       │  drop()
//!       ▼
//!   PoolInner::reclaim()  ──► free list
//! ```
//!
//! Release is tied to scope: every exit path of the owning tensor drops the
//! buffer exactly once, so double release and use-after-release are
//! compile errors rather than runtime checks.
//!
//! # Example
//! ```
//! use buffer_pool::{BufferPool, MemoryBudget};
//!
//! let pool = BufferPool::new(MemoryBudget::from_mb(4));
//!
//! let a = pool.allocate(1024).unwrap(); // 4 KB of f32
//! let b = pool.allocate(256).unwrap();
//! assert_eq!(pool.allocated_bytes(), (1024 + 256) * 4);
//!
//! drop(a);
//! assert_eq!(pool.allocated_bytes(), 256 * 4);
//! # drop(b);
//! ```

mod budget;
mod error;
mod guard;
pub mod pool;
mod stats;

pub use budget::MemoryBudget;
pub use error::PoolError;
pub use guard::FloatBuffer;
pub use pool::BufferPool;
pub use stats::AllocationStats;

/// Size in bytes of one buffer element.
pub const ELEMENT_BYTES: usize = std::mem::size_of::<f32>();
