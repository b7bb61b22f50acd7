// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for buffer allocation.

/// Errors raised by the buffer pool and budget parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Serving the request would push live bytes past the budget.
    #[error("out of memory: requested {requested_bytes} bytes, but only {available_bytes} available (budget: {budget_bytes})")]
    OutOfMemory {
        requested_bytes: usize,
        available_bytes: usize,
        budget_bytes: usize,
    },

    /// The request fit the budget but the system allocator refused it.
    #[error("system allocator refused {size_bytes} bytes ({len} elements)")]
    AllocationFailed { len: usize, size_bytes: usize },

    /// A buffer of zero elements was requested.
    #[error("cannot allocate a zero-length buffer")]
    ZeroSizedAllocation,

    /// `len * 4` does not fit in `usize`.
    #[error("buffer of {len} elements overflows the address space")]
    SizeOverflow { len: usize },

    /// A budget string could not be parsed.
    #[error("invalid memory budget '{input}': {reason}")]
    InvalidBudget { input: String, reason: String },
}
