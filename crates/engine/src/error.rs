// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the engine.

/// Errors surfaced by [`crate::Engine`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A tensor operation failed.
    #[error("tensor error: {0}")]
    Tensor(#[from] tensor_core::TensorError),

    /// The buffer pool refused a request made outside a tensor operation.
    #[error("memory error: {0}")]
    Memory(#[from] buffer_pool::PoolError),

    /// An operation was handed a tensor whose storage belongs to another
    /// pool, so its output would escape this engine's budget.
    #[error("{op}: tensor was not allocated by this engine's pool")]
    ForeignTensor { op: &'static str },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl EngineError {
    /// The underlying tensor error, if this is one.
    pub fn as_tensor_error(&self) -> Option<&tensor_core::TensorError> {
        match self {
            EngineError::Tensor(e) => Some(e),
            _ => None,
        }
    }
}
