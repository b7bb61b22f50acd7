// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # engine
//!
//! A configured session over the strided tensor core.
//!
//! The engine takes:
//! - An [`EngineConfig`], from TOML or built in code.
//! - A memory budget, which sizes the [`buffer_pool::BufferPool`] every
//!   tensor of the session draws from.
//!
//! And exposes every tensor operation as a method on [`Engine`], taking and
//! returning tensors explicitly. Failures of any layer come back as one
//! [`EngineError`].
//!
//! ```text
//! EngineConfig ──▶ Engine ──▶ BufferPool
//!                    │
//!                    └─▶ tensor_core::ops ──▶ Tensor (storage from the pool)
//! ```

mod config;
mod engine;
mod error;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;

pub use tensor_core::{Placement, ReshapePolicy, Shape, Tensor, TensorError};
