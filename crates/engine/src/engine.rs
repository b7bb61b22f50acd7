// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The session facade.
//!
//! An [`Engine`] owns one [`BufferPool`] sized by its configuration. Tensors
//! it creates draw from that pool, and so do the outputs of every operation
//! applied to them. Axis arguments accept negative values counted from the
//! last axis (`-1` is the last axis).
//!
//! Operations allocate their output from their first input's pool, so every
//! method that allocates rejects tensors drawn from another pool with
//! [`EngineError::ForeignTensor`]. Element reads, `assign` and `release`
//! allocate nothing and accept any tensor.

use crate::{EngineConfig, EngineError};
use buffer_pool::{AllocationStats, BufferPool, MemoryBudget};
use tensor_core::{ops, Placement, ReduceAxis, ReshapePolicy, Shape, Tensor, TensorError};

/// Tensor session bound to one memory budget.
///
/// # Example
/// ```
/// use engine::{Engine, EngineConfig};
///
/// # fn main() -> Result<(), engine::EngineError> {
/// let engine = Engine::new(EngineConfig::with_budget("1M"))?;
/// let a = engine.tensor(&[2, 3], &[1., 2., 3., 4., 5., 6.])?;
/// let t = engine.transpose(&a)?;
/// let s = engine.sum(&t, Some(-1), false)?;
/// assert_eq!(s.as_slice(), &[5., 7., 9.]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    budget: MemoryBudget,
    pool: BufferPool,
}

impl Engine {
    /// Creates an engine from the given configuration.
    ///
    /// # Errors
    /// [`EngineError::ConfigError`] if the memory budget does not parse.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let budget = config.parse_budget()?;
        let pool = BufferPool::new(budget);
        tracing::info!(
            "engine created: budget {budget}, placement {}, reshape policy {:?}",
            config.placement,
            config.reshape_policy
        );
        Ok(Self {
            config,
            budget,
            pool,
        })
    }

    /// Loads the configuration from a TOML file and creates an engine.
    pub fn from_config_file(path: &std::path::Path) -> Result<Self, EngineError> {
        Self::new(EngineConfig::from_file(path)?)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn budget(&self) -> MemoryBudget {
        self.budget
    }

    pub fn placement(&self) -> Placement {
        self.config.placement
    }

    /// Handle to the engine's pool.
    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// Allocation counters, or `None` when statistics are disabled.
    pub fn stats(&self) -> Option<AllocationStats> {
        self.config.enable_stats.then(|| self.pool.stats())
    }

    /// Logs the allocation summary at `info` level, if statistics are enabled.
    pub fn log_stats(&self) {
        if let Some(stats) = self.stats() {
            tracing::info!(
                live_bytes = self.pool.allocated_bytes(),
                "{}",
                stats.summary()
            );
        }
    }

    /// Bytes held by live tensors.
    pub fn allocated_bytes(&self) -> usize {
        self.pool.allocated_bytes()
    }

    /// Drops the pool's cached free buffers.
    pub fn shrink(&self) {
        self.pool.shrink();
    }

    // ── Construction ───────────────────────────────────────────

    /// Creates a tensor holding a copy of `data`.
    pub fn tensor(&self, dims: &[usize], data: &[f32]) -> Result<Tensor, EngineError> {
        Ok(Tensor::from_f32(&self.pool, Shape::from(dims), data)?)
    }

    pub fn zeros(&self, dims: &[usize]) -> Result<Tensor, EngineError> {
        Ok(Tensor::zeros(&self.pool, Shape::from(dims))?)
    }

    pub fn ones(&self, dims: &[usize]) -> Result<Tensor, EngineError> {
        self.full(dims, 1.0)
    }

    pub fn full(&self, dims: &[usize], value: f32) -> Result<Tensor, EngineError> {
        Ok(Tensor::full(&self.pool, Shape::from(dims), value)?)
    }

    pub fn zeros_like(&self, t: &Tensor) -> Result<Tensor, EngineError> {
        Ok(self.owned("zeros_like", t)?.zeros_like()?)
    }

    pub fn ones_like(&self, t: &Tensor) -> Result<Tensor, EngineError> {
        Ok(self.owned("ones_like", t)?.ones_like()?)
    }

    /// Releases a tensor's storage back to the pool.
    pub fn release(&self, t: Tensor) {
        t.release();
    }

    // ── Element access and in-place mutation ───────────────────

    /// Element at a multi-index.
    pub fn get(&self, t: &Tensor, index: &[usize]) -> Result<f32, EngineError> {
        Ok(t.get(index)?)
    }

    /// Copies `src` into `dst` element by element.
    pub fn assign(&self, dst: &mut Tensor, src: &Tensor) -> Result<(), EngineError> {
        Ok(dst.assign(src)?)
    }

    /// Rewrites `t` into canonical row-major storage.
    pub fn make_contiguous(&self, t: &mut Tensor) -> Result<(), EngineError> {
        self.owned("make_contiguous", t)?;
        Ok(t.make_contiguous()?)
    }

    // ── Elementwise ────────────────────────────────────────────

    pub fn add(&self, a: &Tensor, b: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::add(self.owned("add", a)?, self.owned("add", b)?)?)
    }

    pub fn sub(&self, a: &Tensor, b: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::sub(self.owned("sub", a)?, self.owned("sub", b)?)?)
    }

    pub fn mul(&self, a: &Tensor, b: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::mul(self.owned("mul", a)?, self.owned("mul", b)?)?)
    }

    pub fn div(&self, a: &Tensor, b: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::div(self.owned("div", a)?, self.owned("div", b)?)?)
    }

    pub fn copy(&self, t: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::copy(self.owned("copy", t)?)?)
    }

    pub fn log(&self, t: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::log(self.owned("log", t)?)?)
    }

    pub fn sigmoid(&self, t: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::sigmoid(self.owned("sigmoid", t)?)?)
    }

    /// `t^exponent`.
    pub fn pow(&self, t: &Tensor, exponent: f32) -> Result<Tensor, EngineError> {
        Ok(ops::pow_scalar(self.owned("pow", t)?, exponent)?)
    }

    /// `base^t`.
    pub fn rpow(&self, base: f32, t: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::scalar_pow(base, self.owned("rpow", t)?)?)
    }

    pub fn mul_scalar(&self, t: &Tensor, s: f32) -> Result<Tensor, EngineError> {
        Ok(ops::mul_scalar(self.owned("mul_scalar", t)?, s)?)
    }

    /// `t / s`.
    pub fn div_scalar(&self, t: &Tensor, s: f32) -> Result<Tensor, EngineError> {
        Ok(ops::div_scalar(self.owned("div_scalar", t)?, s)?)
    }

    /// `s / t`.
    pub fn scalar_div(&self, s: f32, t: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::scalar_div(s, self.owned("scalar_div", t)?)?)
    }

    pub fn add_scalar(&self, t: &Tensor, s: f32) -> Result<Tensor, EngineError> {
        Ok(ops::add_scalar(self.owned("add_scalar", t)?, s)?)
    }

    /// `s - t`.
    pub fn scalar_sub(&self, s: f32, t: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::scalar_sub(s, self.owned("scalar_sub", t)?)?)
    }

    pub fn neg(&self, t: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::neg(self.owned("neg", t)?)?)
    }

    // ── Reduction, matmul, layout ──────────────────────────────

    /// Sums over `axis`, or over every element when `axis` is `None`.
    pub fn sum(
        &self,
        t: &Tensor,
        axis: Option<isize>,
        keepdim: bool,
    ) -> Result<Tensor, EngineError> {
        let t = self.owned("sum", t)?;
        let axis = match axis {
            None => ReduceAxis::All,
            Some(a) => ReduceAxis::Dim(normalize_axis("sum", a, t.ndim())?),
        };
        Ok(ops::sum(t, axis, keepdim)?)
    }

    pub fn matmul(&self, a: &Tensor, b: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::matmul(self.owned("matmul", a)?, self.owned("matmul", b)?)?)
    }

    /// Reverses every axis.
    pub fn transpose(&self, t: &Tensor) -> Result<Tensor, EngineError> {
        Ok(ops::transpose(self.owned("transpose", t)?)?)
    }

    /// Reorders axes; axis `j` of the result is axis `axes[j]` of `t`.
    pub fn permute(&self, t: &Tensor, axes: &[isize]) -> Result<Tensor, EngineError> {
        let t = self.owned("permute", t)?;
        let ndim = t.ndim();
        let axes = axes
            .iter()
            .map(|&a| normalize_axis("permute", a, ndim))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ops::permute(t, &axes)?)
    }

    pub fn swap_axes(&self, t: &Tensor, a: isize, b: isize) -> Result<Tensor, EngineError> {
        let t = self.owned("swap_axes", t)?;
        let ndim = t.ndim();
        let a = normalize_axis("swap_axes", a, ndim)?;
        let b = normalize_axis("swap_axes", b, ndim)?;
        Ok(ops::swap_axes(t, a, b)?)
    }

    /// Reshapes under the configured [`ReshapePolicy`].
    pub fn reshape(&self, t: &Tensor, dims: &[usize]) -> Result<Tensor, EngineError> {
        self.reshape_with(t, dims, self.config.reshape_policy)
    }

    pub fn reshape_with(
        &self,
        t: &Tensor,
        dims: &[usize],
        policy: ReshapePolicy,
    ) -> Result<Tensor, EngineError> {
        Ok(ops::reshape(self.owned("reshape", t)?, Shape::from(dims), policy)?)
    }

    /// Passes `t` through if its storage came from this engine's pool.
    fn owned<'t>(&self, op: &'static str, t: &'t Tensor) -> Result<&'t Tensor, EngineError> {
        if t.pool().same_pool(&self.pool) {
            Ok(t)
        } else {
            Err(EngineError::ForeignTensor { op })
        }
    }
}

/// Maps `axis` in `-ndim..ndim` to `0..ndim`.
pub(crate) fn normalize_axis(
    op: &'static str,
    axis: isize,
    ndim: usize,
) -> Result<usize, TensorError> {
    let rank = ndim as isize;
    let resolved = if axis < 0 { axis + rank } else { axis };
    if (0..rank).contains(&resolved) {
        Ok(resolved as usize)
    } else {
        Err(TensorError::InvalidAxis { op, axis, ndim })
    }
}
