// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: permute a rank-4 tensor, materialize it, reduce it, and watch
//! the pool.
//!
//! ```bash
//! RUST_LOG=trace cargo run -p engine --example permute_and_reduce
//! ```

use engine::{Engine, EngineConfig, ReshapePolicy};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = EngineConfig::from_toml(
        r#"
memory_budget = "64K"
reshape_policy = "materialize"
"#,
    )?;
    let engine = Engine::new(config)?;

    // A [2, 3, 4, 5] tensor holding 0..120.
    let dims = [2usize, 3, 4, 5];
    let data: Vec<f32> = (0..120).map(|x| x as f32).collect();
    let x = engine.tensor(&dims, &data)?;
    println!("x: shape {}, strides {:?}", x.shape(), x.strides());

    // Gathered permutation vs. a zero-copy view.
    let gathered = engine.permute(&x, &[-1, 0, 2, 1])?;
    let mut view = engine.copy(&x)?.into_permuted(&[3, 0, 2, 1])?;
    println!(
        "view: shape {}, strides {:?}, contiguous {}",
        view.shape(),
        view.strides(),
        view.is_contiguous()
    );
    engine.make_contiguous(&mut view)?;
    assert_eq!(view.as_slice(), gathered.as_slice());
    println!("materialized view matches gathered permute");

    // Reduce, reshape, and run a small matmul on the result.
    let per_slice = engine.sum(&view, Some(0), false)?;
    println!("sum over axis 0: shape {}", per_slice.shape());
    let m = engine.reshape(&per_slice, &[6, 4])?;
    let w = engine.full(&[4, 2], 0.5)?;
    let y = engine.sigmoid(&engine.div_scalar(&engine.matmul(&m, &w)?, 1000.0)?)?;
    println!("sigmoid(m @ w / 1000): shape {}, first row {:?}", y.shape(), &y.to_vec()[..2]);

    // Reject policy refuses strided input.
    let strided = engine.copy(&m)?.into_permuted(&[1, 0])?;
    match engine.reshape_with(&strided, &[24], ReshapePolicy::Reject) {
        Ok(_) => println!("unexpected: strided reshape accepted"),
        Err(e) => println!("reject policy: {e}"),
    }

    // Budget exhaustion is an ordinary error.
    match engine.zeros(&[128, 128]) {
        Ok(_) => println!("unexpected: allocation fit"),
        Err(e) => println!("over budget: {e}"),
    }

    engine.log_stats();
    if let Some(stats) = engine.stats() {
        println!("{}", stats.summary());
    }
    Ok(())
}
