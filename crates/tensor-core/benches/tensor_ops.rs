// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for tensor operations.

use buffer_pool::BufferPool;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tensor_core::{ops, ReduceAxis, Shape, Tensor};

fn filled(pool: &BufferPool, dims: Vec<usize>) -> Tensor {
    let n: usize = dims.iter().product();
    let data: Vec<f32> = (0..n).map(|i| (i % 17) as f32 * 0.25).collect();
    Tensor::from_f32(pool, Shape::new(dims), &data).unwrap()
}

fn bench_matmul(c: &mut Criterion) {
    let pool = BufferPool::unbounded();
    let mut group = c.benchmark_group("matmul");
    for n in [32usize, 64, 128] {
        let a = filled(&pool, vec![n, n]);
        let b = filled(&pool, vec![n, n]);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bencher, _| {
            bencher.iter(|| ops::matmul(black_box(&a), black_box(&b)).unwrap());
        });
    }
    group.finish();
}

fn bench_materialize(c: &mut Criterion) {
    let pool = BufferPool::unbounded();
    let mut group = c.benchmark_group("materialize");
    for dims in [vec![256, 256], vec![32, 32, 64], vec![8, 8, 16, 32]] {
        let rank = dims.len();
        let label = format!("{}", Shape::new(dims.clone()));
        let reversed: Vec<usize> = (0..rank).rev().collect();
        group.bench_function(BenchmarkId::new("reverse", label), |bencher| {
            bencher.iter_batched(
                || filled(&pool, dims.clone()).into_permuted(&reversed).unwrap(),
                |mut view| {
                    view.make_contiguous().unwrap();
                    view
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_sum_axis(c: &mut Criterion) {
    let pool = BufferPool::unbounded();
    let x = filled(&pool, vec![64, 64, 64]);
    c.bench_function("sum_axis1_64x64x64", |bencher| {
        bencher.iter(|| ops::sum(black_box(&x), ReduceAxis::Dim(1), false).unwrap());
    });
}

criterion_group!(benches, bench_matmul, bench_materialize, bench_sum_axis);
criterion_main!(benches);
