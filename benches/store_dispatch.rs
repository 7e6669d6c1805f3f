// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the toast store and the toaster view-model.
//!
//! Measures the performance of:
//! - Dispatching upserts into a full store (eviction path)
//! - Re-deriving a mounted toaster on every dispatch
//! - Computing stacking offsets for a full stack

use criterion::{criterion_group, criterion_main, Criterion};
use iced_toast::toast::{
    calculate_offset, ManualScheduler, OffsetOptions, Store, ToastOptions, Toaster,
};
use std::hint::black_box;
use std::sync::Arc;

fn filled_store() -> Store<String> {
    let store = Store::new(Arc::new(ManualScheduler::new()));
    for i in 0..20 {
        store.toast(format!("toast {i}"), ToastOptions::new());
    }
    store
}

/// Benchmark raw dispatch with no listener attached.
fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_dispatch");
    let store = filled_store();

    group.bench_function("upsert_full_store", |b| {
        b.iter(|| {
            black_box(store.toast("bench".to_string(), ToastOptions::new()));
        });
    });

    group.finish();
}

/// Benchmark dispatch with a mounted toaster re-arming its timers.
fn bench_dispatch_with_toaster(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_dispatch");
    let store = filled_store();
    let toaster = Toaster::mount(&store, Default::default());

    group.bench_function("upsert_with_toaster", |b| {
        b.iter(|| {
            black_box(store.toast("bench".to_string(), ToastOptions::new()));
        });
    });

    group.bench_function("layout_full_stack", |b| {
        b.iter(|| black_box(toaster.layout()));
    });

    group.finish();
}

/// Benchmark offset computation over a full stack of measured toasts.
fn bench_offsets(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_dispatch");
    let store = filled_store();
    let toaster = Toaster::mount(&store, Default::default());
    for toast in toaster.toasts() {
        toaster.update_height(&toast.id, 48.0);
    }
    let toasts = toaster.toasts();
    let options = OffsetOptions::default();

    group.bench_function("calculate_offset_all", |b| {
        b.iter(|| {
            for toast in &toasts {
                black_box(calculate_offset(&toasts, toast, &options));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_dispatch,
    bench_dispatch_with_toaster,
    bench_offsets
);
criterion_main!(benches);
