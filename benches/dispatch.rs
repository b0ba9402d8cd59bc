// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use toastkit::notifications::{ContainerProps, ToastContainer, ToastOptions, Toaster};

fn mounted(props: ContainerProps) -> (Toaster, ToastContainer) {
    let toaster = Toaster::new();
    let container = toaster.container(props);
    container.mount();
    toaster.scheduler().run_pending();
    (toaster, container)
}

fn dispatch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    group.bench_function("show_100_unlimited", |b| {
        b.iter_batched(
            || mounted(ContainerProps::default()),
            |(toaster, container)| {
                for n in 0..100 {
                    toaster.show(format!("toast {n}"), ToastOptions::new());
                }
                toaster.scheduler().run_pending();
                black_box(container.live_count())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("show_and_drain_limit_3", |b| {
        b.iter_batched(
            || mounted(ContainerProps::default().with_limit(3)),
            |(toaster, container)| {
                let ids: Vec<_> = (0..50)
                    .map(|n| toaster.show(format!("toast {n}"), ToastOptions::new()))
                    .collect();
                toaster.scheduler().run_pending();
                for id in ids {
                    toaster.dismiss(Some(id));
                }
                toaster.scheduler().run_pending();
                black_box(container.queued_count())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("render_grouping", |b| {
        let (toaster, container) = mounted(ContainerProps::default().newest_on_top(true));
        for n in 0..200 {
            toaster.show(format!("toast {n}"), ToastOptions::new());
        }
        toaster.scheduler().run_pending();
        b.iter(|| black_box(container.toasts_to_render()));
    });

    group.finish();
}

criterion_group!(benches, dispatch_benchmark);
criterion_main!(benches);
