//! Benchmarks for document upgrade and downgrade throughput.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hatch::ComponentHandler;
use hatch_dom::NodeId;
use hatch_test_utils::register_probes;

/// Handler over a flat page of `count` elements, cycling through the probe selectors.
fn flat_page(count: usize) -> ComponentHandler {
    let mut handler = ComponentHandler::default();
    register_probes(&mut handler).unwrap();
    let root = handler.document().root();
    for i in 0..count {
        let class = ["js-foo", "js-bar", "js-baz"][i % 3];
        handler.document_mut().build("div").class(class).append_to(root);
    }
    handler
}

/// Detached chain of `depth` nested elements carrying every probe selector.
fn nested_page(depth: usize) -> (ComponentHandler, NodeId) {
    let mut handler = ComponentHandler::default();
    register_probes(&mut handler).unwrap();
    let top = handler.document_mut().create_element("div");
    let mut parent = top;
    for _ in 0..depth {
        parent = handler
            .document_mut()
            .build("div")
            .classes(&["js-foo", "js-bar", "js-baz"])
            .append_to(parent);
    }
    (handler, top)
}

fn bench_upgrade_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("upgrade_all");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_with_setup(
                || flat_page(size),
                |mut handler| {
                    handler.upgrade_all().unwrap();
                    black_box(handler.instance_count())
                },
            );
        });
    }

    group.finish();
}

fn bench_upgrade_all_idempotent(c: &mut Criterion) {
    let mut group = c.benchmark_group("upgrade_all_already_upgraded");

    for size in [100, 1000] {
        let mut handler = flat_page(size);
        handler.upgrade_all().unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| handler.upgrade_all().unwrap());
        });
    }

    group.finish();
}

fn bench_upgrade_elements_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("upgrade_elements_nested");

    for depth in [8, 64, 256] {
        group.throughput(Throughput::Elements(depth as u64 * 3));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter_with_setup(
                || nested_page(depth),
                |(mut handler, top)| {
                    handler.upgrade_elements(top).unwrap();
                    black_box(handler.instance_count())
                },
            );
        });
    }

    group.finish();
}

fn bench_downgrade(c: &mut Criterion) {
    let mut group = c.benchmark_group("downgrade_all");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_with_setup(
                || {
                    let mut handler = flat_page(size);
                    handler.upgrade_all().unwrap();
                    let root = handler.document().root();
                    let elements = handler.document().element_children(root);
                    (handler, elements)
                },
                |(mut handler, elements)| {
                    handler.downgrade(&elements).unwrap();
                    black_box(handler.instance_count())
                },
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_upgrade_all,
    bench_upgrade_all_idempotent,
    bench_upgrade_elements_nested,
    bench_downgrade
);
criterion_main!(benches);
