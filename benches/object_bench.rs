// benches/object_bench.rs

//! Document model benchmarks
//!
//! Measures the balanced-tree object, the dynamic array and the
//! pretty printer under representative workloads.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use treedoc::core::codec::{PrettyPrinter, parse_object};
use treedoc::{Array, Object, Value};

fn populated_object(size: usize) -> Object {
    let mut object = Object::new();
    for i in 0..size {
        object
            .insert(&format!("key{i:06}"), &Value::from(i as i32))
            .unwrap();
    }
    object
}

pub fn bench_object_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("object_operations");

    group.bench_function("insert_sequential_1k", |b| {
        b.iter(|| black_box(populated_object(1_000)));
    });

    group.bench_function("insert_scattered_1k", |b| {
        b.iter(|| {
            let mut object = Object::new();
            for i in 0..1_000u32 {
                let key = format!("key{}", i.wrapping_mul(2_654_435_761) % 10_007);
                object.insert(&key, &Value::from(true)).unwrap();
            }
            black_box(object)
        });
    });

    let object = populated_object(10_000);
    group.bench_function("get_hit_10k", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 7_919) % 10_000;
            black_box(object.get(&format!("key{i:06}")))
        });
    });

    group.bench_function("remove_all_1k", |b| {
        b.iter_batched(
            || populated_object(1_000),
            |mut object| {
                for i in 0..1_000 {
                    object.remove(&format!("key{i:06}")).unwrap();
                }
                object
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("try_clone_10k", |b| {
        b.iter(|| black_box(object.try_clone().unwrap()));
    });

    group.finish();
}

pub fn bench_array_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_operations");

    group.bench_function("push_back_10k", |b| {
        b.iter(|| {
            let mut array = Array::new();
            for i in 0..10_000 {
                array.push_back(&Value::from(i)).unwrap();
            }
            black_box(array)
        });
    });

    group.bench_function("sort_numbers_10k", |b| {
        b.iter_batched(
            || {
                let mut array = Array::new();
                for i in 0..10_000i32 {
                    array
                        .push_back(&Value::from(i.wrapping_mul(48_271) % 65_521))
                        .unwrap();
                }
                array
            },
            |mut array| {
                array.sort().unwrap();
                array
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

pub fn bench_pretty_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("pretty_print");

    let document = parse_object(
        r#"{"name": "bench", "items": [1, 2.5, "three", true, {"nested": [4, 5]}],
            "meta": {"depth": 3, "tags": ["a", "b", "c"]}}"#,
    )
    .unwrap();
    let printer = PrettyPrinter::default();

    group.bench_function("small_document", |b| {
        b.iter(|| black_box(printer.object_to_string(&document).unwrap()));
    });

    let wide = populated_object(1_000);
    group.bench_function("wide_object_1k", |b| {
        b.iter(|| black_box(printer.object_to_string(&wide).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_object_operations,
    bench_array_operations,
    bench_pretty_print
);
criterion_main!(benches);
