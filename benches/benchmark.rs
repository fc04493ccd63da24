// Resolution throughput over synthetic category stores
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use reception::prelude::*;

fn synthetic_store(order: &CategoryOrder, per_category: usize) -> MemoryStore {
    let mut store = MemoryStore::new();
    for (c, category) in order.iter().enumerate() {
        let records = (0..per_category).map(|i| {
            Record::new(
                format!("question {} about topic {} in {}", i, i % 97, category),
                format!("answer {} for {}", i, category),
            )
            .with_keywords([format!("kw{}x{}", c, i), format!("topic{}", i % 97)])
        });
        store = store.with_category(category.clone(), records.collect::<Vec<_>>());
    }
    store
}

fn benchmark_resolve(c: &mut Criterion) {
    let order = CategoryOrder::default();
    let resolver = Resolver::new(order.clone());
    let mut group = c.benchmark_group("resolve");

    for size in [100, 1000, 10000].iter() {
        let store = synthetic_store(&order, *size);

        // Keyword only present in the last category: every record is scored
        let late = Utterance::new(&format!("looking for kw5x{}", size - 1));
        group.bench_with_input(BenchmarkId::new("last_category_hit", size), &late, |b, u| {
            b.iter(|| resolver.resolve(black_box(u), &store));
        });

        let miss = Utterance::new("completely unrelated words");
        group.bench_with_input(BenchmarkId::new("miss", size), &miss, |b, u| {
            b.iter(|| resolver.resolve(black_box(u), &store));
        });

        let early = Utterance::new("tell me about topic7 please");
        group.bench_with_input(BenchmarkId::new("first_category_hit", size), &early, |b, u| {
            b.iter(|| resolver.resolve(black_box(u), &store));
        });
    }

    group.finish();
}

fn benchmark_normalize(c: &mut Criterion) {
    let raw = "   How Much Is The TUITION fee for the upcoming Semester?   ";
    c.bench_function("utterance_normalize", |b| {
        b.iter(|| Utterance::new(black_box(raw)));
    });
}

criterion_group!(benches, benchmark_resolve, benchmark_normalize);
criterion_main!(benches);
