use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use tfidx::core::types::DocumentStatus;
use tfidx::{ExecutionPolicy, SearchEngine};

const VOCAB: &[&str] = &[
    "rust", "search", "engine", "index", "query", "relevance", "document", "parallel",
    "sharded", "concurrent",
];

fn build_engine(doc_count: usize, seed: u64) -> SearchEngine {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = SearchEngine::new(Vec::<String>::new()).unwrap();
    for id in 0..doc_count {
        let word_count = rng.gen_range(5..20);
        let text: Vec<&str> = (0..word_count)
            .map(|_| *VOCAB.choose(&mut rng).unwrap())
            .collect();
        let rating = rng.gen_range(-5..10);
        engine
            .add_document(id as i64, &text.join(" "), DocumentStatus::Actual, &[rating])
            .unwrap();
    }
    engine
}

fn bench_find_top_documents(c: &mut Criterion) {
    let small = build_engine(1_000, 1);
    let large = build_engine(50_000, 2);

    let mut group = c.benchmark_group("find_top_documents");

    group.bench_with_input(BenchmarkId::new("sequential", "1k_docs"), &small, |b, engine| {
        b.iter(|| black_box(engine.find_top_documents("rust search -sharded").unwrap()));
    });
    group.bench_with_input(BenchmarkId::new("sequential", "50k_docs"), &large, |b, engine| {
        b.iter(|| black_box(engine.find_top_documents("rust search -sharded").unwrap()));
    });
    group.bench_with_input(BenchmarkId::new("parallel", "50k_docs"), &large, |b, engine| {
        b.iter(|| black_box(engine.find_top_documents_par("rust search -sharded").unwrap()));
    });

    group.finish();
}

fn bench_add_document(c: &mut Criterion) {
    c.bench_function("add_document_to_10k_index", |b| {
        b.iter_batched(
            || build_engine(10_000, 3),
            |mut engine| {
                engine
                    .add_document(10_000, "rust search engine benchmark", DocumentStatus::Actual, &[1])
                    .unwrap();
                black_box(engine);
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_remove_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_document");

    group.bench_function("sequential", |b| {
        b.iter_batched(
            || build_engine(10_000, 4),
            |mut engine| {
                engine.remove_document(ExecutionPolicy::Sequential, 5_000);
                black_box(engine);
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("parallel", |b| {
        b.iter_batched(
            || build_engine(10_000, 4),
            |mut engine| {
                engine.remove_document(ExecutionPolicy::Parallel, 5_000);
                black_box(engine);
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_find_top_documents, bench_add_document, bench_remove_document);
criterion_main!(benches);
