use criterion::{black_box, criterion_group, criterion_main, Criterion};
use text_similarity::{IdfTable, SimilarityEngine, StopWordSet, UnicodeWordTokenizer};

const WORDS: &[&str] = &[
    "rust", "memory", "safety", "ownership", "borrow", "thread", "async", "trait", "generic",
    "lifetime", "compiler", "crate", "module", "macro", "iterator", "closure", "vector", "string",
];

fn make_text(seed: usize, len: usize) -> String {
    (0..len)
        .map(|i| WORDS[(i * 7 + seed * 13 + i / 5) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn similarity_benchmark(c: &mut Criterion) {
    let stop_words = StopWordSet::parse("the\na\nof\n");
    let idf: IdfTable = WORDS
        .iter()
        .enumerate()
        .map(|(i, w)| (*w, 1.0 + i as f64 / 10.0))
        .collect();
    let engine = SimilarityEngine::new(stop_words, idf, UnicodeWordTokenizer);

    let doc_a = make_text(1, 5_000);
    let doc_b = make_text(2, 5_000);

    c.bench_function("similarity", |b| {
        b.iter(|| engine.similarity(black_box(&doc_a), black_box(&doc_b)))
    });

    let pairs: Vec<(String, String)> = (0..64)
        .map(|i| (make_text(i, 1_000), make_text(i + 1, 1_000)))
        .collect();
    c.bench_function("similarity_batch", |b| {
        b.iter(|| engine.similarity_batch(black_box(pairs.as_slice())))
    });
}

criterion_group!(benches, similarity_benchmark);
criterion_main!(benches);
