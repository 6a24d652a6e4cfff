use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use seq_align::{AlignEngine, ConstantGap, MatchMismatch, Scheme};

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn bench_batch(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let template = random_dna(&mut rng, 80);
    let candidates: Vec<Vec<u8>> = (0..4_000).map(|_| random_dna(&mut rng, 150)).collect();

    let mut group = c.benchmark_group("multi_candidate_align");
    group.sample_size(10);
    for &(chunk_size, threshold) in &[(1_000usize, 1_000usize), (250, 0), (usize::MAX, usize::MAX)] {
        let engine = AlignEngine::builder(Scheme::new(MatchMismatch::new(1, -1), ConstantGap(-2)))
            .with_chunk_size(chunk_size)
            .with_sequential_threshold(threshold)
            .build();
        group.bench_function(format!("chunk_{chunk_size}_threshold_{threshold}"), |b| {
            b.iter(|| black_box(engine.multi_candidate_align(&template, &candidates)))
        });
    }
    group.finish();
}

fn bench_seed_window(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let template = random_dna(&mut rng, 200);
    let candidate = random_dna(&mut rng, 2_000);
    let engine = AlignEngine::new(MatchMismatch::default(), ConstantGap(-2));
    c.bench_function("seed_window_200x2000", |b| {
        b.iter(|| black_box(engine.seed_window(&template, &candidate)))
    });
}

criterion_group!(benches, bench_batch, bench_seed_window);
criterion_main!(benches);
