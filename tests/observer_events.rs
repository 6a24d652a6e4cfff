use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use seq_align::{
    AlignEngine, AlignMode, AlignObserver, BatchHit, ConstantGap, MatchMismatch, Scheme, SeedWindow,
};

#[derive(Default)]
struct Recorder {
    tables: AtomicUsize,
    splits: Mutex<Vec<(usize, usize, usize)>>,
    windows: Mutex<Vec<usize>>,
    chunks: Mutex<Vec<(usize, usize, Option<usize>)>>,
}

impl AlignObserver for Recorder {
    fn table_filled(&self, _mode: AlignMode, _rows: usize, _cols: usize, _score: i32) {
        self.tables.fetch_add(1, Ordering::Relaxed);
    }

    fn split_chosen(&self, depth: usize, mid: usize, split: usize) {
        self.splits.lock().unwrap().push((depth, mid, split));
    }

    fn seed_window(&self, index: usize, _window: &SeedWindow) {
        self.windows.lock().unwrap().push(index);
    }

    fn chunk_reduced(&self, level: usize, chunk: usize, winner: Option<&BatchHit>) {
        self.chunks
            .lock()
            .unwrap()
            .push((level, chunk, winner.map(|hit| hit.index)));
    }
}

fn engine() -> AlignEngine<Scheme<MatchMismatch, ConstantGap>, Recorder> {
    AlignEngine::builder(Scheme::new(MatchMismatch::new(1, -1), ConstantGap(-2)))
        .with_chunk_size(2)
        .with_sequential_threshold(0)
        .with_observer(Recorder::default())
        .build()
}

#[test]
fn table_fill_is_reported_once_per_alignment() {
    let engine = engine();
    engine.align_global(b"ACGT", b"AGT").unwrap();
    engine.align_local(b"ACGT", b"AGT").unwrap();
    assert_eq!(engine.observer().tables.load(Ordering::Relaxed), 2);
}

#[test]
fn hirschberg_reports_top_level_split_first() {
    let engine = engine();
    engine.align_linear_space(b"AGTACGCA", b"TATGC").unwrap();
    let splits = engine.observer().splits.lock().unwrap().clone();
    assert!(!splits.is_empty());
    assert_eq!(splits[0].0, 0);
    assert_eq!(splits[0].1, 4);
}

#[test]
fn batch_reports_every_window_and_chunk() {
    let engine = engine();
    let candidates = ["GGGG", "ACGT", "TTTT", "CCCC", "ACGT"];
    let hit = engine.multi_candidate_align(b"ACGT", &candidates).unwrap();
    assert_eq!(hit.index, 1);

    let mut windows = engine.observer().windows.lock().unwrap().clone();
    windows.sort_unstable();
    // level 0 visits all five, level 1 revisits the three chunk winners, level 2 the last pair
    assert!(windows.len() > candidates.len());
    assert_eq!(&windows[..1], &[0]);

    let mut chunks = engine.observer().chunks.lock().unwrap().clone();
    chunks.sort_unstable();
    assert_eq!(
        chunks,
        vec![
            (0, 0, Some(1)),
            (0, 1, Some(2)),
            (0, 2, Some(4)),
            (1, 0, Some(1)),
            (1, 1, Some(4)),
        ]
    );
}
