use seq_align::{AlignEngine, ConstantGap, MatchMismatch};

fn engine() -> AlignEngine<seq_align::Scheme<MatchMismatch, ConstantGap>> {
    AlignEngine::new(MatchMismatch::new(2, -2), ConstantGap(-1))
}

#[test]
fn prefix_is_found_exactly() {
    let a = engine().align_local(b"ATA", b"ATAT").unwrap();
    assert_eq!(a.aligned1, b"ATA");
    assert_eq!(a.aligned2, b"ATA");
    assert_eq!(a.score, 6);
}

#[test]
fn best_island_spans_a_gap_run() {
    let a = engine().align_local(b"CTCTGAG", b"TGTCAGT").unwrap();
    assert_eq!(a.aligned1, b"TCTGAG");
    assert_eq!(a.aligned2, b"TC--AG");
    assert_eq!(a.score, 6);

    let b = engine().align_local(b"CTCTGAGG", b"TGTCAGTA").unwrap();
    assert_eq!(b.aligned1, b"TCTGAG");
    assert_eq!(b.aligned2, b"TC--AG");
    assert_eq!(b.score, 6);
}

#[test]
fn no_shared_symbol_gives_empty_alignment() {
    let a = engine().align_local(b"AAAA", b"CCC").unwrap();
    assert!(a.is_empty());
    assert_eq!(a.score, 0);
    assert_eq!(a.to_string(), "\n\nScore: 0");
}

#[test]
fn local_never_scores_below_global() {
    let e = engine();
    for (s, t) in [("ACGTACGT", "TTTT"), ("GATTACA", "GCATGCU"), ("AAAA", "AAAA")] {
        let local = e.align_local(s.as_bytes(), t.as_bytes()).unwrap();
        let global = e.align_global(s.as_bytes(), t.as_bytes()).unwrap();
        assert!(local.score >= global.score.max(0), "{s} vs {t}");
    }
}
