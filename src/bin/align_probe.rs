use std::env;
use std::time::Instant;

use seq_align::{AlignEngine, ConstantGap, MatchMismatch, Scheme};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const MATCH_SCORE: i32 = 2;
const MISMATCH_SCORE: i32 = -1;
const GAP_COST: i32 = -2;

type ProbeEngine = AlignEngine<Scheme<MatchMismatch, ConstantGap>>;

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("align_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Alignment probe: wall time, memory and cross-checks per operation");
    eprintln!("{}", "=".repeat(80));
    eprintln!("  wall_s         wall-clock seconds");
    eprintln!("  rss_delta_kib  resident set growth during the run");
    eprintln!(
        "  status         'passed' = matches the reference check, 'not_checked' = longer than {}",
        options.verify_limit
    );
    eprintln!();

    let engine = ProbeEngine::new(
        MatchMismatch::new(MATCH_SCORE, MISMATCH_SCORE),
        ConstantGap(GAP_COST),
    );
    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/4] Global alignment (full table)");
    measurements.extend(run_global(&engine, &options, &mut sys));
    eprintln!("[2/4] Linear-space global alignment");
    measurements.extend(run_linear_space(&engine, &options, &mut sys));
    eprintln!("[3/4] Local alignment");
    measurements.extend(run_local(&engine, &options, &mut sys));
    eprintln!("[4/4] Multi-candidate batch");
    measurements.extend(run_batch(&engine, &options, &mut sys));
    eprintln!();

    print_summary(&measurements);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("align_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 512usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_limit(value)?;
            } else if arg == "--verify-limit" {
                let value: String = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_limit(&value)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --release --bin align_probe [-- <options>]

Options:
  --format <csv|table>          Output format (default: csv)
  --verify-limit <N>            Longest sequence cross-checked against the reference (default: 512)
  -h, --help                    Print this help message
"
        );
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "verify limit must be a positive integer".to_string())
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
        }
    }
}

struct Measurement {
    scenario: &'static str,
    size_desc: String,
    wall_s: f64,
    rss_delta_kib: u64,
    status: Status,
    detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Status {
    NotChecked,
    Passed,
    Failed,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::NotChecked => "not_checked",
            Status::Passed => "passed",
            Status::Failed => "failed",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Status::NotChecked => "○",
            Status::Passed => "✓",
            Status::Failed => "✗",
        }
    }
}

type Check = (Status, Option<String>);

fn expect_eq(expected: i32, found: i32) -> Check {
    if expected == found {
        (Status::Passed, None)
    } else {
        (
            Status::Failed,
            Some(format!("expected {expected}, got {found}")),
        )
    }
}

fn failed(err: impl std::fmt::Display) -> Check {
    (Status::Failed, Some(err.to_string()))
}

fn run_global(engine: &ProbeEngine, options: &Options, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[128, 256, 512, 1024, 2048];
    SIZES
        .iter()
        .map(|&len| {
            let seq1 = deterministic_dna(len, 1);
            let seq2 = mutated(&seq1, 7);
            let m = measure("global", format!("len={len}"), sys, || {
                match engine.align_global(&seq1, &seq2) {
                    Ok(a) if len <= options.verify_limit => {
                        expect_eq(reference_global_score(&seq1, &seq2), a.score)
                    }
                    Ok(_) => (Status::NotChecked, None),
                    Err(err) => failed(err),
                }
            });
            report(&m);
            m
        })
        .collect()
}

fn run_linear_space(engine: &ProbeEngine, options: &Options, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[128, 256, 512, 1024, 2048, 4096, 8192];
    SIZES
        .iter()
        .map(|&len| {
            let seq1 = deterministic_dna(len, 2);
            let seq2 = mutated(&seq1, 5);
            let m = measure("linear_space", format!("len={len}"), sys, || {
                match engine.align_linear_space(&seq1, &seq2) {
                    Ok(a) if len <= options.verify_limit => {
                        expect_eq(reference_global_score(&seq1, &seq2), a.score)
                    }
                    Ok(_) => (Status::NotChecked, None),
                    Err(err) => failed(err),
                }
            });
            report(&m);
            m
        })
        .collect()
}

fn run_local(engine: &ProbeEngine, options: &Options, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[128, 256, 512, 1024, 2048];
    SIZES
        .iter()
        .map(|&len| {
            let seq1 = deterministic_dna(len, 3);
            let seq2 = deterministic_dna(len / 2, 4);
            let m = measure("local", format!("len={len}"), sys, || {
                let local = match engine.align_local(&seq1, &seq2) {
                    Ok(a) => a,
                    Err(err) => return failed(err),
                };
                if len > options.verify_limit {
                    return (Status::NotChecked, None);
                }
                let floor = reference_global_score(&seq1, &seq2).max(0);
                if local.score >= floor {
                    (Status::Passed, None)
                } else {
                    (
                        Status::Failed,
                        Some(format!("local {} below {floor}", local.score)),
                    )
                }
            });
            report(&m);
            m
        })
        .collect()
}

fn run_batch(engine: &ProbeEngine, _options: &Options, sys: &mut System) -> Vec<Measurement> {
    const COUNTS: &[usize] = &[100, 1_000, 5_000, 20_000];
    const TEMPLATE_LEN: usize = 64;
    const CANDIDATE_LEN: usize = 96;
    COUNTS
        .iter()
        .map(|&count| {
            let template = deterministic_dna(TEMPLATE_LEN, 11);
            let planted = count / 2;
            let candidates: Vec<Vec<u8>> = (0..count)
                .map(|i| {
                    if i == planted {
                        let mut c = deterministic_dna(16, 12);
                        c.extend_from_slice(&template);
                        c.extend(deterministic_dna(CANDIDATE_LEN - TEMPLATE_LEN - 16, 13));
                        c
                    } else {
                        mutated(&deterministic_dna(CANDIDATE_LEN, 100 + i as u64), 3)
                    }
                })
                .collect();
            let m = measure("batch", format!("candidates={count}"), sys, || {
                match engine.multi_candidate_align(&template, &candidates) {
                    Ok(hit) if hit.index == planted => {
                        expect_eq(TEMPLATE_LEN as i32 * MATCH_SCORE, hit.score())
                    }
                    Ok(hit) => (
                        Status::Failed,
                        Some(format!("expected index {planted}, got {}", hit.index)),
                    ),
                    Err(err) => failed(err),
                }
            });
            report(&m);
            m
        })
        .collect()
}

fn report(m: &Measurement) {
    eprintln!(
        "      {} {:<16} time={:.3}s rss_delta={} KiB status={}",
        m.status.icon(),
        m.size_desc,
        m.wall_s,
        m.rss_delta_kib,
        m.status.label()
    );
}

fn print_summary(measurements: &[Measurement]) {
    let count = |status| measurements.iter().filter(|m| m.status == status).count();
    let (passed, failed, not_checked) = (
        count(Status::Passed),
        count(Status::Failed),
        count(Status::NotChecked),
    );
    eprintln!("{}", "=".repeat(80));
    eprintln!(
        "Runs: {}  passed: {passed}  failed: {failed}  not_checked: {not_checked}",
        measurements.len()
    );
    for m in measurements.iter().filter(|m| m.status == Status::Failed) {
        eprintln!(
            "  ✗ {} ({}): {}",
            m.scenario,
            m.size_desc,
            m.detail.as_deref().unwrap_or("")
        );
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(scenario: &'static str, size_desc: String, sys: &mut System, compute: F) -> Measurement
where
    F: FnOnce() -> Check,
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (status, detail) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        size_desc,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        status,
        detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size_desc,wall_s,rss_delta_kib,status,detail");
    for m in measurements {
        let detail = m
            .detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .fold("scenario".len(), usize::max);
    let col2 = measurements
        .iter()
        .map(|m| m.size_desc.len())
        .fold("size".len(), usize::max);

    println!(
        "{:<col1$}  {:<col2$}  {:>10}  {:>14}  {:>12}  detail",
        "scenario", "size", "wall_s", "rss_delta_kib", "status"
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>10.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            m.detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory() / 1024)
}

/// xorshift-driven DNA so every run sees the same inputs.
fn deterministic_dna(len: usize, seed: u64) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            ALPHABET[(state >> 32) as usize % ALPHABET.len()]
        })
        .collect()
}

/// Copy of `seq` with every `period`-th symbol substituted.
fn mutated(seq: &[u8], period: usize) -> Vec<u8> {
    seq.iter()
        .enumerate()
        .map(|(i, &c)| {
            if i % period == period - 1 {
                match c {
                    b'A' => b'C',
                    b'C' => b'G',
                    b'G' => b'T',
                    _ => b'A',
                }
            } else {
                c
            }
        })
        .collect()
}

/// Plain two-row Needleman–Wunsch score with a constant gap.
fn reference_global_score(seq1: &[u8], seq2: &[u8]) -> i32 {
    let mut prev: Vec<i32> = (0..=seq2.len() as i32).map(|j| j * GAP_COST).collect();
    let mut curr = vec![0; seq2.len() + 1];
    for (i, &a) in seq1.iter().enumerate() {
        curr[0] = (i as i32 + 1) * GAP_COST;
        for (j, &b) in seq2.iter().enumerate() {
            let sub = if a == b { MATCH_SCORE } else { MISMATCH_SCORE };
            curr[j + 1] = (prev[j] + sub)
                .max(prev[j + 1] + GAP_COST)
                .max(curr[j] + GAP_COST);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[seq2.len()]
}
