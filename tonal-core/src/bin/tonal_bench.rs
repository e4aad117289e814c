//! Cleaning throughput benchmark.
//!
//! Reads a file of posts, one per line, and measures both cleaning
//! variants plus the full lexicon pipeline over every line.
//!
//! ## Usage
//!
//! ```bash
//! # All modes
//! ./target/release/tonal_bench /path/to/tweets.txt
//!
//! # One mode: classifier | lexicon | pipeline
//! ./target/release/tonal_bench /path/to/tweets.txt lexicon
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Lexicon cleaning ===
//! --------------------------------
//! Mode        : Lexicon
//! Elapsed     : 0.452 s
//! Throughput  : 41.18 MiB/s
//! Posts/sec   : 1_154_892
//! Tokens/sec  : 4_342_654
//! --------------------------------
//! ```
//!
//! Build with `--release`; the numbers are meaningless otherwise.

use std::env;
use std::fs;
use std::time::{Duration, Instant};

use tonal_core::analyzer::{TextNormalizer, Tokenizer};
use tonal_core::{LinguisticResources, SentimentPipeline};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: tonal_bench <path> [classifier|lexicon|pipeline]");
        std::process::exit(1);
    }

    let path = &args[1];
    let mode = args.get(2).map(String::as_str).unwrap_or("all");

    println!("Loading file...");
    let input = fs::read_to_string(path)?;
    let posts: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();

    println!("File size: {}", fmt_bytes(input.len() as u64));
    println!("Posts:     {}\n", fmt_count(posts.len() as u64));

    let resources = LinguisticResources::builtin();

    if matches!(mode, "all" | "classifier") {
        bench_clean("Classifier", &TextNormalizer::classifier(), &posts);
    }
    if matches!(mode, "all" | "lexicon") {
        bench_clean("Lexicon", &TextNormalizer::lexicon(&resources), &posts);
    }
    if matches!(mode, "all" | "pipeline") {
        bench_pipeline(&SentimentPipeline::builtin_lexicon(&resources), &posts);
    }

    Ok(())
}

fn bench_clean(label: &str, normalizer: &TextNormalizer, posts: &[&str]) {
    let mut out = String::with_capacity(256);

    println!("=== {} cleaning ===", label);

    let mut run = || {
        let mut tokens = 0u64;
        for post in posts {
            normalizer.normalize_into(post, &mut out);
            Tokenizer.tokenize(&out, |_t, _p| tokens += 1);
        }
        std::hint::black_box(tokens)
    };

    warmup(|| {
        run();
    });

    let mut tokens = 0u64;
    let elapsed = measure(|| {
        tokens = run();
    });

    print_perf(label, posts, elapsed, tokens);
}

fn bench_pipeline(pipeline: &SentimentPipeline, posts: &[&str]) {
    println!("=== Lexicon pipeline ===");

    let run = || {
        let mut labeled = 0u64;
        for post in posts {
            if pipeline.analyze(post).is_ok() {
                labeled += 1;
            }
        }
        std::hint::black_box(labeled)
    };

    warmup(|| {
        run();
    });

    let elapsed = measure(|| {
        run();
    });

    print_perf("Pipeline", posts, elapsed, 0);
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, posts: &[&str], elapsed: Duration, tokens: u64) {
    let secs = elapsed.as_secs_f64();
    let bytes: usize = posts.iter().map(|p| p.len()).sum();
    let mib = bytes as f64 / (1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.2} MiB/s", mib / secs);
    println!(
        "Posts/sec   : {}",
        fmt_count((posts.len() as f64 / secs) as u64)
    );

    if tokens > 0 {
        println!("Tokens/sec  : {}", fmt_count((tokens as f64 / secs) as u64));
    }

    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
