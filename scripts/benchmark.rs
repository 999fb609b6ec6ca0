// scripts/benchmark.rs
use par_streams::engine::{CounterEngine, Mcg59, Xoshiro256Family};
use par_streams::math_utils::{chi_square_uniformity, Timer};
use par_streams::output::write_summary_to_csv;
use par_streams::round::run_parallel;
use par_streams::{split, BaseEngine, EngineResult, StreamConfig, TechniqueKind};
use rand::{Rng, RngCore};
use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process::Command;
use std::sync::Mutex;

const DRAWS_PER_STREAM: u64 = 1_000_000;
const UNIFORMITY_SAMPLES: usize = 10_000;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_version: Command::new("rustc")
                .arg("--version")
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown Rust version".to_string()),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    streams: usize,
    split_ms: f64,
    round_ms: f64,
    refresh_ms: f64,
    throughput_draws_per_sec: f64,
    p_value: f64,
}

fn engine_for(technique: TechniqueKind) -> Box<dyn BaseEngine> {
    match technique {
        TechniqueKind::SkipAhead => Box::new(CounterEngine::new(42, 0)),
        TechniqueKind::Leapfrog => Box::new(Mcg59::new(42)),
        TechniqueKind::Family => Box::new(Xoshiro256Family::new(42)),
    }
}

fn bench_technique(technique: TechniqueKind, streams: usize) -> EngineResult<BenchmarkResult> {
    let config = StreamConfig {
        streams,
        technique,
        skip_stride: DRAWS_PER_STREAM,
    };
    let engine = engine_for(technique);

    let mut timer = Timer::new();
    let mut set = split(engine.as_ref(), config.technique()?)?;
    let split_ms = timer.elapsed_ms();

    let samples = Mutex::new(Vec::with_capacity(UNIFORMITY_SAMPLES * streams));
    timer.start();
    let report = run_parallel(&mut set, |_, stream| {
        let mut acc = 0u64;
        for _ in 0..DRAWS_PER_STREAM - UNIFORMITY_SAMPLES as u64 {
            acc ^= stream.next_u64();
        }
        let kept: Vec<f64> = (0..UNIFORMITY_SAMPLES).map(|_| stream.gen::<f64>()).collect();
        samples.lock().expect("samples lock").extend(kept);
        std::hint::black_box(acc);
        DRAWS_PER_STREAM
    });
    let round_ms = timer.elapsed_ms();

    timer.start();
    let _next = set.refresh(&report)?;
    let refresh_ms = timer.elapsed_ms();

    let samples = samples.into_inner().expect("samples lock");
    let p_value = chi_square_uniformity(&samples, 50)?;

    Ok(BenchmarkResult {
        name: format!("{} ({})", technique, engine.name()),
        streams,
        split_ms,
        round_ms,
        refresh_ms,
        throughput_draws_per_sec: report.total() as f64 / (round_ms / 1000.0),
        p_value,
    })
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Benchmark,Streams,Split_ms,Round_ms,Refresh_ms,Throughput_draws_per_sec,Uniformity_p"
    )?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.4},{:.2},{:.4},{:.0},{:.6}",
            result.name,
            result.streams,
            result.split_ms,
            result.round_ms,
            result.refresh_ms,
            result.throughput_draws_per_sec,
            result.p_value
        )?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("par-streams Benchmark Suite");
    println!("==========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let stream_counts = [1, system_info.cpu_cores.max(2), 4 * system_info.cpu_cores];
    let mut results = Vec::new();
    for technique in TechniqueKind::ALL {
        for &streams in &stream_counts {
            match bench_technique(technique, streams) {
                Ok(result) => results.push(result),
                Err(e) => log::error!("{} with {} streams failed: {}", technique, streams, e),
            }
        }
    }

    println!("{:=<96}", "");
    println!(
        "{:<32} {:>8} {:>10} {:>12} {:>11} {:>12} {:>8}",
        "Benchmark", "Streams", "Split (ms)", "Round (ms)", "Refresh", "Draws/sec", "p"
    );
    println!("{:-<96}", "");
    for result in &results {
        println!(
            "{:<32} {:>8} {:>10.4} {:>12.2} {:>11.4} {:>12.3e} {:>8.4}",
            result.name,
            result.streams,
            result.split_ms,
            result.round_ms,
            result.refresh_ms,
            result.throughput_draws_per_sec,
            result.p_value
        );
    }
    println!("{:=<96}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    if let Err(e) = write_results_to_csv(&results, &system_info, &filename) {
        log::error!("Could not write {}: {}", filename, e);
        return;
    }

    let summary_file = format!("benchmark_summary_{}.csv", timestamp);
    let benchmarks = results.len().to_string();
    let threads = system_info.rayon_threads.to_string();
    let summary = [
        ("benchmarks", benchmarks.as_str()),
        ("rayon_threads", threads.as_str()),
        ("results_file", filename.as_str()),
    ];
    if let Err(e) = write_summary_to_csv(&summary_file, &summary) {
        log::error!("Could not write {}: {}", summary_file, e);
    }

    println!("\nResults saved to: {}", filename);
    println!("Run: cargo run --bin benchmark --release");
}
