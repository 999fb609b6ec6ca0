// demos/demo.rs
//! Parallel bootstrap of a sample mean.
//!
//! Each round, every stream draws bootstrap resamples of a fixed data set and
//! records their means. Rounds continue one engine via refresh, so running the
//! demo twice with the same seed prints the same confidence interval whatever
//! the thread count.

use par_streams::engine::{CounterEngine, Mcg59, Xoshiro256Family};
use par_streams::output::write_consumption_to_csv;
use par_streams::round::StreamDriver;
use par_streams::{Engine, StreamConfig, TechniqueKind};
use rand::Rng;
use rand_distr::{Distribution, Exp};
use std::sync::Mutex;

const ROUNDS: usize = 5;
const RESAMPLES_PER_STREAM: usize = 200;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let technique = match args.get(1).map(String::as_str) {
        Some("leapfrog") => TechniqueKind::Leapfrog,
        Some("family") => TechniqueKind::Family,
        _ => TechniqueKind::SkipAhead,
    };

    // Exponential data with mean 2
    let mut data_rng = Mcg59::new(2024);
    let exp = Exp::new(0.5).expect("positive rate");
    let data: Vec<f64> = (0..1_000).map(|_| exp.sample(&mut data_rng)).collect();

    let engine: Engine = match technique {
        TechniqueKind::SkipAhead => Box::new(CounterEngine::new(7, 0)),
        TechniqueKind::Leapfrog => Box::new(Mcg59::new(7)),
        TechniqueKind::Family => Box::new(Xoshiro256Family::new(7)),
    };
    let config = StreamConfig {
        technique,
        ..Default::default()
    };

    let mut driver = match StreamDriver::new(engine, config) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };

    let means = Mutex::new(Vec::new());
    let mut reports = Vec::with_capacity(ROUNDS);
    for _ in 0..ROUNDS {
        let result = driver.round(|_, stream| {
            let mut draws = 0u64;
            let mut local = Vec::with_capacity(RESAMPLES_PER_STREAM);
            for _ in 0..RESAMPLES_PER_STREAM {
                let mut sum = 0.0;
                for _ in 0..data.len() {
                    let u: f64 = stream.gen();
                    sum += data[(u * data.len() as f64) as usize];
                    draws += 1;
                }
                local.push(sum / data.len() as f64);
            }
            means.lock().expect("means lock").extend(local);
            draws
        });
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Round failed: {}", e);
                return;
            }
        }
    }

    let mut means = means.into_inner().expect("means lock");
    means.sort_by(|a, b| a.total_cmp(b));
    let lo = means[means.len() * 25 / 1000];
    let hi = means[means.len() * 975 / 1000];
    let sample_mean = data.iter().sum::<f64>() / data.len() as f64;

    println!("Technique:        {}", technique);
    println!("Streams:          {}", driver.config().streams);
    println!("Rounds:           {}", driver.rounds());
    println!("Resamples:        {}", means.len());
    println!("Sample mean:      {:.4}", sample_mean);
    println!("95% bootstrap CI: [{:.4}, {:.4}]", lo, hi);
    println!("Next engine:      {}", driver.engine().name());

    if let Err(e) = write_consumption_to_csv("bootstrap_consumption.csv", &reports) {
        eprintln!("Could not write consumption CSV: {}", e);
    }
}
