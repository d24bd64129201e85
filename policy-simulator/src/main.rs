//! Replays synthetic workloads against every cache policy and reports hit
//! rates side by side.

use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

mod generator;
mod models;
mod runner;
mod stats;

use generator::WorkloadSpec;
use models::{CachePolicy, Distribution};
use runner::RunConfig;
use stats::SimulationReport;

/// Cache policy simulator CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value = "1000")]
    capacity: usize,

    /// Number of requests to generate
    #[arg(short, long, default_value = "100000")]
    requests: usize,

    /// Number of distinct objects in the workload
    #[arg(short, long, default_value = "10000")]
    objects: usize,

    /// Popularity distribution (uniform, zipf, hotset)
    #[arg(short, long, default_value = "zipf")]
    distribution: String,

    /// Zipf exponent (only used with --distribution zipf)
    #[arg(long, default_value = "1.0")]
    zipf_exponent: f64,

    /// Fraction of traffic aimed at the hot set (only with --distribution hotset)
    #[arg(long, default_value = "0.8")]
    hot_traffic: f64,

    /// Fraction of objects in the hot set (only with --distribution hotset)
    #[arg(long, default_value = "0.2")]
    hot_objects: f64,

    /// RNG seed for reproducible workloads
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Policies to simulate (basic, fifo, lifo, mru, lfu, lru)
    /// If not provided, all policies will be used
    #[arg(short, long, value_name = "POLICIES", num_args = 1.., value_delimiter = ',')]
    policies: Option<Vec<String>>,

    /// Print a DISCARD line for every capacity eviction
    #[arg(long)]
    print_discards: bool,

    /// Export results to CSV file
    #[arg(long, value_name = "PATH")]
    output_csv: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(capacity) = NonZeroUsize::new(args.capacity) else {
        eprintln!("error: --capacity must be at least 1");
        return ExitCode::FAILURE;
    };
    let Some(distribution) = Distribution::parse(&args.distribution) else {
        eprintln!(
            "error: unknown distribution '{}' (expected uniform, zipf, or hotset)",
            args.distribution
        );
        return ExitCode::FAILURE;
    };
    let policies = match selected_policies(args.policies.as_deref()) {
        Ok(policies) => policies,
        Err(name) => {
            eprintln!("error: unknown policy '{name}' (expected basic, fifo, lifo, mru, lfu, lru)");
            return ExitCode::FAILURE;
        }
    };

    let spec = WorkloadSpec {
        requests: args.requests,
        objects: args.objects,
        distribution,
        zipf_exponent: args.zipf_exponent,
        hot_traffic: args.hot_traffic,
        hot_objects: args.hot_objects,
        seed: args.seed,
    };
    println!(
        "Generating {} {} requests over {} objects (seed {})...",
        spec.requests, distribution, spec.objects, spec.seed
    );
    let trace = spec.generate();

    let run_config = RunConfig {
        capacity,
        print_discards: args.print_discards,
    };
    let mut report = SimulationReport::new(
        distribution,
        capacity.get(),
        args.objects,
        trace.len() as u64,
    );
    for policy in policies {
        println!("Running {policy}...");
        report.record(policy, runner::run_policy(policy, &trace, &run_config));
    }

    report.print_summary();

    if let Some(path) = &args.output_csv {
        if let Err(error) = report.write_csv(path) {
            eprintln!("error: failed to write {}: {error}", path.display());
            return ExitCode::FAILURE;
        }
        println!("Results written to {}", path.display());
    }
    ExitCode::SUCCESS
}

/// Resolves the policy list given on the command line, defaulting to all.
fn selected_policies(names: Option<&[String]>) -> Result<Vec<CachePolicy>, String> {
    match names {
        None => Ok(CachePolicy::all()),
        Some(names) => names
            .iter()
            .map(|name| CachePolicy::parse(name).ok_or_else(|| name.clone()))
            .collect(),
    }
}
