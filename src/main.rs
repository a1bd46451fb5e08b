use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;

use pairwise_products::config::{
    RunConfig, DEFAULT_SHUTDOWN_TIMEOUT, MAX_VALUE, MIN_VALUE, PREVIEW_LEN,
};
use pairwise_products::{io, pipeline, telemetry, Interrupt, ShutdownOutcome};

#[derive(Parser, Debug)]
#[command(name = "pairwise-products")]
#[command(about = "Collect the distinct products of adjacent element pairs on a worker pool", long_about = None)]
struct Args {
    /// Seed for array generation (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of worker threads (defaults to number of CPU cores, at least 2)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Seconds to wait for the pool to finish before forcing it down
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_SHUTDOWN_TIMEOUT.as_secs())]
    shutdown_timeout: u64,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_telemetry(args.quiet)?;

    let start_time = Instant::now();

    let mut rng = io::seeded_rng(args.seed);
    let array = io::generate_array(&mut rng);
    println!(
        "Created an array of {} elements with values in [{}; {}]",
        array.len(),
        MIN_VALUE,
        MAX_VALUE
    );
    println!(
        "First {} elements: {}",
        PREVIEW_LEN,
        io::preview(&array, PREVIEW_LEN)
    );

    let config = RunConfig::new(args.threads, Duration::from_secs(args.shutdown_timeout));
    println!("Using {} worker threads", config.workers);

    let interrupt = Interrupt::new();
    let report = pipeline::run(&array, &config, &interrupt)?;

    let elapsed = start_time.elapsed();

    let mut products: Vec<i32> = report.collection.products.iter().copied().collect();
    products.sort_unstable();

    println!("\n--- Results ---");
    println!("Total unique pair products: {}", products.len());
    println!(
        "First {} unique products: {}",
        PREVIEW_LEN,
        io::preview(&products, PREVIEW_LEN)
    );
    if !report.collection.failures.is_empty() {
        println!(
            "Chunks without results: {} of {}",
            report.collection.failures.len(),
            report.chunks
        );
    }
    if report.shutdown != ShutdownOutcome::Clean {
        println!("Worker pool shutdown: {:?}", report.shutdown);
    }
    println!("Completed in {:.2?}", elapsed);

    Ok(())
}
