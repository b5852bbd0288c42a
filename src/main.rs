/*!
 * heapstress - Main Entry Point
 *
 * Interactive heap-pressure generator:
 * - Paced allocations on a tracked and an untracked channel
 * - FIFO retention ceiling over the tracked channel
 * - Forced full collections with per-cycle reporting
 * - Live pause / clear / collect / info commands
 */

use std::sync::Arc;

use anyhow::ensure;
use clap::Parser;
use tracing::info;

use heap_stress::core::limits;
use heap_stress::{
    init_tracing, sample_heap_stats, AllocationEngine, AllocationLedger, CollectionMonitor,
    ConsoleReporter, ControlLoop, ControlState, HeapCollector, Reporter, StressConfig,
    StressMetrics,
};

/// Interactive heap-pressure generator
#[derive(Parser, Debug)]
#[command(name = "heapstress", version)]
#[command(about = "Drive tracked and untracked allocation pressure against the process heap")]
struct Cli {
    /// Enable the tracked allocation channel
    #[arg(short, long)]
    tracked: bool,

    /// Enable the untracked (raw) allocation channel
    #[arg(short, long)]
    untracked: bool,

    /// Retained-size ceiling for the tracked channel, in MB (unbounded when absent)
    #[arg(long, value_name = "MB")]
    max_mb: Option<f64>,

    /// Allocation step size per channel, in MB
    #[arg(long, value_name = "MB", default_value_t = limits::DEFAULT_STEP_MB)]
    step_mb: f64,

    /// Emit machine-readable JSON report lines on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    ensure!(cli.step_mb > 0.0, "step size must be positive");
    if let Some(max_mb) = cli.max_mb {
        ensure!(max_mb > 0.0, "retained ceiling must be positive");
    }

    let config = StressConfig {
        tracked: cli.tracked,
        untracked: cli.untracked,
        max_retained_mb: cli.max_mb.unwrap_or(f64::INFINITY),
        step_mb: cli.step_mb,
    };

    println!("'q' aborts, 'x' clears, 'g' collects, 'i' info, 'p' pauses, 'a' nudges");
    println!(
        "Tracked: {} Untracked: {} Step: {} MB Ceiling: {}",
        config.tracked,
        config.untracked,
        config.step_mb,
        if config.max_retained_mb.is_finite() {
            format!("{} MB", config.max_retained_mb)
        } else {
            "unbounded".to_string()
        }
    );
    println!("64-bit process: {}", cfg!(target_pointer_width = "64"));
    if !config.any_channel() {
        println!("No allocation channel enabled; the engine will only tick");
    }

    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new(cli.json));
    reporter.heap(&sample_heap_stats());

    info!("Initializing allocation ledger...");
    let ledger = Arc::new(AllocationLedger::new());
    let control = Arc::new(ControlState::new());
    let metrics = Arc::new(StressMetrics::new());

    info!("Initializing collector and collection monitor...");
    let collector = Arc::new(HeapCollector::new());
    let _monitor = CollectionMonitor::register(&collector, Arc::clone(&reporter));
    {
        let metrics = Arc::clone(&metrics);
        collector.on_major_collection(move || {
            metrics.record_collection();
            true
        });
    }

    info!("Starting allocation engine...");
    let engine = AllocationEngine::new(
        config,
        Arc::clone(&ledger),
        Arc::clone(&control),
        Arc::clone(&metrics),
        Arc::clone(&reporter),
    );
    let engine_handle = engine.spawn()?;

    let control_loop = ControlLoop::new(
        ledger,
        Arc::clone(&control),
        collector,
        metrics,
        reporter,
    );
    control_loop.run()?;

    // The engine observes the abort flag at the top of its next iteration
    control.abort();
    if engine_handle.join().is_err() {
        tracing::warn!("Allocation engine thread panicked");
    }

    info!("heapstress exiting");
    Ok(())
}
