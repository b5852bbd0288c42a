/*!
 * Interactive Control
 * Operator commands mutating control flags and triggering one-off operations
 */

use std::sync::Arc;

use log::info;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::core::limits::NUDGE_ALLOCATION_BYTES;
use crate::engine::control::ControlState;
use crate::memory::gc::HeapCollector;
use crate::memory::ledger::AllocationLedger;
use crate::memory::types::StressResult;
use crate::monitoring::metrics::StressMetrics;
use crate::monitoring::report::Reporter;
use crate::monitoring::stats::sample_heap_stats;

const PROMPT: &str = "> ";

/// One operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Abort,
    Clear,
    ForceCollect,
    Info,
    PauseToggle,
    NudgeAllocate,
}

impl Command {
    /// Parse one input line. Anything unrecognized yields `None`; chatter
    /// on an interactive console is not an error.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "q" | "quit" | "abort" => Some(Self::Abort),
            "x" | "clear" => Some(Self::Clear),
            "g" | "gc" => Some(Self::ForceCollect),
            "i" | "info" => Some(Self::Info),
            "p" | "pause" => Some(Self::PauseToggle),
            "a" | "alloc" => Some(Self::NudgeAllocate),
            _ => None,
        }
    }
}

/// The foreground command loop.
pub struct ControlLoop {
    ledger: Arc<AllocationLedger>,
    control: Arc<ControlState>,
    collector: Arc<HeapCollector>,
    metrics: Arc<StressMetrics>,
    reporter: Arc<dyn Reporter>,
}

impl ControlLoop {
    pub fn new(
        ledger: Arc<AllocationLedger>,
        control: Arc<ControlState>,
        collector: Arc<HeapCollector>,
        metrics: Arc<StressMetrics>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            ledger,
            control,
            collector,
            metrics,
            reporter,
        }
    }

    /// Read commands until abort. The blocking read is intentional: this
    /// loop is the process's idle state.
    pub fn run(&self) -> StressResult<()> {
        let mut editor = DefaultEditor::new()?;

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    let Some(command) = Command::parse(&line) else {
                        continue;
                    };
                    if self.dispatch(command) {
                        return Ok(());
                    }
                }
                // Ctrl-C / Ctrl-D abort like the quit command
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    self.control.abort();
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Apply one command; returns true when the loop should end.
    pub fn dispatch(&self, command: Command) -> bool {
        match command {
            Command::Abort => {
                info!("Abort requested");
                self.control.abort();
                true
            }
            Command::Clear => {
                self.ledger.clear(&self.collector);
                self.metrics.record_clear();
                false
            }
            Command::ForceCollect => {
                self.collector.force_collect();
                self.reporter.heap(&sample_heap_stats());
                false
            }
            Command::Info => {
                self.reporter.heap(&sample_heap_stats());
                self.reporter.counters(&self.metrics.snapshot());
                if let Some(elapsed) = self.collector.time_since_last_collection() {
                    println!("Last collection: {:.1} sec ago", elapsed.as_secs_f64());
                }
                false
            }
            Command::PauseToggle => {
                let paused = self.control.toggle_paused();
                info!("Paused: {paused}");
                println!("Paused: {paused}");
                false
            }
            Command::NudgeAllocate => {
                // Outside the ledger and dropped immediately, so it perturbs
                // the allocator without touching retained accounting
                let nudge = vec![0u8; NUDGE_ALLOCATION_BYTES];
                std::hint::black_box(&nudge);
                drop(nudge);
                self.metrics.record_nudge();
                false
            }
        }
    }
}
