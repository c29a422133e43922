//! Progress-line output
//!
//! One line per report: `Step <s+1>/<max> - <metric>: <value> - …` over
//! every tracked series, formatted to three decimals. Train-mode lines are
//! carriage-return-terminated so successive reports overwrite in place;
//! eval-mode lines are preceded by a blank line and keep their newline.
//! Output is an explicit effect of the loops, never a load-time logger.

use std::io::{self, Write};

use crate::model::Mode;
use crate::train::MetricsTracker;

/// Emit a progress line for `step` (zero-based) to standard output.
pub fn log_progress(step: usize, max_steps: usize, metrics: &MetricsTracker, mode: Mode) {
    let rendered: Vec<String> = metrics
        .iter()
        .filter_map(|(name, values)| values.last().map(|v| format!("{name}: {v:.3}")))
        .collect();
    let line = format!("Step {}/{} - {}", step + 1, max_steps, rendered.join(" - "));

    match mode {
        Mode::Train => {
            print!("{line}\r");
            io::stdout().flush().ok();
        }
        Mode::Eval => {
            println!("\n{line}");
        }
    }
}
