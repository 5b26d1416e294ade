//! Formatted output for report mode.
//!
//! Silent mode prints nothing; everything here is only reached when the
//! run was configured with [`ReportMode::Report`](crate::ReportMode) or
//! via `--list`/`--help`.

use terminal_size::{terminal_size, Width};

use crate::config::RunConfig;
use crate::kernels::{self, RenamePressure};
use crate::runner::RunOutcome;

/// Current terminal width, constrained to a reasonable range.
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 120)
    } else {
        80
    }
}

fn print_rule() {
    println!("{}", "-".repeat(get_term_width().min(72)));
}

/// Print the cycle counts captured by a completed run.
pub fn print_outcome(config: &RunConfig, outcome: &RunOutcome) {
    print_rule();
    println!(
        "rename-bench: cpu {} | width {}",
        outcome.pinned_cpu,
        config.width.name()
    );
    print_rule();

    if let Some(cycles) = outcome.baseline {
        println!("{:<18} {:>12} cycles", "minimal-rename", cycles);
    }
    if let Some(cycles) = outcome.extra {
        println!("{:<18} {:>12} cycles", "extra-rename", cycles);
    }
    if let (Some(base), Some(extra)) = (outcome.baseline, outcome.extra) {
        // Signed: scheduling noise can put the extra variant under baseline.
        println!("{:<18} {:>12} cycles", "delta", extra as i64 - base as i64);
    }
    print_rule();
}

/// List all kernel variants known on this architecture.
pub fn print_variants() {
    let variants = kernels::variants();
    if variants.is_empty() {
        println!("No timed kernels available on this architecture.");
        return;
    }

    println!("Available kernel variants:");
    for kernel in variants {
        let pressure = match kernel.pressure {
            RenamePressure::Minimal => "minimal",
            RenamePressure::Extra => "extra",
        };
        println!(
            "  {:<16} [{}/{}] {}",
            kernel.name,
            pressure,
            kernel.width.name(),
            kernel.description
        );
    }
}

pub fn print_help() {
    println!("rename-bench - micro-benchmark harness for register-renaming pressure");
    println!();
    println!("Usage: rename-bench [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --cpu <N>             Logical CPU to pin to (default: 0)");
    println!("  --width <scalar|avx2> Kernel instruction width (default: avx2)");
    println!("  --extra               Also run the extra-renaming kernel");
    println!("  --report              Print captured cycle counts (default: silent)");
    println!("  --list, -l            List kernel variants and exit");
    println!("  --help, -h            Show this help");
    println!();
    println!("By default the harness pins to CPU 0, runs the minimal-renaming");
    println!("AVX2 kernel once, discards the result, and exits 0. Silent mode");
    println!("exists for runs observed by an external sampling profiler.");
}
