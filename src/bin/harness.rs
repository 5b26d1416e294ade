//! CLI for the register-renaming harness.
//!
//! Usage:
//!   rename-bench                 # pin to CPU 0, run minimal AVX2 kernel, silent
//!   rename-bench --report        # same, but print the captured cycle counts
//!   rename-bench --extra         # also run the extra-renaming kernel
//!   rename-bench --width scalar  # scalar kernels instead of AVX2
//!   rename-bench --list          # list kernel variants

use rename_bench::{report, BenchmarkRunner, InstructionWidth, ReportMode, RunConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = RunConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                report::print_help();
                return;
            }
            "--list" | "-l" => {
                report::print_variants();
                return;
            }
            "--cpu" => {
                i += 1;
                let Some(cpu) = args.get(i).and_then(|s| s.parse().ok()) else {
                    eprintln!("--cpu expects a non-negative integer");
                    std::process::exit(1);
                };
                config.target_cpu = cpu;
            }
            "--width" => {
                i += 1;
                let Some(width) = args.get(i).and_then(|s| InstructionWidth::parse(s)) else {
                    eprintln!("--width expects 'scalar' or 'avx2'");
                    std::process::exit(1);
                };
                config.width = width;
            }
            "--extra" => config.run_extra = true,
            "--report" => config.report = ReportMode::Report,
            other => {
                eprintln!("Unknown option: {other}");
                eprintln!("Try 'rename-bench --help'.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut runner = BenchmarkRunner::new(config);
    match runner.run() {
        Ok(outcome) => {
            if config.report == ReportMode::Report {
                report::print_outcome(&config, &outcome);
            }
            // Silent mode: the counts were captured and are dropped here.
        }
        Err(e) => {
            eprintln!("rename-bench: {e}");
            std::process::exit(1);
        }
    }
}
