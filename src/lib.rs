//! # rename-bench
//!
//! A micro-benchmark harness that isolates the latency cost of CPU
//! register renaming. It pins the calling thread to one logical CPU,
//! invokes a hand-written timed kernel that returns an elapsed cycle
//! count, and exits. Four kernel variants exist, spanning minimal/extra
//! renaming pressure at scalar and AVX2 instruction widths.
//!
//! The harness measures once per configured kernel; it deliberately does
//! no sampling, warm-up, or statistics, so an external profiler can
//! observe a clean measurement window.

pub mod config;
pub mod cpu_affinity;
pub mod invoker;
pub mod kernels;
pub mod report;
pub mod runner;

pub use config::{ReportMode, RunConfig};
pub use cpu_affinity::AffinityError;
pub use kernels::{InstructionWidth, KernelError, KernelSet, RenamePressure};
pub use runner::{BenchmarkRunner, HarnessError, RunOutcome, RunState};

#[cfg(test)]
mod tests {
    use super::*;

    /// Regression for the baseline "measure and discard" behavior: a
    /// default silent run completes and surfaces nothing, but the cycle
    /// count was still captured.
    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    #[test]
    fn default_silent_run_completes() {
        let Ok(allowed) = cpu_affinity::current_affinity() else {
            return;
        };
        let config = RunConfig {
            target_cpu: allowed[0],
            width: InstructionWidth::Scalar,
            ..RunConfig::default()
        };
        let mut runner = BenchmarkRunner::new(config);

        match runner.run() {
            Ok(outcome) => {
                assert_eq!(runner.state(), RunState::Done);
                assert!(outcome.baseline.is_some());
                assert!(outcome.extra.is_none());
            }
            Err(HarnessError::Affinity(e)) => {
                eprintln!("pin not permitted in this environment, skipping: {e}");
            }
            Err(e) => panic!("unexpected failure: {e}"),
        }
    }

    /// Both kernels run in sequence on the same pinned CPU when the extra
    /// variant is enabled. The renaming-pressure hypothesis (extra >=
    /// minimal) is observed here but deliberately not asserted; it is a
    /// domain expectation, not a harness guarantee.
    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    #[test]
    fn extra_variant_runs_after_baseline() {
        let Ok(allowed) = cpu_affinity::current_affinity() else {
            return;
        };
        let config = RunConfig {
            target_cpu: allowed[0],
            run_extra: true,
            width: InstructionWidth::Scalar,
            ..RunConfig::default()
        };
        let mut runner = BenchmarkRunner::new(config);

        match runner.run() {
            Ok(outcome) => {
                let base = outcome.baseline.expect("baseline must have run");
                let extra = outcome.extra.expect("extra must have run");
                eprintln!("minimal: {base} cycles, extra: {extra} cycles");
            }
            Err(HarnessError::Affinity(e)) => {
                eprintln!("pin not permitted in this environment, skipping: {e}");
            }
            Err(e) => panic!("unexpected failure: {e}"),
        }
    }
}
