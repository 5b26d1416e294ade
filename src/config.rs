//! Run configuration.
//!
//! Fixed at startup, never mutated afterwards. The defaults reproduce the
//! original harness snapshot: pin to CPU 0, run only the minimal-renaming
//! AVX2 kernel, discard the result.

use crate::kernels::InstructionWidth;

/// What happens to captured cycle counts.
///
/// `Silent` measures and discards, which is the mode to use when an
/// external sampling profiler observes the process from outside and any
/// output would perturb the measurement window. `Report` prints the
/// captured counts after the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportMode {
    #[default]
    Silent,
    Report,
}

/// One measurement run's configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Logical CPU the run is pinned to.
    pub target_cpu: usize,
    /// Invoke the minimal-renaming (baseline) kernel.
    pub run_minimal: bool,
    /// Also invoke the extra-renaming kernel, on the same pinned CPU.
    pub run_extra: bool,
    /// Instruction width of the kernel pair.
    pub width: InstructionWidth,
    pub report: ReportMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_cpu: 0,
            run_minimal: true,
            run_extra: false,
            width: InstructionWidth::Avx2,
            report: ReportMode::Silent,
        }
    }
}
