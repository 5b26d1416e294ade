//! Measurement run orchestration.
//!
//! One [`BenchmarkRunner`] performs one run: pin the thread, resolve the
//! configured kernel pair, invoke it, and stop. The pin must complete
//! before any kernel invocation; that ordering is the single
//! correctness-critical constraint in the harness, and it is enforced
//! here rather than in the invoker (which cannot verify it).
//!
//! A pinning failure is a hard failure. Measuring unpinned would record
//! cycle counts that look reliable while the scheduler is free to migrate
//! the thread mid-kernel, so the runner fails loudly and never retries.

use thiserror::Error;

use crate::config::RunConfig;
use crate::cpu_affinity::{self, AffinityError};
use crate::invoker;
use crate::kernels::{KernelError, KernelSet};

/// A measurement run could not be completed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarnessError {
    #[error(transparent)]
    Affinity(#[from] AffinityError),

    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Progress of a run, in invocation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Init,
    AffinitySet,
    BaselineMeasured,
    ExtraMeasured,
    Done,
    Failed,
}

/// Cycle counts captured by a completed run.
///
/// In silent mode these values are dropped by the caller without being
/// printed; they are still captured so the run shape is identical in
/// both report modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub pinned_cpu: usize,
    pub baseline: Option<u64>,
    pub extra: Option<u64>,
}

pub struct BenchmarkRunner {
    config: RunConfig,
    state: RunState,
}

impl BenchmarkRunner {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            state: RunState::Init,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Perform one full measurement run.
    ///
    /// Pins first, resolves the kernel pair second, invokes last. Any
    /// failure transitions to [`RunState::Failed`] and is returned to the
    /// caller; nothing is absorbed.
    pub fn run(&mut self) -> Result<RunOutcome, HarnessError> {
        if let Err(e) = cpu_affinity::pin(self.config.target_cpu) {
            self.state = RunState::Failed;
            return Err(e.into());
        }
        self.state = RunState::AffinitySet;

        let set = match KernelSet::resolve(self.config.width) {
            Ok(set) => set,
            Err(e) => {
                self.state = RunState::Failed;
                return Err(e.into());
            }
        };

        Ok(self.run_pinned(&set))
    }

    /// Invoke an already-resolved kernel pair per the configuration.
    ///
    /// Exposed separately so the state machine can be driven with stub
    /// kernels; callers other than [`run`](Self::run) are responsible for
    /// pinning beforehand.
    pub fn run_pinned(&mut self, set: &KernelSet) -> RunOutcome {
        let mut outcome = RunOutcome {
            pinned_cpu: self.config.target_cpu,
            baseline: None,
            extra: None,
        };

        if self.config.run_minimal {
            outcome.baseline = Some(invoker::invoke(set.minimal));
            self.state = RunState::BaselineMeasured;
        }

        if self.config.run_extra {
            outcome.extra = Some(invoker::invoke(set.extra));
            self.state = RunState::ExtraMeasured;
        }

        self.state = RunState::Done;
        outcome
    }
}
