use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{SvgvidgenError, SvgvidgenResult};
use crate::pipeline::scheduler::{RunTicket, Scheduler};
use crate::prefs::{KeyValueStore, PreferenceRecord, PreferenceStore};
use crate::ui::UiState;

/// Delay between starting a run and its completion.
pub const COMPLETION_DELAY: Duration = Duration::from_millis(2000);
/// Status text while a run is pending.
pub const RUNNING_STATUS: &str = "Running pipeline...";
/// Status text after a successful run.
pub const DONE_STATUS: &str = "✅ Pipeline completed successfully!";
/// Status text after a failed run.
pub const FAILED_STATUS: &str = "❌ Pipeline execution failed.";

const RUNNING_PROGRESS: u8 = 50;
const FINISHED_PROGRESS: u8 = 100;

/// Lifecycle of the run action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Nothing has run yet.
    Idle,
    /// Preferences saved, completion pending.
    Running,
    /// Backend work succeeded.
    Done,
    /// Backend work failed.
    Failed,
}

/// The work performed when a run completes.
pub trait BackendWork {
    /// Carry out the run configured by `record`.
    fn perform(&mut self, record: &PreferenceRecord) -> SvgvidgenResult<()>;
}

/// Backend that does nothing and always succeeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedWork;

impl BackendWork for SimulatedWork {
    fn perform(&mut self, record: &PreferenceRecord) -> SvgvidgenResult<()> {
        tracing::info!(flags = ?record.pipeline_flags(), "simulated pipeline run finished");
        Ok(())
    }
}

/// Runner options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerOpts {
    /// Delay before a run completes.
    #[serde(with = "millis")]
    pub completion_delay: Duration,
}

impl Default for RunnerOpts {
    fn default() -> Self {
        Self {
            completion_delay: COMPLETION_DELAY,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// State machine behind the `run-pipeline` button.
///
/// `run` saves preferences and moves to [`RunState::Running`]; each scheduled completion
/// then moves to [`RunState::Done`] or [`RunState::Failed`]. Runs are not serialized:
/// starting again while pending queues another completion, and completions apply in the
/// order the scheduler hands them back.
#[derive(Debug)]
pub struct PipelineRunner<W = SimulatedWork> {
    opts: RunnerOpts,
    work: W,
    state: RunState,
    next_ticket: u64,
    outstanding: BTreeMap<RunTicket, PreferenceRecord>,
}

impl PipelineRunner<SimulatedWork> {
    /// Runner with simulated backend work.
    pub fn simulated(opts: RunnerOpts) -> Self {
        Self::new(opts, SimulatedWork)
    }
}

impl<W: BackendWork> PipelineRunner<W> {
    /// Runner performing `work` on completion.
    pub fn new(opts: RunnerOpts, work: W) -> Self {
        Self {
            opts,
            work,
            state: RunState::Idle,
            next_ticket: 0,
            outstanding: BTreeMap::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of runs started but not yet completed.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Start a run from the current checkbox states.
    ///
    /// If saving preferences fails the error is logged and returned, and neither the state
    /// nor `ui` changes.
    #[tracing::instrument(skip_all)]
    pub fn run<S: KeyValueStore>(
        &mut self,
        ui: &mut UiState,
        prefs: &mut PreferenceStore<S>,
        scheduler: &mut dyn Scheduler,
    ) -> SvgvidgenResult<RunTicket> {
        let record = ui.preferences();
        if let Err(err) = prefs.save(&record) {
            tracing::error!(%err, "could not save preferences, run not started");
            return Err(err);
        }

        self.state = RunState::Running;
        ui.status = RUNNING_STATUS.to_string();
        ui.progress = RUNNING_PROGRESS;

        let ticket = RunTicket(self.next_ticket);
        self.next_ticket += 1;
        self.outstanding.insert(ticket, record);
        scheduler.schedule_after(self.opts.completion_delay, ticket);
        tracing::debug!(ticket = ticket.0, "run started");
        Ok(ticket)
    }

    /// Apply the completion of `ticket`.
    #[tracing::instrument(skip(self, ui))]
    pub fn complete(&mut self, ticket: RunTicket, ui: &mut UiState) -> SvgvidgenResult<RunState> {
        let record = self.outstanding.remove(&ticket).ok_or_else(|| {
            SvgvidgenError::pipeline(format!("ticket {} is not outstanding", ticket.0))
        })?;

        match self.work.perform(&record) {
            Ok(()) => {
                self.state = RunState::Done;
                ui.status = DONE_STATUS.to_string();
            }
            Err(err) => {
                tracing::error!(%err, "pipeline run failed");
                self.state = RunState::Failed;
                ui.status = FAILED_STATUS.to_string();
            }
        }
        ui.progress = FINISHED_PROGRESS;
        Ok(self.state)
    }

    /// Wait for every queued completion and apply each in turn.
    pub fn drain(
        &mut self,
        ui: &mut UiState,
        scheduler: &mut dyn Scheduler,
    ) -> SvgvidgenResult<RunState> {
        while let Some(ticket) = scheduler.wait_next() {
            self.complete(ticket, ui)?;
        }
        Ok(self.state)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/runner.rs"]
mod tests;
