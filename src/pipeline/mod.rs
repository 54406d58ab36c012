//! The simulated pipeline run behind the `run-pipeline` button.

/// Run state machine.
pub mod runner;
/// Deferred completions.
pub mod scheduler;

pub use runner::{
    BackendWork, COMPLETION_DELAY, DONE_STATUS, FAILED_STATUS, PipelineRunner, RUNNING_STATUS,
    RunState, RunnerOpts, SimulatedWork,
};
pub use scheduler::{RunTicket, Scheduler, VirtualClock, WallClock};
