use super::*;
use crate::pipeline::scheduler::VirtualClock;
use crate::prefs::{MemoryStore, PREFERENCES_KEY};
use crate::ui::{Checkbox, IDLE_STATUS};

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> SvgvidgenResult<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> SvgvidgenResult<()> {
        Err(SvgvidgenError::storage("quota exceeded"))
    }
}

/// Backend work that fails every call and remembers what it was asked to do.
#[derive(Default)]
struct FailingWork {
    seen: Vec<PreferenceRecord>,
}

impl BackendWork for FailingWork {
    fn perform(&mut self, record: &PreferenceRecord) -> SvgvidgenResult<()> {
        self.seen.push(*record);
        Err(SvgvidgenError::pipeline("renderer crashed"))
    }
}

#[test]
fn run_shows_progress_then_completes_after_delay() {
    let mut ui = UiState::new();
    let mut prefs = PreferenceStore::new(MemoryStore::new());
    let mut clock = VirtualClock::new();
    let mut runner = PipelineRunner::simulated(RunnerOpts::default());
    assert_eq!(runner.state(), RunState::Idle);

    let ticket = runner.run(&mut ui, &mut prefs, &mut clock).unwrap();
    assert_eq!(runner.state(), RunState::Running);
    assert_eq!(ui.status, "Running pipeline...");
    assert_eq!(ui.progress_width(), "50%");

    assert!(clock.advance(Duration::from_millis(1999)).is_empty());
    assert_eq!(ui.status, RUNNING_STATUS);

    let due = clock.advance(Duration::from_millis(1));
    assert_eq!(due, vec![ticket]);
    assert_eq!(runner.complete(ticket, &mut ui).unwrap(), RunState::Done);
    assert_eq!(ui.status, DONE_STATUS);
    assert_eq!(ui.progress_width(), "100%");
    assert_eq!(runner.outstanding(), 0);
}

#[test]
fn run_persists_current_checkboxes() {
    let mut ui = UiState::new();
    ui.set_checked(Checkbox::OutputGif, true);
    ui.set_checked(Checkbox::ColorAgent, false);
    let mut prefs = PreferenceStore::new(MemoryStore::new());
    let mut clock = VirtualClock::new();
    let mut runner = PipelineRunner::simulated(RunnerOpts::default());

    runner.run(&mut ui, &mut prefs, &mut clock).unwrap();
    assert_eq!(prefs.load(), Some(ui.preferences()));
    assert!(prefs.store().get(PREFERENCES_KEY).unwrap().is_some());
}

#[test]
fn failed_save_does_not_start_the_run() {
    let mut ui = UiState::new();
    let mut prefs = PreferenceStore::new(BrokenStore);
    let mut clock = VirtualClock::new();
    let mut runner = PipelineRunner::simulated(RunnerOpts::default());

    let err = runner.run(&mut ui, &mut prefs, &mut clock).unwrap_err();
    assert!(matches!(err, SvgvidgenError::Storage(_)));
    assert_eq!(runner.state(), RunState::Idle);
    assert_eq!(ui.status, IDLE_STATUS);
    assert_eq!(ui.progress, 0);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn failing_work_moves_to_failed() {
    let mut ui = UiState::new();
    let mut prefs = PreferenceStore::new(MemoryStore::new());
    let mut clock = VirtualClock::new();
    let mut runner = PipelineRunner::new(RunnerOpts::default(), FailingWork::default());

    runner.run(&mut ui, &mut prefs, &mut clock).unwrap();
    assert_eq!(runner.drain(&mut ui, &mut clock).unwrap(), RunState::Failed);
    assert_eq!(ui.status, FAILED_STATUS);
    assert_eq!(ui.progress, 100);
    assert_eq!(runner.work.seen, vec![ui.preferences()]);
}

#[test]
fn double_run_queues_two_completions_in_order() {
    let mut ui = UiState::new();
    let mut prefs = PreferenceStore::new(MemoryStore::new());
    let mut clock = VirtualClock::new();
    let mut runner = PipelineRunner::simulated(RunnerOpts::default());

    let first = runner.run(&mut ui, &mut prefs, &mut clock).unwrap();
    clock.advance(Duration::from_millis(300));
    let second = runner.run(&mut ui, &mut prefs, &mut clock).unwrap();
    assert_ne!(first, second);
    assert_eq!(runner.outstanding(), 2);

    assert_eq!(clock.advance(Duration::from_millis(1700)), vec![first]);
    runner.complete(first, &mut ui).unwrap();
    assert_eq!(ui.status, DONE_STATUS);
    assert_eq!(runner.outstanding(), 1);

    assert_eq!(clock.advance(Duration::from_millis(300)), vec![second]);
    runner.complete(second, &mut ui).unwrap();
    assert_eq!(runner.state(), RunState::Done);
    assert_eq!(runner.outstanding(), 0);
}

#[test]
fn unknown_or_repeated_ticket_is_rejected() {
    let mut ui = UiState::new();
    let mut prefs = PreferenceStore::new(MemoryStore::new());
    let mut clock = VirtualClock::new();
    let mut runner = PipelineRunner::simulated(RunnerOpts::default());

    assert!(runner.complete(RunTicket(42), &mut ui).is_err());

    let ticket = runner.run(&mut ui, &mut prefs, &mut clock).unwrap();
    runner.complete(ticket, &mut ui).unwrap();
    let err = runner.complete(ticket, &mut ui).unwrap_err();
    assert!(matches!(err, SvgvidgenError::Pipeline(_)));
}

#[test]
fn custom_delay_is_honoured() {
    let mut ui = UiState::new();
    let mut prefs = PreferenceStore::new(MemoryStore::new());
    let mut clock = VirtualClock::new();
    let opts = RunnerOpts {
        completion_delay: Duration::from_millis(10),
    };
    let mut runner = PipelineRunner::simulated(opts);

    let ticket = runner.run(&mut ui, &mut prefs, &mut clock).unwrap();
    assert_eq!(clock.advance(Duration::from_millis(10)), vec![ticket]);
}

#[test]
fn runner_opts_use_milliseconds_in_json() {
    let opts: RunnerOpts = serde_json::from_str(r#"{"completion_delay":250}"#).unwrap();
    assert_eq!(opts.completion_delay, Duration::from_millis(250));
    let defaults: RunnerOpts = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults, RunnerOpts::default());
    assert_eq!(
        serde_json::to_string(&RunnerOpts::default()).unwrap(),
        r#"{"completion_delay":2000}"#
    );
}
