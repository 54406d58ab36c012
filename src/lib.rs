//! svgvidgen is the control surface of an AI-to-SVG video pipeline.
//!
//! - [`prefs`]: run preferences persisted as JSON in a key-value store
//! - [`ui`] and [`upload`]: headless page model and the config upload guard
//! - [`pipeline`]: the simulated run, driven by an injected [`Scheduler`]
//! - [`render`]: the SVG render stub service
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Render service configuration.
pub mod config;
/// Simulated pipeline runs.
pub mod pipeline;
/// Preference persistence.
pub mod prefs;
/// Render stub service.
pub mod render;
/// Page model.
pub mod ui;
/// Upload guard.
pub mod upload;

pub use crate::config::ServerConfig;
pub use crate::foundation::error::{SvgvidgenError, SvgvidgenResult};
pub use crate::pipeline::{
    PipelineRunner, RunState, RunTicket, RunnerOpts, Scheduler, VirtualClock, WallClock,
};
pub use crate::prefs::{FsStore, KeyValueStore, MemoryStore, PreferenceRecord, PreferenceStore};
pub use crate::render::{RenderServer, RenderService, SvgTemplate};
pub use crate::ui::{Checkbox, UiState};
pub use crate::upload::{FileMeta, UploadRejection, ValidationResult};
