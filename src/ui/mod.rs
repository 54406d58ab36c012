//! Explicit model of the pipeline page.
//!
//! Components receive a `&mut UiState` instead of reaching into a global document, so
//! every side effect is observable in tests without a rendering environment.

use crate::foundation::error::{SvgvidgenError, SvgvidgenResult};
use crate::prefs::PreferenceRecord;
use crate::upload::FileMeta;

/// Element ids of the page.
pub mod ids {
    /// Scene agent checkbox.
    pub const SCENE_AGENT: &str = "scene-agent";
    /// Color agent checkbox.
    pub const COLOR_AGENT: &str = "color-agent";
    /// MP4 output checkbox.
    pub const OUTPUT_MP4: &str = "output-mp4";
    /// GIF output checkbox.
    pub const OUTPUT_GIF: &str = "output-gif";
    /// PNG output checkbox.
    pub const OUTPUT_PNG: &str = "output-png";
    /// Configuration file input.
    pub const CONFIG_FILE: &str = "config-file";
    /// Upload error text.
    pub const FILE_ERROR: &str = "file-error";
    /// Run button.
    pub const RUN_PIPELINE: &str = "run-pipeline";
    /// Progress bar.
    pub const PROGRESS: &str = "progress";
    /// Status text.
    pub const STATUS: &str = "status";
}

/// Status text shown before any run.
pub const IDLE_STATUS: &str = "Ready";

/// One of the five preference checkboxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Checkbox {
    /// `scene-agent`
    SceneAgent,
    /// `color-agent`
    ColorAgent,
    /// `output-mp4`
    OutputMp4,
    /// `output-gif`
    OutputGif,
    /// `output-png`
    OutputPng,
}

impl Checkbox {
    /// All checkboxes in page order.
    pub const ALL: [Checkbox; 5] = [
        Checkbox::SceneAgent,
        Checkbox::ColorAgent,
        Checkbox::OutputMp4,
        Checkbox::OutputGif,
        Checkbox::OutputPng,
    ];

    /// Element id.
    pub fn id(self) -> &'static str {
        match self {
            Checkbox::SceneAgent => ids::SCENE_AGENT,
            Checkbox::ColorAgent => ids::COLOR_AGENT,
            Checkbox::OutputMp4 => ids::OUTPUT_MP4,
            Checkbox::OutputGif => ids::OUTPUT_GIF,
            Checkbox::OutputPng => ids::OUTPUT_PNG,
        }
    }

    /// Look a checkbox up by element id.
    pub fn from_id(id: &str) -> SvgvidgenResult<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| SvgvidgenError::validation(format!("no checkbox with id '{id}'")))
    }
}

/// Page state: checkboxes, upload control, error surface, progress bar and status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiState {
    scene_agent: bool,
    color_agent: bool,
    output_mp4: bool,
    output_gif: bool,
    output_png: bool,
    /// File currently selected in the `config-file` input.
    pub config_file: Option<FileMeta>,
    /// Text of the `file-error` surface.
    pub file_error: String,
    /// Width of the `progress` bar, in percent.
    pub progress: u8,
    /// Text of the `status` element.
    pub status: String,
}

impl Default for UiState {
    /// Both agents and MP4 output enabled, nothing selected, status "Ready".
    fn default() -> Self {
        Self {
            scene_agent: true,
            color_agent: true,
            output_mp4: true,
            output_gif: false,
            output_png: false,
            config_file: None,
            file_error: String::new(),
            progress: 0,
            status: IDLE_STATUS.to_string(),
        }
    }
}

impl UiState {
    /// Fresh page state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `checkbox` is checked.
    pub fn checked(&self, checkbox: Checkbox) -> bool {
        match checkbox {
            Checkbox::SceneAgent => self.scene_agent,
            Checkbox::ColorAgent => self.color_agent,
            Checkbox::OutputMp4 => self.output_mp4,
            Checkbox::OutputGif => self.output_gif,
            Checkbox::OutputPng => self.output_png,
        }
    }

    /// Check or uncheck `checkbox`.
    pub fn set_checked(&mut self, checkbox: Checkbox, on: bool) {
        let slot = match checkbox {
            Checkbox::SceneAgent => &mut self.scene_agent,
            Checkbox::ColorAgent => &mut self.color_agent,
            Checkbox::OutputMp4 => &mut self.output_mp4,
            Checkbox::OutputGif => &mut self.output_gif,
            Checkbox::OutputPng => &mut self.output_png,
        };
        *slot = on;
    }

    /// Check or uncheck the checkbox with element id `id`.
    pub fn set_checked_by_id(&mut self, id: &str, on: bool) -> SvgvidgenResult<()> {
        let checkbox = Checkbox::from_id(id)?;
        self.set_checked(checkbox, on);
        Ok(())
    }

    /// Snapshot of the checkboxes as a record.
    pub fn preferences(&self) -> PreferenceRecord {
        PreferenceRecord {
            scene_agent: self.scene_agent,
            color_agent: self.color_agent,
            output_mp4: self.output_mp4,
            output_gif: self.output_gif,
            output_png: self.output_png,
        }
    }

    /// Assign all five checkboxes from `record`.
    pub fn apply_preferences(&mut self, record: &PreferenceRecord) {
        self.scene_agent = record.scene_agent;
        self.color_agent = record.color_agent;
        self.output_mp4 = record.output_mp4;
        self.output_gif = record.output_gif;
        self.output_png = record.output_png;
    }

    /// CSS width of the progress bar, e.g. `50%`.
    pub fn progress_width(&self) -> String {
        format!("{}%", self.progress)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/state.rs"]
mod tests;
