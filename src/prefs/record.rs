use serde::{Deserialize, Serialize};

use crate::foundation::error::{SvgvidgenError, SvgvidgenResult};

/// Run preferences persisted between sessions.
///
/// The JSON shape is fixed: every field is written on save and every field is required on
/// load, so a stored value is either restored whole or not at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreferenceRecord {
    /// Scene-analysis stage enabled.
    #[serde(rename = "sceneAgent")]
    pub scene_agent: bool,
    /// Color-processing stage enabled.
    #[serde(rename = "colorAgent")]
    pub color_agent: bool,
    /// MP4 output requested.
    #[serde(rename = "outputMP4")]
    pub output_mp4: bool,
    /// GIF output requested.
    #[serde(rename = "outputGIF")]
    pub output_gif: bool,
    /// PNG frame output requested.
    #[serde(rename = "outputPNG")]
    pub output_png: bool,
}

impl PreferenceRecord {
    /// Command-line flags the pipeline would be launched with, in fixed order.
    pub fn pipeline_flags(&self) -> Vec<&'static str> {
        let table = [
            (self.scene_agent, "--enable-scene-agent"),
            (self.color_agent, "--enable-color-agent"),
            (self.output_mp4, "--output-mp4"),
            (self.output_gif, "--output-gif"),
            (self.output_png, "--output-png"),
        ];
        table
            .into_iter()
            .filter_map(|(on, flag)| on.then_some(flag))
            .collect()
    }

    /// Serialize to the stored JSON form.
    pub fn to_json(&self) -> SvgvidgenResult<String> {
        serde_json::to_string(self).map_err(|e| SvgvidgenError::serde(e.to_string()))
    }

    /// Parse the stored JSON form. All five fields must be present and boolean.
    pub fn from_json(raw: &str) -> SvgvidgenResult<Self> {
        serde_json::from_str(raw).map_err(|e| SvgvidgenError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prefs/record.rs"]
mod tests;
