use serde::{Deserialize, Serialize};

use crate::foundation::error::{SvgvidgenError, SvgvidgenResult};
use crate::render::svg::RenderParams;

/// Fallbacks for fields a render request leaves out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    /// Width when absent or zero.
    pub width: f64,
    /// Height when absent or zero.
    pub height: f64,
    /// Message when absent or empty.
    pub message: String,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            message: "Hello from svgvidgen".to_string(),
        }
    }
}

impl RenderDefaults {
    /// Reject defaults that could never produce a valid document.
    pub fn validate(&self) -> SvgvidgenResult<()> {
        check_dimension("default width", self.width)?;
        check_dimension("default height", self.height)?;
        if self.width == 0.0 || self.height == 0.0 {
            return Err(SvgvidgenError::validation(
                "default width/height must be non-zero",
            ));
        }
        Ok(())
    }
}

/// JSON body of `POST /render`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Requested width.
    #[serde(default)]
    pub width: Option<f64>,
    /// Requested height.
    #[serde(default)]
    pub height: Option<f64>,
    /// Requested caption.
    #[serde(default)]
    pub message: Option<String>,
}

impl RenderRequest {
    /// Parse a request body.
    pub fn from_slice(body: &[u8]) -> SvgvidgenResult<Self> {
        serde_json::from_slice(body)
            .map_err(|e| SvgvidgenError::validation(format!("invalid render request: {e}")))
    }

    /// Fill absent, zero and empty fields from `defaults`.
    pub fn resolve(&self, defaults: &RenderDefaults) -> SvgvidgenResult<RenderParams> {
        let width = pick_dimension("width", self.width, defaults.width)?;
        let height = pick_dimension("height", self.height, defaults.height)?;
        let message = match self.message.as_deref() {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => defaults.message.clone(),
        };
        Ok(RenderParams {
            width,
            height,
            message,
        })
    }
}

fn pick_dimension(name: &str, requested: Option<f64>, fallback: f64) -> SvgvidgenResult<f64> {
    match requested {
        Some(v) if v != 0.0 => {
            check_dimension(name, v)?;
            Ok(v)
        }
        _ => Ok(fallback),
    }
}

fn check_dimension(name: &str, v: f64) -> SvgvidgenResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(SvgvidgenError::validation(format!(
            "{name} must be a non-negative number, got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/request.rs"]
mod tests;
