//! Upload guard for the `config-file` input.
//!
//! Validation looks at metadata only (MIME type and size); file content is never read.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SvgvidgenError, SvgvidgenResult};
use crate::ui::UiState;

/// The only accepted MIME type.
pub const JSON_MIME: &str = "application/json";
/// Largest accepted upload, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Metadata of a selected file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    /// Browser-reported MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileMeta {
    /// Metadata with an explicit MIME type and size.
    pub fn new(mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            mime_type: mime_type.into(),
            size,
        }
    }

    /// Metadata for a local file: MIME type from the extension, size from the filesystem.
    ///
    /// Directories and other non-regular files are a validation error.
    pub fn from_path(path: &Path) -> SvgvidgenResult<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("stat upload '{}'", path.display()))?;
        if !meta.is_file() {
            return Err(SvgvidgenError::validation(format!(
                "upload '{}' is not a regular file",
                path.display()
            )));
        }
        Ok(Self::new(mime_for_path(path), meta.len()))
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => JSON_MIME,
        _ => "application/octet-stream",
    }
}

/// Why an upload was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadRejection {
    /// MIME type is not exactly `application/json`.
    InvalidType,
    /// Larger than [`MAX_UPLOAD_BYTES`].
    TooLarge,
}

impl UploadRejection {
    /// User-facing message written into the error surface.
    pub fn message(self) -> &'static str {
        match self {
            UploadRejection::InvalidType => "Invalid file type. Please upload a JSON file.",
            UploadRejection::TooLarge => "File size exceeds 5MB. Please upload a smaller file.",
        }
    }
}

impl std::fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of [`validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    /// File may be submitted.
    Accepted,
    /// File must not be submitted.
    Rejected(UploadRejection),
}

impl ValidationResult {
    /// `true` for [`ValidationResult::Accepted`].
    pub fn is_accepted(self) -> bool {
        matches!(self, ValidationResult::Accepted)
    }
}

/// Check `file` against the type rule, then the size rule. First failure wins.
pub fn validate(file: &FileMeta) -> ValidationResult {
    if file.mime_type != JSON_MIME {
        return ValidationResult::Rejected(UploadRejection::InvalidType);
    }
    if file.size > MAX_UPLOAD_BYTES {
        return ValidationResult::Rejected(UploadRejection::TooLarge);
    }
    ValidationResult::Accepted
}

/// Change handler of the `config-file` input.
///
/// With no file selected nothing changes. A rejected file is deselected and its message
/// shown; an accepted file stays selected and the error surface is cleared.
pub fn on_change(ui: &mut UiState, file: Option<FileMeta>) -> Option<ValidationResult> {
    let file = file?;
    let result = validate(&file);
    match result {
        ValidationResult::Accepted => {
            ui.config_file = Some(file);
            ui.file_error.clear();
        }
        ValidationResult::Rejected(reason) => {
            tracing::debug!(mime = %file.mime_type, size = file.size, %reason, "upload rejected");
            ui.config_file = None;
            ui.file_error = reason.message().to_string();
        }
    }
    Some(result)
}

#[cfg(test)]
#[path = "../../tests/unit/upload/guard.rs"]
mod tests;
