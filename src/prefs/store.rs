use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;

use crate::foundation::error::{SvgvidgenError, SvgvidgenResult};

/// Durable string key-value storage.
///
/// `get` distinguishes "nothing stored" (`Ok(None)`) from a medium failure (`Err`).
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> SvgvidgenResult<Option<String>>;
    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> SvgvidgenResult<()>;
}

/// In-process store, mostly for tests and one-shot CLI invocations.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SvgvidgenResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SvgvidgenResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
///
/// Writes go to a sibling temp file and are renamed into place, so readers observe either
/// the previous value or the new one.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Store rooted at `root`. The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path backing `key`.
    pub fn path_for(&self, key: &str) -> SvgvidgenResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FsStore {
    fn get(&self, key: &str) -> SvgvidgenResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SvgvidgenError::storage(format!(
                "read '{}': {e}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> SvgvidgenResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("create store dir '{}'", self.root.display()))
            .map_err(|e| SvgvidgenError::storage(format!("{e:#}")))?;

        // Unique per process and per write so concurrent writers never share a temp file.
        static TMP_SEQ: AtomicU64 = AtomicU64::new(0);
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .root
            .join(format!(".{key}.{}.{seq}.tmp", std::process::id()));
        std::fs::write(&tmp, value)
            .and_then(|_| std::fs::rename(&tmp, &path))
            .map_err(|e| {
                let _ = std::fs::remove_file(&tmp);
                SvgvidgenError::storage(format!("write '{}': {e}", path.display()))
            })
    }
}

fn validate_key(key: &str) -> SvgvidgenResult<()> {
    if key.is_empty() {
        return Err(SvgvidgenError::validation("store key must be non-empty"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(SvgvidgenError::validation(format!(
            "store key '{key}' may only contain ASCII letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/prefs/store.rs"]
mod tests;
