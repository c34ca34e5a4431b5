use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::StoreError;

/// Load a JSON document, falling back to `T::default()`.
///
/// A missing or blank file is the normal first-run case. A file that cannot
/// be parsed is renamed to `<file>.corrupt-<timestamp>` so the next save
/// does not destroy it.
pub fn load_document<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot read document, using defaults");
            return T::default();
        }
    };

    if raw.trim().is_empty() {
        return T::default();
    }

    match serde_json::from_str(&raw) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Malformed document, using defaults");
            quarantine(path);
            T::default()
        }
    }
}

/// Write `doc` as pretty-printed JSON, replacing `path` atomically.
pub fn save_document<T: Serialize>(path: &Path, doc: &T) -> Result<(), StoreError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;

    let json = serde_json::to_string_pretty(doc)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Persist {
        path: path.display().to_string(),
        reason: e.error.to_string(),
    })?;
    Ok(())
}

fn quarantine(path: &Path) {
    let target = quarantine_path(path);
    match std::fs::rename(path, &target) {
        Ok(()) => tracing::warn!(moved_to = %target.display(), "Corrupt document moved aside"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Cannot move corrupt document aside"),
    }
}

fn quarantine_path(path: &Path) -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%3f");
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".corrupt-{stamp}"));
    path.with_file_name(name)
}
