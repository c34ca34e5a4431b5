use std::path::{Path, PathBuf};

use super::StoreError;

const MAX_EXTENSION_LEN: usize = 8;

/// Uploaded media, stored as `<uuid>.<ext>` under the uploads directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `bytes` under a generated name and return that name.
    /// The extension comes from the validated MIME type, never the client's
    /// file name, so a stored file is always served as what it was checked as.
    pub fn save(&self, mime_type: &str, bytes: &[u8]) -> Result<String, StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let id = uuid::Uuid::new_v4();
        let stored_name = match extension_for_mime(mime_type) {
            Some(ext) => format!("{id}.{ext}"),
            None => id.to_string(),
        };
        std::fs::write(self.dir.join(&stored_name), bytes)?;
        tracing::debug!(file = %stored_name, size = bytes.len(), "Stored upload");
        Ok(stored_name)
    }

    /// Map a requested name to a stored file, refusing anything that could
    /// escape the uploads directory.
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        if !is_safe_name(file_name) {
            return None;
        }
        let candidate = self.dir.join(file_name);
        let canonical = candidate.canonicalize().ok()?;
        let root = self.dir.canonicalize().ok()?;
        if !canonical.starts_with(&root) || !canonical.is_file() {
            return None;
        }
        Some(canonical)
    }
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

fn extension_for_mime(mime_type: &str) -> Option<String> {
    let essence = mime_type.split(';').next()?.trim().to_ascii_lowercase();
    let ext = match essence.as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/heic" => "heic",
        "image/heif" => "heif",
        other => mime_guess::get_mime_extensions_str(other)?.first().copied()?,
    };
    let valid = ext.len() <= MAX_EXTENSION_LEN && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_string())
}
