//! Screenshot persistence.
//!
//! Drivers hand screenshots back base64-encoded. The store decodes them and
//! writes the bytes under its directory, creating it on first use.

use crate::result::{PageError, PageResult};
use base64::Engine;
use std::path::{Component, Path, PathBuf};

/// Default directory for saved screenshots
pub const DEFAULT_SCREENSHOT_DIR: &str = "screenshots";

/// Writes decoded screenshots into one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotStore {
    dir: PathBuf,
}

impl Default for ScreenshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCREENSHOT_DIR)
    }
}

impl ScreenshotStore {
    /// Store writing into `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for `name`, with `.png` added when it has no extension
    #[must_use]
    pub fn file_name(name: &str) -> String {
        if Path::new(name).extension().is_some() {
            name.to_string()
        } else {
            format!("{name}.png")
        }
    }

    /// `prefix-YYYYmmdd-HHMMSS.mmm.png` in UTC
    #[must_use]
    pub fn timestamped_name(prefix: &str) -> String {
        format!(
            "{prefix}-{}.png",
            chrono::Utc::now().format("%Y%m%d-%H%M%S%.3f")
        )
    }

    /// Decode `encoded` and write it as `name` inside the store directory.
    pub async fn save(&self, name: &str, encoded: &str) -> PageResult<PathBuf> {
        validate_name(name)?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| PageError::screenshot(format!("invalid base64 payload: {e}")))?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(Self::file_name(name));
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "screenshot saved");
        Ok(path)
    }
}

fn validate_name(name: &str) -> PageResult<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(PageError::screenshot(format!(
            "screenshot name `{name}` must be a plain file name"
        ))),
    }
}
