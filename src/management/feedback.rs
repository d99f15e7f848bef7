use std::{fmt, io::Error, path::PathBuf};

use crate::{config, ranking::FeedbackMap};

#[derive(Debug)]
pub enum FeedbackError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for FeedbackError {
    fn from(err: Error) -> Self {
        FeedbackError::IoError(err)
    }
}

impl From<serde_json::Error> for FeedbackError {
    fn from(err: serde_json::Error) -> Self {
        FeedbackError::SerdeError(err)
    }
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackError::IoError(e) => write!(f, "feedback file I/O failed: {e}"),
            FeedbackError::SerdeError(e) => write!(f, "feedback file is not valid JSON: {e}"),
        }
    }
}

impl std::error::Error for FeedbackError {}

/// Stores the artist feedback scores as a single JSON object.
pub struct FeedbackManager {
    path: PathBuf,
}

impl FeedbackManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager for the configured feedback file.
    pub fn from_config() -> Self {
        Self::new(config::feedback_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the stored scores. A missing file is an empty history.
    pub async fn load(&self) -> Result<FeedbackMap, FeedbackError> {
        if !self.path.exists() {
            return Ok(FeedbackMap::new());
        }

        let content = async_fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Replaces the stored scores with `feedback`.
    ///
    /// Writes a sibling temp file and renames it over the target, so readers
    /// see either the old or the new content.
    pub async fn persist(&self, feedback: &FeedbackMap) -> Result<(), FeedbackError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(feedback)?;
        let tmp = self.tmp_path();
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Deletes the stored scores. Nothing stored is not an error.
    pub async fn reset(&self) -> Result<(), FeedbackError> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FeedbackError::IoError(e)),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "artist_feedback.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
