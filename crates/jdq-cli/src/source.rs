//! Job descriptions read from local files

use async_trait::async_trait;
use jdq_core::{DocumentSource, Error, JobDescription, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Markdown or plain-text job description on disk
#[derive(Debug, Clone)]
pub struct FileDocumentSource {
    path: PathBuf,
}

impl FileDocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last modification time, used to poll for edits
    pub async fn modified(&self) -> Result<SystemTime> {
        let metadata = tokio::fs::metadata(&self.path).await?;
        Ok(metadata.modified()?)
    }
}

#[async_trait]
impl DocumentSource for FileDocumentSource {
    async fn load(&self) -> Result<JobDescription> {
        let bytes = tokio::fs::read(&self.path).await?;
        let text = String::from_utf8(bytes).map_err(|e| {
            Error::Other(format!("{} is not valid UTF-8: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), bytes = text.len(), "Loaded job description");
        Ok(JobDescription::from_markdown(text))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
