//! Report destinations

use crate::error::{SpecError, SpecResult};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Where a finished report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Standard output
    Console,
    /// A file, truncated before writing
    File(PathBuf),
}

impl OutputSink {
    /// Write the whole report in one go
    pub async fn write(&self, report: &str) -> SpecResult<()> {
        match self {
            OutputSink::Console => {
                let stdout_error = |source| SpecError::Output {
                    path: PathBuf::from("<stdout>"),
                    source,
                };
                let mut stdout = tokio::io::stdout();
                stdout
                    .write_all(report.as_bytes())
                    .await
                    .map_err(stdout_error)?;
                stdout.flush().await.map_err(stdout_error)
            }
            OutputSink::File(path) => {
                tokio::fs::write(path, report)
                    .await
                    .map_err(|source| SpecError::Output {
                        path: path.clone(),
                        source,
                    })?;
                debug!("Wrote {} bytes to {:?}", report.len(), path);
                Ok(())
            }
        }
    }
}
