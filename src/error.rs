use crate::dataset::error::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution,

    // Covers errors joining the blocking query tasks
    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
