use crate::error::ClimateError;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = "climate_api_cache";

pub fn get_cache_dir() -> Result<PathBuf, ClimateError> {
    dirs::cache_dir()
        .map(|p| p.join(CACHE_DIR_NAME))
        .ok_or(ClimateError::CacheDirResolution)
}

pub async fn ensure_cache_dir_exists(path: &Path) -> Result<(), ClimateError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(ClimateError::CacheDirCreation(
                    path.to_path_buf(),
                    io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "cache path exists but is not a directory",
                    ),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating cache directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| ClimateError::CacheDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(ClimateError::CacheDirCreation(path.to_path_buf(), e)),
    }
}
