use crate::dataset::error::StoreError;
use crate::types::table::Table;
use log::{debug, info, warn};
use polars::frame::DataFrame;
use polars::prelude::*;
use std::io;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::{fs, task};

/// Hex characters of each digest kept in a cache file name.
const CACHE_DIGEST_LEN: usize = 16;

pub struct DatasetLoader {
    cache_dir: PathBuf,
}

/// What a cache file was built from: the canonical source path plus the
/// length and modification time the source had when it was parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceIdentity {
    path: PathBuf,
    len: u64,
    modified: SystemTime,
}

impl SourceIdentity {
    async fn read(source: &Path) -> Result<SourceIdentity, StoreError> {
        // A missing source is fatal even when a cache exists.
        let path = fs::canonicalize(source)
            .await
            .map_err(|e| StoreError::MetadataRead(source.to_path_buf(), e))?;
        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| StoreError::MetadataRead(path.clone(), e))?;
        let modified = metadata
            .modified()
            .map_err(|e| StoreError::MetadataRead(path.clone(), e))?;
        Ok(SourceIdentity {
            path,
            len: metadata.len(),
            modified,
        })
    }

    fn path_digest(&self) -> String {
        short_digest(self.path.to_string_lossy().as_bytes())
    }

    fn version_digest(&self) -> String {
        let nanos = self
            .modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        short_digest(format!("{}:{}", self.len, nanos).as_bytes())
    }
}

fn short_digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = format!("{:x}", hasher.finalize());
    digest[..CACHE_DIGEST_LEN].to_string()
}

impl DatasetLoader {
    pub fn new(cache_dir: &Path) -> DatasetLoader {
        DatasetLoader {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    /// Loads a table from its CSV source into memory.
    ///
    /// Parsed tables are cached as parquet. The cache file name carries the
    /// canonical source path and the source's length and modification time,
    /// so a cache is only reused for the exact file state it was built from.
    pub async fn load(&self, table: Table, source: &Path) -> Result<DataFrame, StoreError> {
        let identity = SourceIdentity::read(source).await?;
        let parquet_path = self.cache_path(table, &identity);

        if Self::cache_is_fresh(&parquet_path, identity.modified).await? {
            info!(
                "Cache hit for {} table from {:?} at {:?}",
                table, identity.path, parquet_path
            );
        } else {
            warn!(
                "Cache miss for {} table from {:?}. Parsing CSV.",
                table, identity.path
            );
            let df = Self::csv_to_dataframe(&identity.path, table).await?;

            fs::create_dir_all(&self.cache_dir)
                .await
                .map_err(|e| StoreError::CacheDirCreation(self.cache_dir.clone(), e))?;

            Self::cache_dataframe(df, &parquet_path).await?;
            info!("Cached {} table to {:?}", table, parquet_path);
            self.remove_stale_caches(table, &identity, &parquet_path).await;
        }

        Self::read_cached(table, parquet_path).await
    }

    /// `<prefix><stem>-<path digest>.`, shared by every version of one source.
    fn cache_stem(table: Table, identity: &SourceIdentity) -> String {
        let stem = identity
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| table.name().to_string());
        format!(
            "{}{}-{}.",
            table.cache_file_prefix(),
            stem,
            identity.path_digest()
        )
    }

    fn cache_path(&self, table: Table, identity: &SourceIdentity) -> PathBuf {
        self.cache_dir.join(format!(
            "{}{}.parquet",
            Self::cache_stem(table, identity),
            identity.version_digest()
        ))
    }

    async fn cache_is_fresh(
        parquet_path: &Path,
        source_modified: SystemTime,
    ) -> Result<bool, StoreError> {
        let cache_modified = match fs::metadata(parquet_path).await {
            Ok(metadata) => metadata
                .modified()
                .map_err(|e| StoreError::MetadataRead(parquet_path.to_path_buf(), e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(StoreError::MetadataRead(parquet_path.to_path_buf(), e)),
        };

        Ok(cache_modified >= source_modified)
    }

    /// Deletes caches built from earlier versions of the same source file.
    /// Failures are logged and skipped.
    async fn remove_stale_caches(&self, table: Table, identity: &SourceIdentity, keep: &Path) {
        let prefix = Self::cache_stem(table, identity);
        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not list cache dir {:?}: {}", self.cache_dir, e);
                return;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if path == keep || !name.starts_with(&prefix) || !name.ends_with(".parquet") {
                continue;
            }
            match fs::remove_file(&path).await {
                Ok(()) => debug!("Removed stale cache {:?}", path),
                Err(e) => warn!("Could not remove stale cache {:?}: {}", path, e),
            }
        }
    }

    /// Parses a CSV file (with header) into a DataFrame using a blocking task,
    /// keeping only the declared columns of `table`.
    async fn csv_to_dataframe(source: &Path, table: Table) -> Result<DataFrame, StoreError> {
        let path = source.to_path_buf();

        task::spawn_blocking(move || {
            let df = CsvReadOptions::default()
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(path.clone()))
                .map_err(|e| StoreError::CsvRead {
                    table,
                    path: path.clone(),
                    source: e,
                })?
                .finish()
                .map_err(|e| StoreError::CsvRead {
                    table,
                    path: path.clone(),
                    source: e,
                })?;

            debug!(
                "Parsed {} rows of {} data from {:?}",
                df.height(),
                table,
                path
            );
            normalize_frame(table, &df)
        })
        .await?
    }

    /// Writes a DataFrame to a Parquet file using spawn_blocking.
    /// `ParquetWriter` needs `&mut df`, so the frame is taken by value.
    async fn cache_dataframe(mut df: DataFrame, path: &Path) -> Result<(), StoreError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            let file = std::fs::File::create(&path_buf)
                .map_err(|e| StoreError::ParquetWriteIo(path_buf.clone(), e))?;
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| StoreError::ParquetWritePolars(path_buf, e))?;
            Ok::<(), StoreError>(())
        })
        .await??;
        Ok(())
    }

    async fn read_cached(table: Table, path: PathBuf) -> Result<DataFrame, StoreError> {
        task::spawn_blocking(move || {
            let df = LazyFrame::scan_parquet(&path, Default::default())
                .and_then(|frame| frame.collect())
                .map_err(|e| StoreError::ParquetScan(path.clone(), e))?;
            normalize_frame(table, &df)
        })
        .await?
    }
}

/// Selects the declared columns of `table` from `df`, in declared order,
/// cast to their declared types.
pub(crate) fn normalize_frame(table: Table, df: &DataFrame) -> Result<DataFrame, StoreError> {
    let mut columns = Vec::new();
    for (name, dtype) in table.columns() {
        let column = df.column(name).map_err(|_| StoreError::MissingColumn {
            table,
            column: name.to_string(),
        })?;
        let column = column.cast(&dtype).map_err(|e| StoreError::ColumnCast {
            table,
            column: name.to_string(),
            source: e,
        })?;
        columns.push(column);
    }
    Ok(DataFrame::new(columns)?)
}
