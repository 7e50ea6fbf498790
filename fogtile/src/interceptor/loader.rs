//! Fog data loading and ingestion.
//!
//! The loader fetches raw exploration-history blobs through a
//! [`BlobFetcher`] and feeds them to the fog engine's ingestion entry
//! points: one call per discrete file, or one call for a bundled archive.
//! File-mode loading is best-effort - a file that fails to fetch or
//! ingest is logged and skipped, never aborting the rest.

use crate::fog::FogSource;
use std::future::Future;
use thiserror::Error;
use tracing::{info, warn};

/// A named data blob could not be fetched.
#[derive(Debug, Clone, Error)]
#[error("blob {name} unavailable: {message}")]
pub struct FetchError {
    pub name: String,
    pub message: String,
}

/// Fetches named fog data blobs from wherever the host keeps them.
///
/// Implementations must be thread-safe; the single-flight guard ensures
/// only one load sequence ever runs at a time, but the fetcher itself is
/// shared state of the worker context.
pub trait BlobFetcher: Send + Sync {
    /// Fetch the raw bytes of one named blob.
    fn fetch(&self, name: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// The whole load failed (archive mode only; file mode is best-effort).
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The bundled archive could not be fetched or unpacked
    #[error("archive load failed: {0}")]
    Archive(String),
}

/// What to load: discrete files or one bundled archive.
#[derive(Debug, Clone)]
pub enum DataManifest {
    /// Fetch each named file and ingest it individually
    Files(Vec<String>),
    /// Fetch one archive blob and hand it to the engine whole
    Archive(String),
}

/// Fetches the manifest's blobs and feeds them into a fog source.
#[derive(Debug, Clone)]
pub struct FogLoader<F> {
    fetcher: F,
    manifest: DataManifest,
}

impl<F: BlobFetcher> FogLoader<F> {
    pub fn new(fetcher: F, manifest: DataManifest) -> Self {
        Self { fetcher, manifest }
    }

    /// Run the ingestion sequence against a freshly built source.
    ///
    /// File mode tolerates per-file failures: the engine ends up in a
    /// best-effort state rather than failing the whole initialization.
    /// Archive mode has a single blob, so its failure fails the load.
    pub async fn load_into<S: FogSource>(&self, source: &mut S) -> Result<(), LoadError> {
        match &self.manifest {
            DataManifest::Files(names) => {
                let mut loaded = 0usize;
                for name in names {
                    match self.fetcher.fetch(name).await {
                        Ok(data) => match source.ingest_file(name, data) {
                            Ok(()) => {
                                loaded += 1;
                                info!(file = %name, "fog data file ingested");
                            }
                            Err(e) => warn!(file = %name, error = %e, "skipping file: ingest failed"),
                        },
                        Err(e) => warn!(file = %name, error = %e, "skipping file: fetch failed"),
                    }
                }
                info!(loaded, total = names.len(), "fog data load complete");
                Ok(())
            }
            DataManifest::Archive(name) => {
                let data = self
                    .fetcher
                    .fetch(name)
                    .await
                    .map_err(|e| LoadError::Archive(e.to_string()))?;
                source
                    .ingest_archive(data)
                    .map_err(|e| LoadError::Archive(e.to_string()))?;
                info!(archive = %name, "fog data archive ingested");
                Ok(())
            }
        }
    }
}


#[cfg(test)]
pub use tests::MapFetcher;
