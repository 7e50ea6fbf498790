//! Fog tile service facade implementation.

use super::{ServiceConfig, ServiceError};
use crate::fog::FogSource;
use crate::interceptor::{BlobFetcher, FetchOutcome, FogLoader, FogWorker, WorkerPhase};
use crate::tile::TileSynthesizer;
use tracing::info;

/// High-level facade over the tile interception context.
///
/// Encapsulates component creation and wiring: the loader over the given
/// blob fetcher, the synthesizer for the configured tile size, and the
/// worker context that ties them to the fog source factory.
///
/// # Example
///
/// ```ignore
/// use fogtile::service::{FogTileService, ServiceConfig};
///
/// let service = FogTileService::new(ServiceConfig::default(), fetcher, || make_engine())?;
/// service.install();
/// service.activate().await?;
/// let outcome = service.handle_fetch("/custom-tile/5/10/20").await?;
/// ```
pub struct FogTileService<S, F, B> {
    worker: FogWorker<S, F, B>,
}

impl<S, F, B> FogTileService<S, F, B>
where
    S: FogSource,
    F: BlobFetcher,
    B: Fn() -> S + Send + Sync,
{
    /// Validate the configuration and wire the worker context.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated service configuration
    /// * `fetcher` - Source of raw exploration-history blobs
    /// * `factory` - Builds the fog engine instance the loader populates
    pub fn new(config: ServiceConfig, fetcher: F, factory: B) -> Result<Self, ServiceError> {
        config.validate()?;

        let loader = FogLoader::new(fetcher, config.manifest.clone());
        let synth = TileSynthesizer::new(config.tile_size, config.style);
        let worker = FogWorker::new(factory, loader, synth, config.path_prefix.clone());

        info!(
            tile_size = config.tile_size,
            prefix = %config.path_prefix,
            "fog tile service created"
        );
        Ok(Self { worker })
    }

    /// Deliver the install event.
    pub fn install(&self) {
        self.worker.on_install();
    }

    /// Deliver the activate event and run fog initialization.
    pub async fn activate(&self) -> Result<(), ServiceError> {
        self.worker.on_activate().await?;
        Ok(())
    }

    /// Block until the shared fog handle is ready, initializing if no
    /// load has started yet.
    pub async fn await_ready(&self) -> Result<(), ServiceError> {
        self.worker.ensure_ready().await?;
        Ok(())
    }

    /// Handle one network request path.
    pub async fn handle_fetch(&self, path: &str) -> Result<FetchOutcome, ServiceError> {
        Ok(self.worker.on_fetch(path).await?)
    }

    /// Synchronous routing decision without side effects.
    pub fn routes(&self, path: &str) -> bool {
        self.worker.routes(path)
    }

    /// Current worker lifecycle phase.
    pub fn phase(&self) -> WorkerPhase {
        self.worker.phase()
    }

    /// Tear the context down. Only the host calls this.
    pub fn dispose(&self) {
        self.worker.dispose();
    }

    /// Access the underlying worker context.
    pub fn worker(&self) -> &FogWorker<S, F, B> {
        &self.worker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fog::FixtureFogSource;
    use crate::interceptor::{DataManifest, MapFetcher};

    fn service(
        config: ServiceConfig,
    ) -> Result<
        FogTileService<FixtureFogSource, MapFetcher, fn() -> FixtureFogSource>,
        ServiceError,
    > {
        fn factory() -> FixtureFogSource {
            FixtureFogSource::new(Vec::new(), 256)
        }
        FogTileService::new(config, MapFetcher::new(&["one"]), factory)
    }

    #[tokio::test]
    async fn test_facade_serves_a_tile_end_to_end() {
        let config = ServiceConfig {
            tile_size: 256,
            manifest: DataManifest::Files(vec!["one".to_string()]),
            ..ServiceConfig::default()
        };
        let service = service(config).unwrap();

        service.install();
        service.activate().await.unwrap();
        assert_eq!(service.phase(), WorkerPhase::Active);

        let outcome = service.handle_fetch("/custom-tile/2/1/1").await.unwrap();
        assert!(matches!(outcome, FetchOutcome::Intercepted(_)));

        let outcome = service.handle_fetch("/assets/logo.png").await.unwrap();
        assert!(matches!(outcome, FetchOutcome::PassThrough));
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let config = ServiceConfig {
            tile_size: 640,
            ..ServiceConfig::default()
        };
        assert!(matches!(
            service(config),
            Err(ServiceError::InvalidTileSize(640))
        ));
    }
}
