//! End-to-end tests for the tile interception context.
//!
//! Drives the public service facade with local fixtures standing in for
//! the external fog engine and the host's blob storage.

use fogtile::coord::MercatorPoint;
use fogtile::fog::{FogError, FogSource};
use fogtile::interceptor::{BlobFetcher, DataManifest, FetchError, FetchOutcome, WorkerPhase};
use fogtile::service::{FogTileService, ServiceConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const TILE_SIZE: u32 = 256;

/// Fog engine stand-in: uniform dark-gray tiles, fixed point set.
struct GrayEngine;

impl FogSource for GrayEngine {
    fn ingest_file(&mut self, _name: &str, _data: Vec<u8>) -> Result<(), FogError> {
        Ok(())
    }

    fn ingest_archive(&mut self, _data: Vec<u8>) -> Result<(), FogError> {
        Ok(())
    }

    fn bounding_box_pixels(
        &self,
        _south_west: MercatorPoint,
        _north_east: MercatorPoint,
    ) -> Result<Vec<f32>, FogError> {
        Ok(vec![0.25, 0.25, 0.75, 0.75])
    }

    async fn render_tile(&self, _x: i64, _y: i64, _zoom: i16) -> Result<Vec<u8>, FogError> {
        Ok(vec![40u8; (TILE_SIZE * TILE_SIZE * 4) as usize])
    }
}

/// Blob storage stand-in with a configurable delay and a fetch counter.
struct SlowStore {
    delay: Duration,
    fetches: Arc<AtomicUsize>,
}

impl BlobFetcher for SlowStore {
    async fn fetch(&self, _name: &str) -> Result<Vec<u8>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(vec![0u8; 8])
    }
}

fn make_service(
    delay: Duration,
) -> (
    FogTileService<GrayEngine, SlowStore, fn() -> GrayEngine>,
    Arc<AtomicUsize>,
) {
    let config = ServiceConfig {
        tile_size: TILE_SIZE,
        manifest: DataManifest::Files(vec!["history-a".to_string(), "history-b".to_string()]),
        ..ServiceConfig::default()
    };
    let fetches = Arc::new(AtomicUsize::new(0));
    let store = SlowStore {
        delay,
        fetches: Arc::clone(&fetches),
    };
    fn factory() -> GrayEngine {
        GrayEngine
    }
    // Cast to the fn-pointer type named in the signature; the bare fn
    // item would infer its own distinct type for `B`.
    let service = FogTileService::new(config, store, factory as fn() -> GrayEngine)
        .expect("config should validate");
    (service, fetches)
}

#[tokio::test]
async fn test_full_lifecycle_install_activate_fetch() {
    let (service, _fetches) = make_service(Duration::ZERO);
    assert_eq!(service.phase(), WorkerPhase::Installing);

    service.install();
    service.activate().await.unwrap();
    assert_eq!(service.phase(), WorkerPhase::Active);

    let outcome = service.handle_fetch("/custom-tile/5/10/20").await.unwrap();
    let FetchOutcome::Intercepted(response) = outcome else {
        panic!("tile path should be intercepted");
    };
    assert_eq!(response.content_type, "image/png");

    let decoded = image::load_from_memory(&response.body).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (TILE_SIZE, TILE_SIZE));
}

#[tokio::test]
async fn test_concurrent_cold_fetches_run_one_ingestion() {
    let (service, fetches) = make_service(Duration::from_millis(25));
    let service = Arc::new(service);

    let handles = (0..10).map(|i| {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service.handle_fetch(&format!("/custom-tile/4/{}/7", i)).await
        })
    });
    for result in futures::future::join_all(handles).await {
        let outcome = result.unwrap().unwrap();
        assert!(matches!(outcome, FetchOutcome::Intercepted(_)));
    }

    // Two files in the manifest, loaded exactly once between all callers.
    assert_eq!(service.worker().init_stats().led, 1);
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_query_parameter_and_foreign_paths() {
    let (service, _fetches) = make_service(Duration::ZERO);
    service.install();
    service.activate().await.unwrap();

    let with_query = service
        .handle_fetch("/custom-tile/5/10/20?t=1700000000")
        .await
        .unwrap();
    assert!(matches!(with_query, FetchOutcome::Intercepted(_)));

    let foreign = service.handle_fetch("/other/5/10/20").await.unwrap();
    assert!(matches!(foreign, FetchOutcome::PassThrough));
}

#[tokio::test]
async fn test_repeated_fetches_are_byte_identical() {
    let (service, _fetches) = make_service(Duration::ZERO);
    service.await_ready().await.unwrap();

    let first = service.handle_fetch("/custom-tile/5/10/20").await.unwrap();
    let second = service.handle_fetch("/custom-tile/5/10/20").await.unwrap();
    match (first, second) {
        (FetchOutcome::Intercepted(a), FetchOutcome::Intercepted(b)) => {
            assert_eq!(a.body, b.body, "identical requests must encode identically");
        }
        _ => panic!("both fetches should be intercepted"),
    }
}
