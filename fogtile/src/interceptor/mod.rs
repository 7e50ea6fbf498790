//! Tile request interception.
//!
//! Models the background execution context that sits between the host's
//! tile-loading pipeline and the fog engine: a worker with an explicit
//! lifecycle state machine (install, activate, fetch, dispose), a
//! single-flight initialization guard, and the tile path router.
//!
//! Fetch handlers may run concurrently; the only mutual exclusion is the
//! initialization guard. Once resolved, the fog handle is an immutable
//! shared reference for the remainder of the context's life.

mod init;
mod loader;

pub use init::{InitCell, InitError, InitStats};
pub use loader::{BlobFetcher, DataManifest, FetchError, FogLoader, LoadError};

#[cfg(test)]
pub use loader::MapFetcher;

use crate::fog::FogSource;
use crate::tile::{route, TileError, TileResponse, TileSynthesizer};
use std::sync::Arc;
use std::sync::Mutex;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Lifecycle phase of the worker context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// Created, install event not yet seen
    Installing,
    /// Installed with skip-waiting semantics, awaiting activation
    Waiting,
    /// Claiming clients and starting fog initialization
    Activating,
    /// Serving fetches
    Active,
    /// Torn down by the host; fetches are refused
    Disposed,
}

/// A host lifecycle or network event delivered to the worker.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Install,
    Activate,
    Fetch(String),
}

/// The worker's reply to a dispatched event.
#[derive(Debug, Clone)]
pub enum WorkerReply {
    Installed,
    Activated,
    Fetch(FetchOutcome),
}

/// Routing outcome for one fetch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The path matched the tile pattern; serve this response
    Intercepted(TileResponse),
    /// Not a tile path; the platform's default handling proceeds
    PassThrough,
}

/// Errors surfaced to the host's event dispatch.
#[derive(Debug, Clone, Error)]
pub enum WorkerError {
    /// The context was disposed; only the host terminates it
    #[error("worker context is disposed")]
    Disposed,

    /// Fog initialization failed for this call chain
    #[error(transparent)]
    Init(#[from] InitError),

    /// Tile synthesis rejected the request
    #[error(transparent)]
    Tile(#[from] TileError),
}

/// The background worker context.
///
/// Owns the single shared fog instance behind a single-flight guard, the
/// loader that populates it, and the tile synthesizer. Created once per
/// execution context lifetime; `dispose` is the only teardown and only
/// the host calls it.
pub struct FogWorker<S, F, B> {
    phase: Mutex<WorkerPhase>,
    fog: InitCell<Arc<S>>,
    factory: B,
    loader: FogLoader<F>,
    synth: TileSynthesizer,
    path_prefix: String,
    cancel: CancellationToken,
}

impl<S, F, B> FogWorker<S, F, B>
where
    S: FogSource,
    F: BlobFetcher,
    B: Fn() -> S + Send + Sync,
{
    /// Create a worker context. No loading happens until activation or
    /// the first fetch, whichever comes first.
    pub fn new(factory: B, loader: FogLoader<F>, synth: TileSynthesizer, path_prefix: String) -> Self {
        Self {
            phase: Mutex::new(WorkerPhase::Installing),
            fog: InitCell::new(),
            factory,
            loader,
            synth,
            path_prefix,
            cancel: CancellationToken::new(),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> WorkerPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_phase(&self, phase: WorkerPhase) {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = phase;
    }

    /// Install: take over immediately instead of waiting for existing
    /// clients to close.
    pub fn on_install(&self) {
        info!("worker installed, skipping waiting handoff");
        self.set_phase(WorkerPhase::Waiting);
    }

    /// Activate: claim existing clients, then run fog initialization
    /// through the single-flight cell.
    ///
    /// An initialization failure is returned for logging but leaves the
    /// worker active: the next fetch retries through the same guard.
    pub async fn on_activate(&self) -> Result<(), InitError> {
        self.set_phase(WorkerPhase::Activating);
        debug!("worker activating, clients claimed");
        let result = self.ensure_ready().await.map(|_| ());
        self.set_phase(WorkerPhase::Active);
        result
    }

    /// Synchronous, side-effect-free routing decision.
    pub fn routes(&self, path: &str) -> bool {
        route(path, &self.path_prefix).is_some()
    }

    /// Handle one network fetch.
    ///
    /// Non-matching paths pass through untouched. Matching paths await
    /// the shared fog handle - joining any in-flight initialization, even
    /// before activation has finished - and synthesize the tile.
    pub async fn on_fetch(&self, path: &str) -> Result<FetchOutcome, WorkerError> {
        if self.cancel.is_cancelled() {
            return Err(WorkerError::Disposed);
        }
        let Some(request) = route(path, &self.path_prefix) else {
            return Ok(FetchOutcome::PassThrough);
        };

        let fog = self.ensure_ready().await?;
        let response = self.synth.synthesize(fog.as_ref(), request).await?;
        Ok(FetchOutcome::Intercepted(response))
    }

    /// Resolve the shared fog handle, loading it on first use.
    pub async fn ensure_ready(&self) -> Result<Arc<S>, InitError> {
        self.fog
            .get_or_init(|| async {
                let mut source = (self.factory)();
                self.loader.load_into(&mut source).await?;
                Ok(Arc::new(source))
            })
            .await
    }

    /// Typed dispatch from event kind to handler.
    pub async fn dispatch(&self, event: WorkerEvent) -> Result<WorkerReply, WorkerError> {
        match event {
            WorkerEvent::Install => {
                self.on_install();
                Ok(WorkerReply::Installed)
            }
            WorkerEvent::Activate => {
                self.on_activate().await?;
                Ok(WorkerReply::Activated)
            }
            WorkerEvent::Fetch(path) => Ok(WorkerReply::Fetch(self.on_fetch(&path).await?)),
        }
    }

    /// Single-flight observability counters.
    pub fn init_stats(&self) -> InitStats {
        self.fog.stats()
    }

    /// Host-driven teardown. Subsequent fetches return
    /// [`WorkerError::Disposed`].
    pub fn dispose(&self) {
        info!("worker context disposed");
        self.cancel.cancel();
        self.set_phase(WorkerPhase::Disposed);
    }
}
