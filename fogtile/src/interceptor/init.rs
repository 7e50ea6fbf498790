//! Single-flight initialization guard.
//!
//! The first caller starts the asynchronous load and registers the
//! in-flight completion; every concurrent and subsequent caller awaits
//! that same completion instead of starting a second load. The guard
//! holds for the whole lifetime of the worker context, not just during
//! activation: a tile fetch arriving before activation finishes joins
//! the same in-flight load.
//!
//! ```text
//! Fetch A ─┐
//!          │
//! Fetch B ─┼──► InitCell ──────► one load sequence
//!          │       │                    │
//! Fetch C ─┘       │                    │
//!                  ▼                    ▼
//!            [A, B, C all         [exactly one
//!             receive the          ingestion run]
//!             same handle]◄─────────────┘
//! ```

use super::loader::LoadError;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Initialization failed or was abandoned.
#[derive(Debug, Clone, Error)]
pub enum InitError {
    /// The load itself failed; shared by every waiter of that attempt
    #[error("fog initialization failed: {0}")]
    Failed(Arc<LoadError>),

    /// The leading caller went away before completing the load
    #[error("fog initialization abandoned before completing")]
    Abandoned,
}

enum InitState<T> {
    /// No load has run yet (or the last one failed or was abandoned)
    Idle,
    /// A load is running; waiters subscribe to its completion
    InFlight(broadcast::Sender<Result<T, InitError>>),
    /// The handle is ready and immutable for the rest of the context
    Ready(T),
}

/// Counters for observing single-flight behavior.
#[derive(Debug, Default)]
pub struct InitStats {
    /// Calls that ran the load themselves
    pub led: u64,
    /// Calls that joined an in-flight or completed load
    pub joined: u64,
}

/// Lifetime-scoped single-flight cell holding the shared fog handle.
///
/// The state mutex is a plain [`std::sync::Mutex`]: it is never held
/// across an await, and the abandoned-leader cleanup must be able to
/// take it from a synchronous `Drop`.
pub struct InitCell<T> {
    state: Mutex<InitState<T>>,
    led: AtomicU64,
    joined: AtomicU64,
}

enum Role<T> {
    Done(T),
    Waiter(broadcast::Receiver<Result<T, InitError>>),
    Leader(broadcast::Sender<Result<T, InitError>>),
}

/// Resets `InFlight` back to `Idle` if the leading future is dropped
/// before it publishes a result. Dropping the state's sender closes the
/// channel, so waiters observe [`InitError::Abandoned`] instead of
/// hanging, and a later caller leads a fresh load.
struct ResetOnDrop<'a, T> {
    cell: &'a InitCell<T>,
    armed: bool,
}

impl<T> Drop for ResetOnDrop<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.cell.state.lock().unwrap_or_else(|e| e.into_inner());
        if matches!(*state, InitState::InFlight(_)) {
            *state = InitState::Idle;
        }
    }
}

impl<T: Clone> InitCell<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(InitState::Idle),
            led: AtomicU64::new(0),
            joined: AtomicU64::new(0),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, InitState<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The resolved handle, if initialization already completed.
    pub fn ready(&self) -> Option<T> {
        match &*self.lock_state() {
            InitState::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Snapshot of the led/joined counters.
    pub fn stats(&self) -> InitStats {
        InitStats {
            led: self.led.load(Ordering::SeqCst),
            joined: self.joined.load(Ordering::SeqCst),
        }
    }

    /// Resolve the handle, running `init` only if no load ran before.
    ///
    /// Exactly one caller leads; everyone else converges on the leader's
    /// result. On failure the error is broadcast to all current waiters
    /// and the cell returns to idle, so a later call may retry - there is
    /// still never more than one load in flight. A leader whose future is
    /// dropped mid-load also returns the cell to idle; its waiters get
    /// [`InitError::Abandoned`].
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<T, InitError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, LoadError>>,
    {
        let role = {
            let mut state = self.lock_state();
            match &*state {
                InitState::Ready(value) => Role::Done(value.clone()),
                InitState::InFlight(tx) => {
                    debug!("joining in-flight fog initialization");
                    Role::Waiter(tx.subscribe())
                }
                InitState::Idle => {
                    // Exactly one message is ever sent per attempt, so any
                    // nonzero capacity works; waiters are receivers, not
                    // buffered messages, and their count is unbounded.
                    let (tx, _rx) = broadcast::channel(1);
                    *state = InitState::InFlight(tx.clone());
                    Role::Leader(tx)
                }
            }
        };

        match role {
            Role::Done(value) => {
                self.joined.fetch_add(1, Ordering::SeqCst);
                Ok(value)
            }
            Role::Waiter(mut rx) => {
                self.joined.fetch_add(1, Ordering::SeqCst);
                match rx.recv().await {
                    Ok(result) => result,
                    Err(_) => Err(InitError::Abandoned),
                }
            }
            Role::Leader(tx) => {
                self.led.fetch_add(1, Ordering::SeqCst);
                debug!("starting fog initialization");
                let mut reset = ResetOnDrop {
                    cell: self,
                    armed: true,
                };
                let result = match init().await {
                    Ok(value) => Ok(value),
                    Err(e) => Err(InitError::Failed(Arc::new(e))),
                };

                {
                    let mut state = self.lock_state();
                    *state = match &result {
                        Ok(value) => InitState::Ready(value.clone()),
                        Err(_) => InitState::Idle,
                    };
                }
                reset.armed = false;

                // Waiters may all have gone away; that is not an error.
                let _ = tx.send(result.clone());
                result
            }
        }
    }
}

impl<T: Clone> Default for InitCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
