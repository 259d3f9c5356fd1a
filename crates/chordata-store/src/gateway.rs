use std::panic::{self, AssertUnwindSafe};
use std::thread;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, trace};

use crate::error::{StoreError, StoreResult};
use crate::traits::PersistentStore;

type Job = Box<dyn FnOnce(&dyn PersistentStore) + Send>;

/// Jobs that may wait for the worker before callers are held back.
pub const DEFAULT_QUEUE_DEPTH: usize = 64;

/// Serialized-access gateway to a confined store.
///
/// The gateway moves the store onto a dedicated worker thread, its home
/// context, and never hands out a reference to it. Work reaches the store
/// only as closures sent over a channel; the worker runs them one at a time
/// in arrival order and sends each result back to its awaiting caller.
///
/// - A caller dropped before its job starts abandons the job; the worker
///   skips it and moves on.
/// - A job that panics is contained. Its caller sees
///   [`StoreError::Abandoned`] and the worker keeps serving.
/// - The queue is bounded. Once it is full, `run` waits for room before
///   submitting, and a caller dropped while waiting submits nothing.
/// - The worker exits once every gateway clone has been dropped.
#[derive(Clone)]
pub struct StoreGateway {
    jobs: mpsc::Sender<Job>,
}

impl StoreGateway {
    /// Move `store` onto a new worker thread and return a handle to it.
    pub fn spawn<S: PersistentStore>(store: S) -> StoreResult<Self> {
        Self::with_queue_depth(store, DEFAULT_QUEUE_DEPTH)
    }

    /// Like [`spawn`](Self::spawn), with room for `depth` waiting jobs.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is zero.
    pub fn with_queue_depth<S: PersistentStore>(store: S, depth: usize) -> StoreResult<Self> {
        let (jobs, mut rx) = mpsc::channel::<Job>(depth);
        thread::Builder::new()
            .name("chordata-store".into())
            .spawn(move || {
                debug!("store worker started");
                while let Some(job) = rx.blocking_recv() {
                    job(&store);
                }
                debug!("store worker stopped");
            })?;
        Ok(Self { jobs })
    }

    /// Run `f` against the store on its home thread and await the result.
    pub async fn run<R, F>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&dyn PersistentStore) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, result) = oneshot::channel();
        let job: Job = Box::new(move |store: &dyn PersistentStore| {
            if reply.is_closed() {
                trace!("caller gone, skipping store job");
                return;
            }
            match panic::catch_unwind(AssertUnwindSafe(|| f(store))) {
                Ok(value) => {
                    let _ = reply.send(value);
                }
                Err(_) => error!("store job panicked"),
            }
        });
        self.jobs.send(job).await.map_err(|_| StoreError::Unavailable)?;
        result.await.map_err(|_| StoreError::Abandoned)
    }

    /// Returns `true` while the worker thread is accepting jobs.
    pub fn is_alive(&self) -> bool {
        !self.jobs.is_closed()
    }
}

impl std::fmt::Debug for StoreGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreGateway")
            .field("alive", &self.is_alive())
            .finish()
    }
}
