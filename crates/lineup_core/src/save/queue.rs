//! Per-key write lanes
//!
//! Board mutations issue a durability write and move on without waiting for
//! it. Writes for one key go through a single FIFO lane (one spawned task per
//! key), so a slow write can never be overtaken by an older one and the
//! stored value always ends up equal to the last committed state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

use super::error::SaveError;
use super::store::KeyValueStore;

type SharedStatus = Arc<Mutex<HashMap<String, LaneStatus>>>;

enum LaneJob {
    Write { seq: u64, blob: String },
    Flush(oneshot::Sender<()>),
}

/// Progress of one key's lane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneStatus {
    /// Writes handed to the lane
    pub enqueued: u64,
    /// Writes the lane has finished, successfully or not
    pub completed: u64,
    /// Error of the most recent completed write, cleared by the next success
    pub last_error: Option<String>,
}

impl LaneStatus {
    pub fn is_idle(&self) -> bool {
        self.completed >= self.enqueued
    }
}

pub struct WriteQueue {
    store: Arc<dyn KeyValueStore>,
    runtime: Handle,
    lanes: HashMap<String, mpsc::UnboundedSender<LaneJob>>,
    latest: HashMap<String, String>,
    status: SharedStatus,
}

impl WriteQueue {
    pub fn new(store: Arc<dyn KeyValueStore>, runtime: Handle) -> Self {
        Self {
            store,
            runtime,
            lanes: HashMap::new(),
            latest: HashMap::new(),
            status: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Queue bound to the runtime the caller is running on.
    pub fn on_current_runtime(store: Arc<dyn KeyValueStore>) -> Result<Self, SaveError> {
        let runtime = Handle::try_current()
            .map_err(|e| SaveError::Unavailable(format!("no async runtime for write lanes: {e}")))?;
        Ok(Self::new(store, runtime))
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Hands `blob` to the lane of `key` and returns immediately.
    pub fn enqueue(&mut self, key: &str, blob: String) {
        self.latest.insert(key.to_string(), blob.clone());

        let seq = {
            let mut status = lock(&self.status);
            let lane = status.entry(key.to_string()).or_default();
            lane.enqueued += 1;
            lane.enqueued
        };

        let lane = self.lane(key);
        if lane.send(LaneJob::Write { seq, blob }).is_err() {
            let err = SaveError::LaneClosed { key: key.to_string() };
            record_completion(&self.status, key, seq, Err(err));
        }
    }

    /// Newest blob for `key`: the last enqueued one if any, else the store's.
    pub fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        if let Some(blob) = self.latest.get(key) {
            return Ok(Some(blob.clone()));
        }
        self.store.get(key)
    }

    pub fn status(&self, key: &str) -> Option<LaneStatus> {
        lock(&self.status).get(key).cloned()
    }

    /// Keys whose most recent completed write failed, sorted.
    pub fn failed_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = lock(&self.status)
            .iter()
            .filter(|(_, lane)| lane.last_error.is_some())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Hands the newest blob of `key` to its lane again. Returns false when
    /// nothing was ever enqueued for the key.
    pub fn retry(&mut self, key: &str) -> bool {
        match self.latest.get(key).cloned() {
            Some(blob) => {
                tracing::debug!(key, "Re-sending newest blob");
                self.enqueue(key, blob);
                true
            }
            None => false,
        }
    }

    /// Waits until every write enqueued so far has completed.
    pub async fn flush(&self) {
        let mut waiters = Vec::with_capacity(self.lanes.len());
        for lane in self.lanes.values() {
            let (done, waiter) = oneshot::channel();
            if lane.send(LaneJob::Flush(done)).is_ok() {
                waiters.push(waiter);
            }
        }
        for waiter in waiters {
            let _ = waiter.await;
        }
    }

    fn lane(&mut self, key: &str) -> &mpsc::UnboundedSender<LaneJob> {
        let store = &self.store;
        let status = &self.status;
        let runtime = &self.runtime;
        self.lanes.entry(key.to_string()).or_insert_with(|| {
            let (tx, rx) = mpsc::unbounded_channel();
            runtime.spawn(run_lane(key.to_string(), Arc::clone(store), Arc::clone(status), rx));
            tracing::debug!(key, "Opened write lane");
            tx
        })
    }
}

async fn run_lane(
    key: String,
    store: Arc<dyn KeyValueStore>,
    status: SharedStatus,
    mut jobs: mpsc::UnboundedReceiver<LaneJob>,
) {
    while let Some(job) = jobs.recv().await {
        match job {
            LaneJob::Write { seq, blob } => {
                let store = Arc::clone(&store);
                let lane_key = key.clone();
                let result =
                    match tokio::task::spawn_blocking(move || store.set(&lane_key, &blob)).await {
                        Ok(result) => result,
                        Err(e) => Err(SaveError::Unavailable(format!("write task failed: {e}"))),
                    };
                record_completion(&status, &key, seq, result);
            }
            LaneJob::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!(key = %key, "Write lane closed");
}

fn record_completion(status: &SharedStatus, key: &str, seq: u64, result: Result<(), SaveError>) {
    let mut status = lock(status);
    let lane = status.entry(key.to_string()).or_default();
    lane.completed = lane.completed.max(seq);
    match result {
        Ok(()) => {
            tracing::debug!(key, seq, "Board persisted");
            lane.last_error = None;
        }
        Err(e) => {
            tracing::warn!(key, seq, error = %e, "Board write failed, keeping state in memory");
            lane.last_error = Some(e.to_string());
        }
    }
}

fn lock(status: &SharedStatus) -> MutexGuard<'_, HashMap<String, LaneStatus>> {
    status.lock().unwrap_or_else(PoisonError::into_inner)
}
