use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::{JobApi, JobStatus, SubmitOptions};
use crate::error::Result;
use crate::report::AnalysisReport;

/// Observable lifecycle state of the current analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Starting,
    Queued,
    Started,
    Deferred,
    Finished,
    Failed,
    /// A status check failed (transport, parse, or a `finished` response
    /// without a result payload). Not retried; re-triable via `start`.
    PollingError,
}

impl PollState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PollState::Finished | PollState::Failed | PollState::PollingError
        )
    }
}

/// Read-only view of the controller's current job slot.
#[derive(Debug, Clone)]
pub struct AnalysisSnapshot {
    /// True from submission until a terminal state
    pub loading: bool,
    /// Current lifecycle state
    pub state: PollState,
    /// The report, once finished
    pub data: Option<AnalysisReport>,
    /// Failure message, if any
    pub error: Option<String>,
    /// Which `start` call this snapshot belongs to; writes from a superseded
    /// polling task are rejected by comparing against it
    generation: u64,
}

impl AnalysisSnapshot {
    fn idle() -> Self {
        Self {
            loading: false,
            state: PollState::Idle,
            data: None,
            error: None,
            generation: 0,
        }
    }
}

struct ActivePoll {
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Owns the lifecycle of the single active analysis job.
///
/// `start` submits, then spawns one recurring polling task; ticks are
/// strictly sequential (the status check is awaited inside the tick).
/// Starting again cancels the previous task first and atomically replaces
/// the job slot, so a stale tick can never overwrite a newer job's state.
pub struct PollingController<A: JobApi> {
    api: Arc<A>,
    interval: Duration,
    snapshot: watch::Sender<AnalysisSnapshot>,
    active: Option<ActivePoll>,
    generation: u64,
}

impl<A: JobApi> PollingController<A> {
    pub fn new(api: A, interval: Duration) -> Self {
        let (snapshot, _) = watch::channel(AnalysisSnapshot::idle());
        Self {
            api: Arc::new(api),
            interval,
            snapshot,
            active: None,
            generation: 0,
        }
    }

    /// Current state of the job slot.
    pub fn snapshot(&self) -> AnalysisSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to state transitions. Each transition is published exactly
    /// once, in the order responses were processed.
    pub fn subscribe(&self) -> watch::Receiver<AnalysisSnapshot> {
        self.snapshot.subscribe()
    }

    /// Submit an analysis for `username` and begin polling its status.
    ///
    /// Any previous polling loop is cancelled before the new submission is
    /// issued. A submission failure short-circuits: the error is recorded in
    /// the snapshot and returned, and no polling starts.
    pub async fn start(&mut self, username: &str, options: &SubmitOptions) -> Result<()> {
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        self.snapshot.send_replace(AnalysisSnapshot {
            loading: true,
            state: PollState::Starting,
            data: None,
            error: None,
            generation,
        });

        let submission = match self.api.submit(username, options).await {
            Ok(submission) => submission,
            Err(e) => {
                self.snapshot.send_modify(|snap| {
                    snap.loading = false;
                    snap.state = PollState::Idle;
                    snap.error = Some(e.to_string());
                });
                return Err(e);
            }
        };

        debug!(
            "Job {} accepted for {username}, polling every {:?}",
            submission.job_id, self.interval
        );
        self.snapshot
            .send_modify(|snap| snap.state = PollState::Queued);

        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(poll_job(
            Arc::clone(&self.api),
            submission.job_id,
            self.interval,
            self.snapshot.clone(),
            Arc::clone(&cancelled),
            generation,
        ));
        self.active = Some(ActivePoll { cancelled, handle });

        Ok(())
    }

    /// Stop the active polling loop, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            // The flag is flipped while holding the watch lock, so a tick
            // that already passed its cancellation check cannot publish an
            // update after this call returns.
            self.snapshot.send_if_modified(|_| {
                active.cancelled.store(true, Ordering::SeqCst);
                false
            });
            active.handle.abort();
            debug!("Cancelled active polling task");
        }
    }
}

impl<A: JobApi> Drop for PollingController<A> {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn poll_job<A: JobApi>(
    api: Arc<A>,
    job_id: String,
    interval: Duration,
    snapshot: watch::Sender<AnalysisSnapshot>,
    cancelled: Arc<AtomicBool>,
    generation: u64,
) {
    let mut ticker = tokio::time::interval(interval);
    // A slow status check pushes the next tick back instead of letting ticks
    // bunch up; tick n+1 follows completion of tick n's processing.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick fires immediately; consume it so the first
    // status check happens one interval after submission.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if cancelled.load(Ordering::SeqCst) {
            return;
        }

        let update = api.check_status(&job_id).await;

        let mut terminal = true;
        let applied = snapshot.send_if_modified(|snap| {
            if snap.generation != generation || cancelled.load(Ordering::SeqCst) {
                return false;
            }

            match update {
                Ok(job) => match job.status {
                    JobStatus::Queued => {
                        snap.state = PollState::Queued;
                        terminal = false;
                    }
                    JobStatus::Started => {
                        snap.state = PollState::Started;
                        terminal = false;
                    }
                    JobStatus::Deferred => {
                        snap.state = PollState::Deferred;
                        terminal = false;
                    }
                    JobStatus::Unknown => {
                        // Tolerated: keep the last known state and try again.
                        debug!("Job {job_id} reported an unrecognized status");
                        terminal = false;
                        return false;
                    }
                    JobStatus::Finished => match job.result {
                        Some(report) => {
                            snap.data = Some(report);
                            snap.error = None;
                            snap.state = PollState::Finished;
                            snap.loading = false;
                        }
                        None => {
                            warn!("Job {job_id} finished without a result payload");
                            snap.error =
                                Some("analysis finished without a result payload".to_string());
                            snap.state = PollState::PollingError;
                            snap.loading = false;
                        }
                    },
                    JobStatus::Failed => {
                        snap.error = Some(
                            job.error
                                .unwrap_or_else(|| "analysis failed without detail".to_string()),
                        );
                        snap.state = PollState::Failed;
                        snap.loading = false;
                    }
                },
                Err(e) => {
                    warn!("Status check for job {job_id} failed: {e}");
                    snap.error = Some(e.to_string());
                    snap.state = PollState::PollingError;
                    snap.loading = false;
                }
            }
            true
        });

        if !applied && terminal {
            // Superseded by a newer start; nothing left to do.
            return;
        }
        if terminal {
            cancelled.store(true, Ordering::SeqCst);
            return;
        }
    }
}
