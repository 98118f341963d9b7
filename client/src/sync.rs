//! Recurring snapshot synchronization with the inference backend.
//!
//! A single spawned task owns the [`Snapshot`] and republishes it through a
//! `watch` channel, so readers always observe a complete snapshot from one
//! refresh cycle, never a partially-updated one. Each cycle fans out the
//! three fetches concurrently and joins them before acting:
//!
//! - a logs failure degrades to an empty log list and the cycle proceeds;
//! - a hypotheses or entropy failure aborts the cycle without touching the
//!   previously-published snapshot (stale-but-valid), logged on the
//!   observability side-channel and never surfaced to the trigger;
//! - a cycle that completes after teardown discards its result.
//!
//! Teardown is cooperative and idempotent: `shutdown()` may be called any
//! number of times, and in-flight requests are never forcibly aborted.

use std::sync::Arc;

use echoform_protocol::EntropyStatus;
use echoform_protocol::Hypothesis;
use tokio::sync::mpsc;
use tokio::sync::watch;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::warn;

use crate::api::InferenceBackend;
use crate::config::ClientConfig;
use crate::stability::UNSTABLE_BELOW;

/// The authoritative in-memory view of the backend state. Created empty at
/// startup and replaced wholesale on each successful refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub hypotheses: Vec<Hypothesis>,
    pub entropy: Option<EntropyStatus>,
    pub logs: Vec<String>,
}

impl Snapshot {
    pub fn stats(&self) -> SnapshotStats {
        SnapshotStats::from_hypotheses(&self.hypotheses)
    }
}

/// Aggregates derived from a snapshot. Recomputed from the raw hypothesis
/// list every time, never cached, so they cannot drift from the snapshot
/// they describe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotStats {
    pub hypothesis_count: usize,
    pub total_signals: usize,
    pub mean_confidence: f64,
    /// Mean volatility with absent values counted as zero.
    pub mean_volatility: f64,
}

impl SnapshotStats {
    pub fn from_hypotheses(hypotheses: &[Hypothesis]) -> Self {
        let hypothesis_count = hypotheses.len();
        let total_signals = hypotheses.iter().map(Hypothesis::signal_count).sum();
        let (mean_confidence, mean_volatility) = if hypothesis_count == 0 {
            (0.0, 0.0)
        } else {
            let confidence: f64 = hypotheses.iter().map(|h| h.confidence_score).sum();
            let volatility: f64 = hypotheses.iter().filter_map(|h| h.volatility).sum();
            (
                confidence / hypothesis_count as f64,
                volatility / hypothesis_count as f64,
            )
        };
        Self {
            hypothesis_count,
            total_signals,
            mean_confidence,
            mean_volatility,
        }
    }

    /// Mean confidence rendered to two decimals (`"0.00"` when the
    /// hypothesis set is empty).
    pub fn confidence_display(&self) -> String {
        format!("{:.2}", self.mean_confidence)
    }

    /// Global advisory: mean volatility strictly above the unstable
    /// threshold. A derived boolean, re-evaluated per snapshot.
    pub fn high_volatility(&self) -> bool {
        self.mean_volatility > UNSTABLE_BELOW
    }
}

/// Cheap handle for requesting an out-of-band refresh, e.g. right after a
/// successful entry submission. Best-effort: if a refresh request is
/// already queued, another one is redundant and is dropped.
#[derive(Debug, Clone)]
pub struct RefreshNudge {
    tx: mpsc::Sender<()>,
}

impl RefreshNudge {
    pub fn request(&self) {
        let _ = self.tx.try_send(());
    }

    #[cfg(test)]
    pub(crate) fn test_pair() -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        (Self { tx }, rx)
    }
}

/// Owner-side handle to a spawned sync task.
#[derive(Debug)]
pub struct SyncHandle {
    snapshot_rx: watch::Receiver<Snapshot>,
    nudge: RefreshNudge,
    cancel: CancellationToken,
}

impl SyncHandle {
    /// Current snapshot, cloned out of the watch slot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// A receiver that observes every snapshot replacement.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    pub fn nudge(&self) -> RefreshNudge {
        self.nudge.clone()
    }

    /// Request a refresh without waiting for the next periodic tick.
    pub fn refresh_now(&self) {
        self.nudge.request();
    }

    /// Stop the recurring refresh. Unconditional and idempotent; a refresh
    /// already in flight will discard its result instead of publishing.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

pub struct SyncService;

impl SyncService {
    /// Spawn the recurring refresh task. The first refresh runs
    /// immediately; subsequent ones follow the configured cadence or an
    /// out-of-band nudge. Must be called within a tokio runtime.
    pub fn spawn(backend: Arc<dyn InferenceBackend>, config: ClientConfig) -> SyncHandle {
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::default());
        let (nudge_tx, nudge_rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        tokio::spawn(run_sync_loop(
            backend,
            config,
            snapshot_tx,
            nudge_rx,
            cancel.clone(),
        ));
        SyncHandle {
            snapshot_rx,
            nudge: RefreshNudge { tx: nudge_tx },
            cancel,
        }
    }
}

async fn run_sync_loop(
    backend: Arc<dyn InferenceBackend>,
    config: ClientConfig,
    snapshot_tx: watch::Sender<Snapshot>,
    mut nudge_rx: mpsc::Receiver<()>,
    cancel: CancellationToken,
) {
    let mut ticker = interval(config.refresh_interval);
    // The interval's first tick completes immediately and doubles as the
    // startup refresh.
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
            nudge = nudge_rx.recv() => {
                // All handles dropped: treat like teardown.
                if nudge.is_none() {
                    break;
                }
            }
        }
        refresh_once(backend.as_ref(), &config, &snapshot_tx, &cancel).await;
    }
    debug!("sync loop stopped");
}

/// One refresh cycle. Never returns an error: every failure mode is either
/// degraded (logs) or logged and dropped (hypotheses/entropy).
async fn refresh_once(
    backend: &dyn InferenceBackend,
    config: &ClientConfig,
    snapshot_tx: &watch::Sender<Snapshot>,
    cancel: &CancellationToken,
) {
    let (dashboard, entropy, logs) = tokio::join!(
        backend.fetch_dashboard(),
        backend.fetch_entropy(),
        backend.fetch_logs(config.log_limit),
    );

    let logs = match logs {
        Ok(page) => page.logs,
        Err(err) => {
            warn!("inference log fetch failed, continuing without logs: {err}");
            Vec::new()
        }
    };

    let (dashboard, entropy) = match (dashboard, entropy) {
        (Ok(dashboard), Ok(entropy)) => (dashboard, entropy),
        (dashboard, entropy) => {
            if let Err(err) = dashboard {
                warn!("dashboard fetch failed, keeping previous snapshot: {err}");
            }
            if let Err(err) = entropy {
                warn!("entropy fetch failed, keeping previous snapshot: {err}");
            }
            return;
        }
    };

    if cancel.is_cancelled() {
        // The view tore down while the requests were in flight.
        return;
    }

    let _ = snapshot_tx.send(Snapshot {
        hypotheses: dashboard.hypotheses,
        entropy: Some(entropy),
        logs,
    });
}
