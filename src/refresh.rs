//! Periodic badge refresh.
//!
//! Status badges and the coverage badge poll on separate intervals. Each tick
//! spawns a refresh task per badge group, so a slow cycle can overlap the next
//! one; readings are published into a `watch` channel as they arrive and the
//! latest write wins. In-flight requests are never cancelled by a new tick.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

use crate::badge::{BadgeFetcher, BadgeKind, BadgeReader, BadgeTarget, BadgeValue, ParserOptions};

/// Latest value read for one badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeReading {
    pub kind: BadgeKind,
    pub value: BadgeValue,
    pub link_url: String,
    pub fetched_at: DateTime<Utc>,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub readings: BTreeMap<BadgeKind, BadgeReading>,
    /// Completed refresh passes (one per badge group per tick).
    pub cycles: u64,
}

impl DashboardSnapshot {
    pub fn get(&self, kind: BadgeKind) -> Option<&BadgeReading> {
        self.readings.get(&kind)
    }
}

/// Shortest polling period; `tokio::time::interval` rejects zero.
const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
pub struct RefreshIntervals {
    pub status: Duration,
    pub coverage: Duration,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            status: Duration::from_secs(60),
            coverage: Duration::from_secs(300),
        }
    }
}

impl RefreshIntervals {
    fn clamped(self) -> Self {
        Self {
            status: self.status.max(MIN_INTERVAL),
            coverage: self.coverage.max(MIN_INTERVAL),
        }
    }
}

pub struct RefreshScheduler<F> {
    reader: Arc<BadgeReader<F>>,
    targets: Vec<BadgeTarget>,
    intervals: RefreshIntervals,
    tx: Arc<watch::Sender<DashboardSnapshot>>,
}

impl<F: BadgeFetcher + 'static> RefreshScheduler<F> {
    pub fn new(
        fetcher: F,
        targets: Vec<BadgeTarget>,
        intervals: RefreshIntervals,
        options: ParserOptions,
    ) -> Self {
        let (tx, _rx) = watch::channel(DashboardSnapshot::default());
        Self {
            reader: Arc::new(BadgeReader::new(fetcher, options)),
            targets,
            intervals: intervals.clamped(),
            tx: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.tx.borrow().clone()
    }

    /// Refresh every target once and return the resulting snapshot.
    pub async fn run_cycle(&self) -> DashboardSnapshot {
        refresh_targets(&self.reader, &self.tx, &self.targets).await;
        self.snapshot()
    }

    /// Poll until `shutdown` resolves, then wait for in-flight refreshes.
    pub async fn run_until<S>(&self, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        let mut status_tick = tokio::time::interval(self.intervals.status);
        let mut coverage_tick = tokio::time::interval(self.intervals.coverage);
        status_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        coverage_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut inflight = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = status_tick.tick() => {
                    self.spawn_group(&mut inflight, |kind| kind.is_status());
                }
                _ = coverage_tick.tick() => {
                    self.spawn_group(&mut inflight, |kind| !kind.is_status());
                }
                Some(joined) = inflight.join_next(), if !inflight.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!(error = %e, "badge refresh task panicked");
                    }
                }
            }
        }

        tracing::debug!(pending = inflight.len(), "waiting for in-flight refreshes");
        while let Some(joined) = inflight.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "badge refresh task panicked");
            }
        }
    }

    fn spawn_group(&self, inflight: &mut JoinSet<()>, in_group: fn(BadgeKind) -> bool) {
        let targets: Vec<BadgeTarget> = self
            .targets
            .iter()
            .filter(|target| in_group(target.kind))
            .cloned()
            .collect();
        if targets.is_empty() {
            return;
        }

        let reader = Arc::clone(&self.reader);
        let tx = Arc::clone(&self.tx);
        inflight.spawn(async move {
            refresh_targets(&reader, &tx, &targets).await;
        });
    }
}

async fn refresh_targets<F: BadgeFetcher>(
    reader: &BadgeReader<F>,
    tx: &watch::Sender<DashboardSnapshot>,
    targets: &[BadgeTarget],
) {
    let started = std::time::Instant::now();
    futures::future::join_all(targets.iter().map(|target| async move {
        let value = reader.read(target).await;
        tracing::debug!(kind = %target.kind, ?value, "badge refreshed");
        publish(
            tx,
            BadgeReading {
                kind: target.kind,
                value,
                link_url: target.link_url.clone(),
                fetched_at: Utc::now(),
            },
        );
    }))
    .await;

    tx.send_modify(|snapshot| snapshot.cycles += 1);
    tracing::info!(
        badges = targets.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "refresh cycle complete"
    );
}

fn publish(tx: &watch::Sender<DashboardSnapshot>, reading: BadgeReading) {
    tx.send_modify(|snapshot| {
        snapshot.readings.insert(reading.kind, reading);
    });
}
