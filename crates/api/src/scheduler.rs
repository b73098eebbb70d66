// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The shift scheduler.
//!
//! One task for the whole process periodically scans for expired shifts and
//! hands each one over to the next member. Candidates are independent: a
//! failure on one is logged and the sweep moves on.

use std::sync::Arc;
use std::time::Duration;

use rota::{Advance, CoreError, TransitionResult, advance_shift};
use rota_domain::{RotaRecord, ShiftPolicy};
use time::OffsetDateTime;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, warn};

use crate::messages;
use crate::notifier::{Color, Notifier};
use crate::store::{RotaStore, persist_transition};

/// Default time between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// What a single sweep did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Whether the expired-shift scan itself failed.
    pub scan_failed: bool,
    /// Rotas returned by the scan.
    pub candidates: usize,
    /// Rotas handed over to the next member.
    pub advanced: usize,
    /// Rotas whose on-call member is no longer in the rota.
    pub stuck: usize,
    /// Rotas whose shift changed between the scan and the write.
    pub skipped: usize,
    /// Rotas that could not be advanced because of an error.
    pub failed: usize,
    /// Hand-overs whose announcement could not be delivered.
    pub notify_failures: usize,
}

/// Periodically advances expired shifts.
pub struct ShiftScheduler {
    store: Arc<dyn RotaStore>,
    notifier: Arc<dyn Notifier>,
    policy: ShiftPolicy,
    interval: Duration,
}

impl ShiftScheduler {
    /// Creates a scheduler that sweeps every `interval`.
    #[must_use]
    pub fn new(
        store: Arc<dyn RotaStore>,
        notifier: Arc<dyn Notifier>,
        policy: ShiftPolicy,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            notifier,
            policy,
            interval,
        }
    }

    /// Runs sweeps until `shutdown` turns `true` or its sender is dropped.
    ///
    /// Shutdown is only observed between sweeps, so a sweep in progress
    /// always finishes its candidate list.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(interval = ?self.interval, "Starting shift scheduler");

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once(OffsetDateTime::now_utc()).await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!("Shift scheduler stopped");
    }

    /// Runs one sweep as of `now`.
    pub async fn sweep_once(&self, now: OffsetDateTime) -> SweepReport {
        let mut report: SweepReport = SweepReport::default();

        let candidates: Vec<RotaRecord> = match self.store.scan_expired_shifts(now).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Failed to scan for expired shifts");
                report.scan_failed = true;
                return report;
            }
        };

        report.candidates = candidates.len();
        if candidates.is_empty() {
            debug!("No expired shifts");
            return report;
        }
        info!(count = candidates.len(), "Found expired shifts");

        for record in &candidates {
            self.advance_one(record, now, &mut report).await;
        }

        report
    }

    async fn advance_one(
        &self,
        record: &RotaRecord,
        now: OffsetDateTime,
        report: &mut SweepReport,
    ) {
        let advance: Result<Advance, CoreError> = advance_shift(record, &self.policy, now);

        let result: TransitionResult = match advance {
            Ok(Advance::Advanced(result)) => result,
            Ok(Advance::NotDue) => {
                debug!(
                    channel_id = %record.channel_id,
                    rota_name = %record.rota_name,
                    "Shift not due"
                );
                return;
            }
            Ok(Advance::Stuck { on_call_member }) => {
                warn!(
                    channel_id = %record.channel_id,
                    rota_name = %record.rota_name,
                    on_call_member = %on_call_member,
                    "On-call member is no longer in the rota; shift cannot advance"
                );
                report.stuck += 1;
                return;
            }
            Err(e) => {
                error!(
                    channel_id = %record.channel_id,
                    rota_name = %record.rota_name,
                    error = %e,
                    "Failed to compute next shift"
                );
                report.failed += 1;
                return;
            }
        };

        match persist_transition(self.store.as_ref(), &result).await {
            Ok(true) => {}
            Ok(false) => {
                info!(
                    channel_id = %record.channel_id,
                    rota_name = %record.rota_name,
                    "Shift changed since the scan; skipping"
                );
                report.skipped += 1;
                return;
            }
            Err(e) => {
                error!(
                    channel_id = %record.channel_id,
                    rota_name = %record.rota_name,
                    error = %e,
                    "Could not update on-call shift"
                );
                report.failed += 1;
                return;
            }
        }

        let next: &str = result.record.on_call_member().unwrap_or_default();
        report.advanced += 1;
        info!(
            channel_id = %record.channel_id,
            rota_name = %record.rota_name,
            on_call_member = next,
            "Advanced shift"
        );

        if let Err(e) = self
            .notifier
            .post_message(
                &record.channel_id,
                &messages::now_on_duty(&record.rota_name, next),
                Color::Success,
            )
            .await
        {
            warn!(
                channel_id = %record.channel_id,
                rota_name = %record.rota_name,
                error = %e,
                "Failed to announce new on-call member"
            );
            report.notify_failures += 1;
        }
    }
}
