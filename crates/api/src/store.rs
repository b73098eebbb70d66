// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage seam shared by the command handlers and the scheduler.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rota::{Change, TransitionResult};
use rota_domain::{RotaRecord, Shift};
use rota_persistence::{Persistence, PersistenceError};
use time::OffsetDateTime;

/// Default bound on a single storage call.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Durable access to rota records keyed by `(channel_id, rota_name)`.
///
/// Implementations must be safe to call concurrently from the request path
/// and the scheduler.
#[async_trait::async_trait]
pub trait RotaStore: Send + Sync {
    /// Reads one rota. `Ok(None)` if it does not exist.
    async fn get(
        &self,
        channel_id: &str,
        rota_name: &str,
    ) -> Result<Option<RotaRecord>, PersistenceError>;

    /// Lists the rota names of a channel.
    async fn list_names(&self, channel_id: &str) -> Result<Vec<String>, PersistenceError>;

    /// Upserts the configuration fields of a rota. Never touches its shift.
    async fn put(
        &self,
        channel_id: &str,
        rota_name: &str,
        members: &[String],
        duration_weeks: u32,
    ) -> Result<(), PersistenceError>;

    /// Overwrites the shift fields of a rota. `None` clears them.
    async fn update_shift(
        &self,
        channel_id: &str,
        rota_name: &str,
        shift: Option<&Shift>,
    ) -> Result<(), PersistenceError>;

    /// Overwrites the shift fields only if the stored shift equals
    /// `expected`. Returns whether the write was applied.
    async fn update_shift_if(
        &self,
        channel_id: &str,
        rota_name: &str,
        expected: Option<&Shift>,
        new_shift: Option<&Shift>,
    ) -> Result<bool, PersistenceError>;

    /// Every rota whose shift end is at or before `now`.
    async fn scan_expired_shifts(
        &self,
        now: OffsetDateTime,
    ) -> Result<Vec<RotaRecord>, PersistenceError>;
}

/// Writes a transition back to the store.
///
/// Configuration changes are unconditional upserts. Shift changes are
/// conditional on the shift the transition was computed from. Returns
/// `false` if a conditional write lost a race.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn persist_transition(
    store: &dyn RotaStore,
    result: &TransitionResult,
) -> Result<bool, PersistenceError> {
    let record: &RotaRecord = &result.record;
    match &result.change {
        Change::Configuration => {
            store
                .put(
                    &record.channel_id,
                    &record.rota_name,
                    &record.members,
                    record.duration_weeks,
                )
                .await?;
            Ok(true)
        }
        Change::Shift { expected } => {
            store
                .update_shift_if(
                    &record.channel_id,
                    &record.rota_name,
                    expected.as_ref(),
                    record.shift.as_ref(),
                )
                .await
        }
    }
}

/// A `RotaStore` over a single sqlite `Persistence`.
///
/// Diesel calls block, so every call runs on the blocking pool behind a
/// mutex and is abandoned with `PersistenceError::Timeout` once it exceeds
/// the configured bound.
#[derive(Clone)]
pub struct SharedPersistence {
    inner: Arc<Mutex<Persistence>>,
    timeout: Duration,
}

impl SharedPersistence {
    /// Wraps a persistence adapter with the default timeout.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self::with_timeout(persistence, DEFAULT_STORAGE_TIMEOUT)
    }

    /// Wraps a persistence adapter with an explicit per-call timeout.
    #[must_use]
    pub fn with_timeout(persistence: Persistence, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(persistence)),
            timeout,
        }
    }

    async fn call<T, F>(&self, operation: &'static str, f: F) -> Result<T, PersistenceError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Persistence) -> Result<T, PersistenceError> + Send + 'static,
    {
        let inner: Arc<Mutex<Persistence>> = Arc::clone(&self.inner);
        let task = tokio::task::spawn_blocking(move || {
            let mut guard = inner.lock().map_err(|_| PersistenceError::LockPoisoned)?;
            f(&mut guard)
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(PersistenceError::DatabaseError(format!(
                "{operation} task failed: {join_err}"
            ))),
            Err(_) => Err(PersistenceError::Timeout {
                operation: operation.to_string(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

#[async_trait::async_trait]
impl RotaStore for SharedPersistence {
    async fn get(
        &self,
        channel_id: &str,
        rota_name: &str,
    ) -> Result<Option<RotaRecord>, PersistenceError> {
        let channel_id: String = channel_id.to_string();
        let rota_name: String = rota_name.to_string();
        self.call("get", move |p| p.get_rota(&channel_id, &rota_name))
            .await
    }

    async fn list_names(&self, channel_id: &str) -> Result<Vec<String>, PersistenceError> {
        let channel_id: String = channel_id.to_string();
        self.call("list_names", move |p| p.list_rota_names(&channel_id))
            .await
    }

    async fn put(
        &self,
        channel_id: &str,
        rota_name: &str,
        members: &[String],
        duration_weeks: u32,
    ) -> Result<(), PersistenceError> {
        let channel_id: String = channel_id.to_string();
        let rota_name: String = rota_name.to_string();
        let members: Vec<String> = members.to_vec();
        self.call("put", move |p| {
            p.put_rota(&channel_id, &rota_name, &members, duration_weeks)
        })
        .await
    }

    async fn update_shift(
        &self,
        channel_id: &str,
        rota_name: &str,
        shift: Option<&Shift>,
    ) -> Result<(), PersistenceError> {
        let channel_id: String = channel_id.to_string();
        let rota_name: String = rota_name.to_string();
        let shift: Option<Shift> = shift.cloned();
        self.call("update_shift", move |p| {
            p.update_shift(&channel_id, &rota_name, shift.as_ref())
        })
        .await
    }

    async fn update_shift_if(
        &self,
        channel_id: &str,
        rota_name: &str,
        expected: Option<&Shift>,
        new_shift: Option<&Shift>,
    ) -> Result<bool, PersistenceError> {
        let channel_id: String = channel_id.to_string();
        let rota_name: String = rota_name.to_string();
        let expected: Option<Shift> = expected.cloned();
        let new_shift: Option<Shift> = new_shift.cloned();
        self.call("update_shift_if", move |p| {
            p.update_shift_if(
                &channel_id,
                &rota_name,
                expected.as_ref(),
                new_shift.as_ref(),
            )
        })
        .await
    }

    async fn scan_expired_shifts(
        &self,
        now: OffsetDateTime,
    ) -> Result<Vec<RotaRecord>, PersistenceError> {
        self.call("scan_expired_shifts", move |p| p.scan_expired_shifts(now))
            .await
    }
}
