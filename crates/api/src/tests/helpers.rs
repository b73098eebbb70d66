// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rota_domain::{RotaRecord, Shift, ShiftPolicy};
use rota_persistence::{Persistence, PersistenceError};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    Color, CreateRotaRequest, FormSpec, Notifier, NotifyError, RotaCommands, RotaStore,
    SharedPersistence, ShiftScheduler,
};

/// Something a notifier was asked to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message {
        channel_id: String,
        text: String,
        color: Color,
    },
    Ephemeral {
        channel_id: String,
        user_id: String,
        text: String,
        color: Color,
    },
    Form {
        trigger_id: String,
        form: FormSpec,
    },
}

/// Records every delivery. When `failing`, deliveries are still recorded
/// but reported as failed.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Sent>>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn ephemerals(&self) -> Vec<(String, Color)> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Ephemeral { text, color, .. } => Some((text, color)),
                _ => None,
            })
            .collect()
    }

    pub fn forms(&self) -> Vec<FormSpec> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Form { form, .. } => Some(form),
                _ => None,
            })
            .collect()
    }

    fn record(&self, sent: Sent) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(sent);
        if self.failing {
            return Err(NotifyError::Transport(String::from("connection reset")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn post_message(
        &self,
        channel_id: &str,
        text: &str,
        color: Color,
    ) -> Result<String, NotifyError> {
        self.record(Sent::Message {
            channel_id: channel_id.to_string(),
            text: text.to_string(),
            color,
        })?;
        Ok(String::from("1700000000.000100"))
    }

    async fn post_ephemeral(
        &self,
        channel_id: &str,
        user_id: &str,
        text: &str,
        color: Color,
    ) -> Result<(), NotifyError> {
        self.record(Sent::Ephemeral {
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
            text: text.to_string(),
            color,
        })
    }

    async fn open_form(&self, trigger_id: &str, form: &FormSpec) -> Result<String, NotifyError> {
        self.record(Sent::Form {
            trigger_id: trigger_id.to_string(),
            form: form.clone(),
        })?;
        Ok(String::from("V123"))
    }
}

/// Wraps a real store, counting writes and optionally failing the shift
/// writes of one rota or returning canned scan results.
pub struct TestStore {
    inner: SharedPersistence,
    writes: AtomicUsize,
    fail_shift_writes_for: Option<String>,
    canned_scan: Option<Vec<RotaRecord>>,
}

impl Default for TestStore {
    fn default() -> Self {
        Self {
            inner: SharedPersistence::with_timeout(
                Persistence::new_in_memory().unwrap(),
                Duration::from_secs(5),
            ),
            writes: AtomicUsize::new(0),
            fail_shift_writes_for: None,
            canned_scan: None,
        }
    }
}

impl TestStore {
    pub fn failing_shift_writes_for(rota_name: &str) -> Self {
        Self {
            fail_shift_writes_for: Some(rota_name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_canned_scan(records: Vec<RotaRecord>) -> Self {
        Self {
            canned_scan: Some(records),
            ..Self::default()
        }
    }

    /// Writes a shift straight to the wrapped store, bypassing failure
    /// injection and the write counter.
    pub async fn seed_shift(&self, channel_id: &str, rota_name: &str, shift: &Shift) {
        self.inner
            .update_shift(channel_id, rota_name, Some(shift))
            .await
            .unwrap();
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_shift_write(&self, rota_name: &str) -> Result<(), PersistenceError> {
        if self.fail_shift_writes_for.as_deref() == Some(rota_name) {
            return Err(PersistenceError::DatabaseError(String::from(
                "disk I/O error",
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RotaStore for TestStore {
    async fn get(
        &self,
        channel_id: &str,
        rota_name: &str,
    ) -> Result<Option<RotaRecord>, PersistenceError> {
        self.inner.get(channel_id, rota_name).await
    }

    async fn list_names(&self, channel_id: &str) -> Result<Vec<String>, PersistenceError> {
        self.inner.list_names(channel_id).await
    }

    async fn put(
        &self,
        channel_id: &str,
        rota_name: &str,
        members: &[String],
        duration_weeks: u32,
    ) -> Result<(), PersistenceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner
            .put(channel_id, rota_name, members, duration_weeks)
            .await
    }

    async fn update_shift(
        &self,
        channel_id: &str,
        rota_name: &str,
        shift: Option<&Shift>,
    ) -> Result<(), PersistenceError> {
        self.check_shift_write(rota_name)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update_shift(channel_id, rota_name, shift).await
    }

    async fn update_shift_if(
        &self,
        channel_id: &str,
        rota_name: &str,
        expected: Option<&Shift>,
        new_shift: Option<&Shift>,
    ) -> Result<bool, PersistenceError> {
        self.check_shift_write(rota_name)?;
        let applied: bool = self
            .inner
            .update_shift_if(channel_id, rota_name, expected, new_shift)
            .await?;
        if applied {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(applied)
    }

    async fn scan_expired_shifts(
        &self,
        now: OffsetDateTime,
    ) -> Result<Vec<RotaRecord>, PersistenceError> {
        if let Some(records) = &self.canned_scan {
            return Ok(records.clone());
        }
        self.inner.scan_expired_shifts(now).await
    }
}

pub struct TestHarness {
    pub commands: RotaCommands,
    pub scheduler: ShiftScheduler,
    pub store: Arc<TestStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn create_test_harness() -> TestHarness {
    create_test_harness_with(TestStore::default(), RecordingNotifier::default())
}

pub fn create_test_harness_with(store: TestStore, notifier: RecordingNotifier) -> TestHarness {
    let store: Arc<TestStore> = Arc::new(store);
    let notifier: Arc<RecordingNotifier> = Arc::new(notifier);
    let commands: RotaCommands =
        RotaCommands::new(store.clone(), notifier.clone(), ShiftPolicy::Weekly);
    let scheduler: ShiftScheduler = ShiftScheduler::new(
        store.clone(),
        notifier.clone(),
        ShiftPolicy::Weekly,
        Duration::from_millis(10),
    );
    TestHarness {
        commands,
        scheduler,
        store,
        notifier,
    }
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-03-02 09:00 UTC)
}

pub fn create_test_request(members: &[&str], duration_weeks: u32) -> CreateRotaRequest {
    CreateRotaRequest {
        channel_id: String::from("C1"),
        user_id: String::from("creator"),
        rota_name: String::from("R1"),
        members: members.iter().map(|m| (*m).to_string()).collect(),
        duration_weeks,
    }
}

/// Creates `C1/R1` with the given members. The creation counts as one write
/// and one ephemeral message.
pub async fn create_test_rota(harness: &TestHarness, members: &[&str], duration_weeks: u32) {
    harness
        .commands
        .create_rota(&create_test_request(members, duration_weeks), create_test_now())
        .await
        .unwrap();
}
