// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command handlers.
//!
//! Each handler reads the rota it needs, applies the pure core transition,
//! writes the result back and then notifies. A notification failure is
//! logged and never undoes the write.

use std::sync::Arc;

use rota::{Command, RotaKey, TransitionResult, apply};
use rota_domain::{RotaRecord, Shift, ShiftPolicy, validate_can_start};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::error::{
    ApiError, shift_changed_concurrently, start_form_expired, translate_core_error,
};
use crate::messages;
use crate::notifier::{Color, FormKind, FormSpec, Notifier};
use crate::request_response::{
    CreateRotaRequest, RotaDetails, StartRotaRequest, UpdateRotaRequest,
};
use crate::store::{RotaStore, persist_transition};
use crate::token::FormToken;

/// Handlers for every user-initiated rota action.
///
/// Holds no rota state of its own; everything mutable lives in the store.
#[derive(Clone)]
pub struct RotaCommands {
    store: Arc<dyn RotaStore>,
    notifier: Arc<dyn Notifier>,
    policy: ShiftPolicy,
}

impl RotaCommands {
    /// Creates the handlers over the given collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn RotaStore>,
        notifier: Arc<dyn Notifier>,
        policy: ShiftPolicy,
    ) -> Self {
        Self {
            store,
            notifier,
            policy,
        }
    }

    /// The notifier rejections are reported through.
    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Creates a rota and shows its details to the creator.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A rota with this name already exists in the channel
    /// - The name or duration is invalid
    /// - The store fails
    pub async fn create_rota(
        &self,
        request: &CreateRotaRequest,
        now: OffsetDateTime,
    ) -> Result<RotaDetails, ApiError> {
        let key: RotaKey = RotaKey::new(request.channel_id.clone(), request.rota_name.clone());
        let existing: Option<RotaRecord> = self.load(&key).await?;

        let result: TransitionResult = apply_command(
            &key,
            existing.as_ref(),
            Command::CreateRota {
                members: request.members.clone(),
                duration_weeks: request.duration_weeks,
            },
        )?;

        persist_transition(self.store.as_ref(), &result).await?;
        info!(
            channel_id = %key.channel_id,
            rota_name = %key.rota_name,
            user_id = %request.user_id,
            "Created rota"
        );

        let details: RotaDetails = RotaDetails::from_record(&result.record, now);
        self.ephemeral(
            &key,
            &request.user_id,
            &messages::rota_details(&details),
            Color::Success,
        )
        .await;
        Ok(details)
    }

    /// Replaces a rota's members and duration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The rota does not exist
    /// - A shift is running
    /// - The duration is invalid
    /// - The store fails
    pub async fn update_rota(
        &self,
        request: &UpdateRotaRequest,
        now: OffsetDateTime,
    ) -> Result<RotaDetails, ApiError> {
        let key: RotaKey = RotaKey::new(request.channel_id.clone(), request.rota_name.clone());
        let existing: Option<RotaRecord> = self.load(&key).await?;

        let result: TransitionResult = apply_command(
            &key,
            existing.as_ref(),
            Command::UpdateRota {
                members: request.members.clone(),
                duration_weeks: request.duration_weeks,
            },
        )?;

        persist_transition(self.store.as_ref(), &result).await?;
        info!(
            channel_id = %key.channel_id,
            rota_name = %key.rota_name,
            user_id = %request.user_id,
            members = result.record.members.len(),
            duration_weeks = result.record.duration_weeks,
            "Updated rota"
        );

        let details: RotaDetails = RotaDetails::from_record(&result.record, now);
        self.ephemeral(
            &key,
            &request.user_id,
            &messages::rota_details(&details),
            Color::Success,
        )
        .await;
        Ok(details)
    }

    /// Opens an empty create form.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be encoded or the form cannot be
    /// opened.
    pub async fn create_prompt(
        &self,
        channel_id: &str,
        trigger_id: &str,
    ) -> Result<String, ApiError> {
        let form: FormSpec = FormSpec {
            kind: FormKind::CreateRota,
            title: String::from("Create a new rota"),
            rota_name: None,
            members: Vec::new(),
            duration_weeks: None,
            note: None,
            token: FormToken::for_rota(channel_id, "").encode()?,
        };
        self.open_form(trigger_id, &form).await
    }

    /// Opens the update form with the current configuration preselected.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The rota does not exist
    /// - A shift is running
    /// - The store fails or the form cannot be opened
    pub async fn update_prompt(
        &self,
        channel_id: &str,
        rota_name: &str,
        trigger_id: &str,
    ) -> Result<String, ApiError> {
        let key: RotaKey = RotaKey::new(channel_id, rota_name);
        let record: RotaRecord = self.require(&key).await?;

        if record.is_running() {
            return Err(translate_core_error(
                channel_id,
                rota::CoreError::UpdateWhileRunning {
                    rota_name: key.rota_name.clone(),
                },
            ));
        }

        let form: FormSpec = FormSpec {
            kind: FormKind::UpdateRota,
            title: format!("Update {}", key.rota_name),
            rota_name: Some(key.rota_name.clone()),
            members: record.members.clone(),
            duration_weeks: Some(record.duration_weeks),
            note: None,
            token: FormToken::for_rota(channel_id, key.rota_name.clone()).encode()?,
        };
        self.open_form(trigger_id, &form).await
    }

    // ========================================================================
    // Shift lifecycle
    // ========================================================================

    /// Validates that the rota can start and opens the start form.
    ///
    /// The shift times are fixed now and carried in the form token, so the
    /// shift that begins on submission is the one the form showed.
    ///
    /// # Errors
    ///
    /// Returns an error if the rota does not exist, cannot start, or the
    /// form cannot be opened.
    pub async fn start_rota_prompt(
        &self,
        channel_id: &str,
        rota_name: &str,
        trigger_id: &str,
        now: OffsetDateTime,
    ) -> Result<String, ApiError> {
        let key: RotaKey = RotaKey::new(channel_id, rota_name);
        let record: RotaRecord = self.require(&key).await?;

        validate_can_start(&record).map_err(|e| translate_core_error(channel_id, e.into()))?;

        let end: OffsetDateTime = self
            .policy
            .end_of_shift(now, record.duration_weeks)
            .map_err(|e| translate_core_error(channel_id, e.into()))?;

        let form: FormSpec = FormSpec {
            kind: FormKind::StartRota,
            title: format!("Start {}", key.rota_name),
            rota_name: Some(key.rota_name.clone()),
            members: record.members.clone(),
            duration_weeks: Some(record.duration_weeks),
            note: Some(messages::shift_will_end(end)),
            token: FormToken::for_pending_shift(channel_id, key.rota_name.clone(), now, end)
                .encode()?,
        };
        self.open_form(trigger_id, &form).await
    }

    /// Starts a shift for the chosen member, beginning at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The rota does not exist
    /// - The rota is empty, has no duration, or is already running
    /// - The chosen member is not in the rota
    /// - Another shift was started concurrently
    /// - The store fails
    pub async fn start_rota(
        &self,
        request: &StartRotaRequest,
        now: OffsetDateTime,
    ) -> Result<RotaDetails, ApiError> {
        let key: RotaKey = RotaKey::new(request.channel_id.clone(), request.rota_name.clone());
        let record: RotaRecord = self.require(&key).await?;

        let shift: Shift = self
            .policy
            .begin(request.on_call_member.clone(), now, record.duration_weeks)
            .map_err(|e| translate_core_error(&key.channel_id, e.into()))?;

        self.begin_shift(&key, &record, shift, &request.user_id, now)
            .await
    }

    /// Completes a start form submission.
    ///
    /// The rota is re-read and re-validated. The shift starts when the form
    /// was opened and its end follows the rota's current duration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The token is invalid or carries no shift times
    /// - The shift would already have ended at `now`
    /// - Any reason `start_rota` would fail
    pub async fn complete_start(
        &self,
        token: &str,
        user_id: &str,
        on_call_member: &str,
        now: OffsetDateTime,
    ) -> Result<RotaDetails, ApiError> {
        let token: FormToken = FormToken::decode(token)?;
        let Some((start, _)) = token.pending_shift()? else {
            return Err(ApiError::InvalidInput {
                field: String::from("token"),
                message: String::from("Start form token carries no shift times"),
            });
        };

        let key: RotaKey = RotaKey::new(token.channel_id, token.rota_name);
        let record: RotaRecord = self.require(&key).await?;
        validate_can_start(&record)
            .map_err(|e| translate_core_error(&key.channel_id, e.into()))?;

        let shift: Shift = self
            .policy
            .begin(on_call_member, start, record.duration_weeks)
            .map_err(|e| translate_core_error(&key.channel_id, e.into()))?;
        if shift.end <= now {
            warn!(
                channel_id = %key.channel_id,
                rota_name = %key.rota_name,
                user_id,
                "Start form submitted after its shift would have ended"
            );
            return Err(start_form_expired(&key.rota_name));
        }

        self.begin_shift(&key, &record, shift, user_id, now).await
    }

    /// Stops the running shift.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The rota does not exist
    /// - No shift is running
    /// - The shift changed concurrently
    /// - The store fails
    pub async fn stop_rota(
        &self,
        channel_id: &str,
        user_id: &str,
        rota_name: &str,
        now: OffsetDateTime,
    ) -> Result<RotaDetails, ApiError> {
        let key: RotaKey = RotaKey::new(channel_id, rota_name);
        let existing: Option<RotaRecord> = self.load(&key).await?;

        let result: TransitionResult = apply_command(&key, existing.as_ref(), Command::StopShift)?;

        if !persist_transition(self.store.as_ref(), &result).await? {
            warn!(
                channel_id = %key.channel_id,
                rota_name = %key.rota_name,
                "Shift changed before it could be stopped"
            );
            return Err(shift_changed_concurrently(&key.rota_name));
        }

        info!(
            channel_id = %key.channel_id,
            rota_name = %key.rota_name,
            user_id,
            "Stopped shift"
        );
        self.announce(&key, &messages::shift_stopped(&key.rota_name))
            .await;

        Ok(RotaDetails::from_record(&result.record, now))
    }

    // ========================================================================
    // Read-only projections
    // ========================================================================

    /// Lists the rota names of a channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_rota_names(&self, channel_id: &str) -> Result<Vec<String>, ApiError> {
        Ok(self.store.list_names(channel_id).await?)
    }

    /// Returns the details of a rota as seen at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rota does not exist or the store fails.
    pub async fn get_rota_details(
        &self,
        channel_id: &str,
        rota_name: &str,
        now: OffsetDateTime,
    ) -> Result<RotaDetails, ApiError> {
        let record: RotaRecord = self.require(&RotaKey::new(channel_id, rota_name)).await?;
        Ok(RotaDetails::from_record(&record, now))
    }

    /// Shows the details of a rota to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rota does not exist or the store fails.
    pub async fn show_rota(
        &self,
        channel_id: &str,
        user_id: &str,
        rota_name: &str,
        now: OffsetDateTime,
    ) -> Result<RotaDetails, ApiError> {
        let details: RotaDetails = self.get_rota_details(channel_id, rota_name, now).await?;
        self.ephemeral(
            &RotaKey::new(channel_id, rota_name),
            user_id,
            &messages::rota_details(&details),
            Color::Success,
        )
        .await;
        Ok(details)
    }

    /// Lists the channel's rotas to `user_id`, or says there are none.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn channel_prompt(
        &self,
        channel_id: &str,
        user_id: &str,
    ) -> Result<Vec<String>, ApiError> {
        let names: Vec<String> = self.list_rota_names(channel_id).await?;

        if let Err(e) = self
            .notifier
            .post_ephemeral(
                channel_id,
                user_id,
                &messages::channel_rotas(&names),
                Color::Success,
            )
            .await
        {
            warn!(channel_id, user_id, error = %e, "Failed to post channel prompt");
        }

        Ok(names)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn begin_shift(
        &self,
        key: &RotaKey,
        record: &RotaRecord,
        shift: Shift,
        user_id: &str,
        now: OffsetDateTime,
    ) -> Result<RotaDetails, ApiError> {
        let result: TransitionResult =
            apply_command(key, Some(record), Command::StartShift { shift })?;

        if !persist_transition(self.store.as_ref(), &result).await? {
            warn!(
                channel_id = %key.channel_id,
                rota_name = %key.rota_name,
                "Shift was started concurrently"
            );
            return Err(shift_changed_concurrently(&key.rota_name));
        }

        let on_call: &str = result.record.on_call_member().unwrap_or_default();
        info!(
            channel_id = %key.channel_id,
            rota_name = %key.rota_name,
            user_id,
            on_call_member = on_call,
            "Started shift"
        );
        self.announce(key, &messages::new_on_call(&key.rota_name, on_call))
            .await;

        Ok(RotaDetails::from_record(&result.record, now))
    }

    async fn load(&self, key: &RotaKey) -> Result<Option<RotaRecord>, ApiError> {
        Ok(self.store.get(&key.channel_id, &key.rota_name).await?)
    }

    async fn require(&self, key: &RotaKey) -> Result<RotaRecord, ApiError> {
        self.load(key).await?.ok_or_else(|| ApiError::RotaNotFound {
            channel_id: key.channel_id.clone(),
            rota_name: key.rota_name.clone(),
        })
    }

    async fn open_form(&self, trigger_id: &str, form: &FormSpec) -> Result<String, ApiError> {
        self.notifier
            .open_form(trigger_id, form)
            .await
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to open {} form: {e}", form.kind.callback_id()),
            })
    }

    async fn announce(&self, key: &RotaKey, text: &str) {
        if let Err(e) = self
            .notifier
            .post_message(&key.channel_id, text, Color::Success)
            .await
        {
            warn!(
                channel_id = %key.channel_id,
                rota_name = %key.rota_name,
                error = %e,
                "Failed to announce shift change"
            );
        }
    }

    async fn ephemeral(&self, key: &RotaKey, user_id: &str, text: &str, color: Color) {
        if let Err(e) = self
            .notifier
            .post_ephemeral(&key.channel_id, user_id, text, color)
            .await
        {
            warn!(
                channel_id = %key.channel_id,
                rota_name = %key.rota_name,
                user_id,
                error = %e,
                "Failed to post ephemeral message"
            );
        }
    }
}

/// Applies `command` to the rota at `key`, translating rejections.
fn apply_command(
    key: &RotaKey,
    existing: Option<&RotaRecord>,
    command: Command,
) -> Result<TransitionResult, ApiError> {
    debug!(
        channel_id = %key.channel_id,
        rota_name = %key.rota_name,
        command = command.name(),
        "Applying command"
    );
    apply(key, existing, command).map_err(|e| translate_core_error(&key.channel_id, e))
}
