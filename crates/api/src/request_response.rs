// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use rota_domain::{RotaRecord, Shift, ShiftState};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// API request to create a rota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRotaRequest {
    /// The channel the rota will belong to.
    pub channel_id: String,
    /// The user creating the rota.
    pub user_id: String,
    /// The rota name.
    pub rota_name: String,
    /// Members in rotation order.
    pub members: Vec<String>,
    /// Shift length in weeks.
    pub duration_weeks: u32,
}

/// API request to replace a rota's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRotaRequest {
    /// The channel the rota belongs to.
    pub channel_id: String,
    /// The user updating the rota.
    pub user_id: String,
    /// The rota name.
    pub rota_name: String,
    /// The new members in rotation order.
    pub members: Vec<String>,
    /// The new shift length in weeks.
    pub duration_weeks: u32,
}

/// API request to start a shift immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRotaRequest {
    /// The channel the rota belongs to.
    pub channel_id: String,
    /// The user starting the rota.
    pub user_id: String,
    /// The rota name.
    pub rota_name: String,
    /// The member taking the first shift.
    pub on_call_member: String,
}

/// Actions a user may take on a rota in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailableAction {
    /// Open the update form.
    UpdateRota,
    /// Open the start form.
    StartRota,
    /// Stop the running shift.
    StopRota,
}

impl AvailableAction {
    /// The actions offered for a rota in `state`.
    ///
    /// An empty rota offers nothing, a configured one can be updated or
    /// started, and a running or expired one can only be stopped.
    #[must_use]
    pub fn for_state(state: ShiftState) -> Vec<Self> {
        match state {
            ShiftState::Empty => Vec::new(),
            ShiftState::Configured => vec![Self::UpdateRota, Self::StartRota],
            ShiftState::Running | ShiftState::Expired => vec![Self::StopRota],
        }
    }
}

/// Read-only projection of a rota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaDetails {
    /// The channel the rota belongs to.
    pub channel_id: String,
    /// The rota name.
    pub rota_name: String,
    /// Members in rotation order.
    pub members: Vec<String>,
    /// Shift length in weeks.
    pub duration_weeks: u32,
    /// Derived lifecycle state at the time of the projection.
    pub state: ShiftState,
    /// The member on call, if a shift is active.
    pub on_call_member: Option<String>,
    /// Shift start (RFC 3339), if a shift is active.
    pub shift_start: Option<String>,
    /// Shift end (RFC 3339), if a shift is active.
    pub shift_end: Option<String>,
    /// What the user can do next.
    pub available_actions: Vec<AvailableAction>,
}

impl RotaDetails {
    /// Projects a record as seen at `now`.
    #[must_use]
    pub fn from_record(record: &RotaRecord, now: OffsetDateTime) -> Self {
        let state: ShiftState = record.state_at(now);
        let shift: Option<&Shift> = record
            .shift
            .as_ref()
            .filter(|_| state.has_active_shift());
        Self {
            channel_id: record.channel_id.clone(),
            rota_name: record.rota_name.clone(),
            members: record.members.clone(),
            duration_weeks: record.duration_weeks,
            state,
            on_call_member: shift.map(|s| s.on_call_member.clone()),
            shift_start: shift.map(|s| format_rfc3339(s.start)),
            shift_end: shift.map(|s| format_rfc3339(s.end)),
            available_actions: AvailableAction::for_state(state),
        }
    }
}

/// Response for listing a channel's rotas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRotasResponse {
    /// The channel that was listed.
    pub channel_id: String,
    /// Rota names in name order.
    pub rota_names: Vec<String>,
}

fn format_rfc3339(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| timestamp.to_string())
}
