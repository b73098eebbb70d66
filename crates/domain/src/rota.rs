// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::shift::Shift;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Derived lifecycle state of a rota.
///
/// This is never stored. It is a function of the record and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftState {
    /// The rota has no members.
    Empty,
    /// The rota has members but no active shift.
    Configured,
    /// A shift is active and its end lies in the future.
    Running,
    /// A shift is active and its end has passed; waiting for the next sweep.
    Expired,
}

impl ShiftState {
    /// Converts this state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Configured => "Configured",
            Self::Running => "Running",
            Self::Expired => "Expired",
        }
    }

    /// Returns whether a shift is currently assigned.
    #[must_use]
    pub const fn has_active_shift(&self) -> bool {
        matches!(self, Self::Running | Self::Expired)
    }
}

impl std::fmt::Display for ShiftState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The unit of persisted rota state.
///
/// A record is identified by `(channel_id, rota_name)`. The on-call member
/// and the shift timestamps live together in `shift`, so they are either all
/// present or all absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotaRecord {
    /// The channel the rota belongs to.
    pub channel_id: String,
    /// The rota name, unique within the channel.
    pub rota_name: String,
    /// Members in rotation order.
    pub members: Vec<String>,
    /// Shift length in weeks. Zero means unset.
    pub duration_weeks: u32,
    /// The active shift, if any.
    pub shift: Option<Shift>,
}

impl RotaRecord {
    /// Creates a freshly configured record with no active shift.
    #[must_use]
    pub fn new(
        channel_id: impl Into<String>,
        rota_name: impl Into<String>,
        members: Vec<String>,
        duration_weeks: u32,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            rota_name: rota_name.into(),
            members,
            duration_weeks,
            shift: None,
        }
    }

    /// Returns the member currently on call.
    #[must_use]
    pub fn on_call_member(&self) -> Option<&str> {
        self.shift.as_ref().map(|s| s.on_call_member.as_str())
    }

    /// Returns whether a shift is assigned, expired or not.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.shift.is_some()
    }

    /// Returns the derived lifecycle state at `now`.
    #[must_use]
    pub fn state_at(&self, now: OffsetDateTime) -> ShiftState {
        match &self.shift {
            Some(shift) if shift.is_expired_at(now) => ShiftState::Expired,
            Some(_) => ShiftState::Running,
            None if self.members.is_empty() => ShiftState::Empty,
            None => ShiftState::Configured,
        }
    }
}

/// Formats a user id as a platform mention.
#[must_use]
pub fn mention(user_id: &str) -> String {
    format!("<@{user_id}>")
}
