// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{RotaRecord, Shift};

/// Identifies a rota: the channel it lives in and its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RotaKey {
    /// The channel the rota belongs to.
    pub channel_id: String,
    /// The rota name.
    pub rota_name: String,
}

impl RotaKey {
    /// Creates a new key. Surrounding whitespace in the name is dropped.
    #[must_use]
    pub fn new(channel_id: impl Into<String>, rota_name: impl Into<String>) -> Self {
        let rota_name: String = rota_name.into();
        Self {
            channel_id: channel_id.into(),
            rota_name: rota_name.trim().to_string(),
        }
    }
}

impl std::fmt::Display for RotaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.channel_id, self.rota_name)
    }
}

/// Which stored fields a transition changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Members and duration were replaced. Shift fields are untouched.
    Configuration,
    /// Only the shift fields changed.
    Shift {
        /// The shift the transition was computed from. A conditional write
        /// applies only while the stored shift still equals this.
        expected: Option<Shift>,
    },
}

/// The result of applying a command or an advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The record as it looks after the transition.
    pub record: RotaRecord,
    /// The fields that need to be written.
    pub change: Change,
}

/// Outcome of checking a record for an expired shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// No shift is running or it has not ended yet.
    NotDue,
    /// The on-call member is no longer in the rota, so there is no next member.
    Stuck {
        /// The on-call member that could not be found.
        on_call_member: String,
    },
    /// The next member takes over.
    Advanced(TransitionResult),
}
