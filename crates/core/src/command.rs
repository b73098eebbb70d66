// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::Shift;

/// A command represents user intent as data only.
///
/// Commands are the only way to request a change to a rota. Time-driven
/// changes go through `advance_shift` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new rota.
    CreateRota {
        /// Members in rotation order.
        members: Vec<String>,
        /// Shift length in weeks.
        duration_weeks: u32,
    },
    /// Replace the members and duration of an existing rota.
    UpdateRota {
        /// Members in rotation order.
        members: Vec<String>,
        /// Shift length in weeks.
        duration_weeks: u32,
    },
    /// Start a shift with a caller-chosen member.
    StartShift {
        /// The shift to begin. Its member must belong to the rota.
        shift: Shift,
    },
    /// Stop the running shift.
    StopShift,
}

impl Command {
    /// Name of the command, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateRota { .. } => "CreateRota",
            Self::UpdateRota { .. } => "UpdateRota",
            Self::StartShift { .. } => "StartShift",
            Self::StopShift => "StopShift",
        }
    }
}
