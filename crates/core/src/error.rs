// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::DomainError;

/// Errors that can occur during state transitions.
///
/// Every variant describes a rejected command; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A rota with this name already exists in the channel.
    RotaAlreadyExists {
        /// The rota name.
        rota_name: String,
    },
    /// No rota with this name exists in the channel.
    RotaNotFound {
        /// The rota name.
        rota_name: String,
    },
    /// Stop was requested but no shift is running.
    ShiftNotRunning {
        /// The rota name.
        rota_name: String,
    },
    /// Update was requested while a shift is running.
    UpdateWhileRunning {
        /// The rota name.
        rota_name: String,
    },
}

impl CoreError {
    /// Short machine-readable name of the violated rule.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::DomainViolation(DomainError::EmptyRota) => "empty_rota",
            Self::DomainViolation(DomainError::MissingShiftDuration) => "missing_shift_duration",
            Self::DomainViolation(DomainError::AlreadyOnDuty { .. }) => "already_on_duty",
            Self::DomainViolation(DomainError::InvalidRotaName(_)) => "invalid_rota_name",
            Self::DomainViolation(DomainError::InvalidDuration { .. }) => "invalid_duration",
            Self::DomainViolation(DomainError::MemberNotInRota { .. }) => "member_not_in_rota",
            Self::DomainViolation(DomainError::TimestampOutOfRange { .. }) => {
                "timestamp_out_of_range"
            }
            Self::RotaAlreadyExists { .. } => "rota_already_exists",
            Self::RotaNotFound { .. } => "rota_not_found",
            Self::ShiftNotRunning { .. } => "shift_not_running",
            Self::UpdateWhileRunning { .. } => "update_while_running",
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::RotaAlreadyExists { rota_name } => {
                write!(f, "Oops, {rota_name} already exists!")
            }
            Self::RotaNotFound { rota_name } => {
                write!(f, "[{rota_name}] There is no such rota in this channel.")
            }
            Self::ShiftNotRunning { rota_name } => write!(
                f,
                "[{rota_name}] Can't stop an on-call shift that has yet to start."
            ),
            Self::UpdateWhileRunning { rota_name } => write!(
                f,
                "[{rota_name}] Can't update rota whilst on-call shift is running."
            ),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
