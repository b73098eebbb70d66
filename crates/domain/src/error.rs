// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::rota::mention;

/// Errors that can occur during rota validation.
///
/// The `Display` output of every variant is user-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The rota has no members.
    EmptyRota,
    /// The rota has no shift duration configured.
    MissingShiftDuration,
    /// A shift is already running for this rota.
    AlreadyOnDuty {
        /// The rota name.
        rota_name: String,
        /// The member currently on call.
        member: String,
    },
    /// The rota name is empty or too long.
    InvalidRotaName(String),
    /// The shift duration is out of range.
    InvalidDuration {
        /// The rejected number of weeks.
        weeks: u32,
        /// The largest accepted number of weeks.
        max: u32,
    },
    /// The chosen member is not part of the rota.
    MemberNotInRota {
        /// The rota name.
        rota_name: String,
        /// The member that was chosen.
        member: String,
    },
    /// Shift arithmetic left the representable timestamp range.
    TimestampOutOfRange {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRota => write!(f, "Sorry, I can't start an empty rota!"),
            Self::MissingShiftDuration => write!(
                f,
                "Sorry, I can't start a rota without an on-call shift duration!"
            ),
            Self::AlreadyOnDuty { rota_name, member } => write!(
                f,
                "[{rota_name}] {} is already on duty",
                mention(member)
            ),
            Self::InvalidRotaName(msg) => write!(f, "Invalid rota name: {msg}"),
            Self::InvalidDuration { weeks, max } => write!(
                f,
                "Invalid shift duration: {weeks} week(s). Must be at most {max}"
            ),
            Self::MemberNotInRota { rota_name, member } => write!(
                f,
                "[{rota_name}] {} is not a member of this rota",
                mention(member)
            ),
            Self::TimestampOutOfRange { operation } => {
                write!(f, "Timestamp out of range while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
