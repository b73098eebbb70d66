// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use rota::CoreError;
use rota_domain::DomainError;
use rota_persistence::PersistenceError;

use crate::token::TokenError;

/// Text shown to users when a request fails for reasons they cannot fix.
pub const GENERIC_FAILURE_MESSAGE: &str = "Sorry, something went wrong. Please try again later.";

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A rota rule rejected the request.
    PreconditionFailed {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The rota does not exist in the channel.
    RotaNotFound {
        /// The channel that was searched.
        channel_id: String,
        /// The rota name that was requested.
        rota_name: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The storage backend failed.
    Storage {
        /// A description of the storage failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The text to show the user who triggered the request.
    ///
    /// Storage and internal failures are not described to users.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::PreconditionFailed { message, .. } | Self::InvalidInput { message, .. } => {
                message.clone()
            }
            Self::RotaNotFound { rota_name, .. } => {
                format!("[{rota_name}] There is no such rota in this channel.")
            }
            Self::Storage { .. } | Self::Internal { .. } => {
                String::from(GENERIC_FAILURE_MESSAGE)
            }
        }
    }

    /// Whether the failure is the caller's doing rather than the system's.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::PreconditionFailed { .. } | Self::RotaNotFound { .. } | Self::InvalidInput { .. }
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreconditionFailed { rule, message } => {
                write!(f, "Precondition failed ({rule}): {message}")
            }
            Self::RotaNotFound {
                channel_id,
                rota_name,
            } => write!(f, "Rota not found: {channel_id}/{rota_name}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Storage { message } => write!(f, "Storage error: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        Self::InvalidInput {
            field: String::from("token"),
            message: err.to_string(),
        }
    }
}

/// Translates a core error into an API error.
///
/// # Arguments
///
/// * `channel_id` - The channel of the request, used for not-found errors
/// * `err` - The core error
#[must_use]
pub fn translate_core_error(channel_id: &str, err: CoreError) -> ApiError {
    let rule: String = err.rule().to_string();
    match err {
        CoreError::DomainViolation(DomainError::InvalidRotaName(msg)) => ApiError::InvalidInput {
            field: String::from("rota_name"),
            message: msg,
        },
        CoreError::DomainViolation(domain_err @ DomainError::InvalidDuration { .. }) => {
            ApiError::InvalidInput {
                field: String::from("duration_weeks"),
                message: domain_err.to_string(),
            }
        }
        CoreError::DomainViolation(DomainError::TimestampOutOfRange { operation }) => {
            ApiError::Internal {
                message: format!("Timestamp out of range while {operation}"),
            }
        }
        CoreError::RotaNotFound { rota_name } => ApiError::RotaNotFound {
            channel_id: channel_id.to_string(),
            rota_name,
        },
        other => ApiError::PreconditionFailed {
            rule,
            message: other.to_string(),
        },
    }
}

/// The rejection returned when a conditional shift write loses a race.
#[must_use]
pub fn shift_changed_concurrently(rota_name: &str) -> ApiError {
    ApiError::PreconditionFailed {
        rule: String::from("shift_changed_concurrently"),
        message: format!(
            "[{rota_name}] The on-call shift changed while your request was being handled. Please try again."
        ),
    }
}

/// The rejection returned when a start form is submitted after the shift it
/// showed would already have ended.
#[must_use]
pub fn start_form_expired(rota_name: &str) -> ApiError {
    ApiError::PreconditionFailed {
        rule: String::from("start_form_expired"),
        message: format!("[{rota_name}] This start form has expired. Please start the rota again."),
    }
}
