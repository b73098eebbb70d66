// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Form correlation tokens.
//!
//! A form opened for a user only comes back later, on submission. The token
//! rides along in the form's private metadata and tells the submission
//! handler which rota it belongs to. For start forms it also carries the
//! shift times shown to the user, so the shift that begins is the shift
//! that was offered.
//!
//! The presentation layer treats the encoded token as an opaque string.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

/// The token format written by this build.
pub const FORM_TOKEN_VERSION: u32 = 1;

/// Errors produced while decoding a form token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token is not valid JSON of the expected shape.
    #[error("Malformed form token: {0}")]
    Malformed(String),
    /// The token was written by an incompatible build.
    #[error("Unsupported form token version {found}, expected {expected}")]
    UnsupportedVersion {
        /// The version found in the token.
        found: u32,
        /// The version this build understands.
        expected: u32,
    },
    /// A timestamp in the token is out of range.
    #[error("Form token carries an invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Correlates a form submission with the rota it was opened for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormToken {
    /// Token format version.
    pub version: u32,
    /// The channel the form was opened from.
    pub channel_id: String,
    /// The rota the form is about. Empty for a create form.
    #[serde(default)]
    pub rota_name: String,
    /// Pending shift start, in unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_start: Option<i64>,
    /// Pending shift end, in unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_end: Option<i64>,
}

impl FormToken {
    /// A token for a form about `rota_name` without pending shift times.
    #[must_use]
    pub fn for_rota(channel_id: impl Into<String>, rota_name: impl Into<String>) -> Self {
        Self {
            version: FORM_TOKEN_VERSION,
            channel_id: channel_id.into(),
            rota_name: rota_name.into(),
            shift_start: None,
            shift_end: None,
        }
    }

    /// A token for a start form offering a shift from `start` to `end`.
    #[must_use]
    pub fn for_pending_shift(
        channel_id: impl Into<String>,
        rota_name: impl Into<String>,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Self {
        Self {
            shift_start: Some(start.unix_timestamp()),
            shift_end: Some(end.unix_timestamp()),
            ..Self::for_rota(channel_id, rota_name)
        }
    }

    /// Encodes the token for the form's private metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> Result<String, TokenError> {
        serde_json::to_string(self).map_err(|e| TokenError::Malformed(e.to_string()))
    }

    /// Decodes a token and checks its version.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed or was written by an
    /// incompatible build.
    pub fn decode(encoded: &str) -> Result<Self, TokenError> {
        let token: Self =
            serde_json::from_str(encoded).map_err(|e| TokenError::Malformed(e.to_string()))?;

        if token.version != FORM_TOKEN_VERSION {
            return Err(TokenError::UnsupportedVersion {
                found: token.version,
                expected: FORM_TOKEN_VERSION,
            });
        }

        Ok(token)
    }

    /// The pending shift times, if the token carries both.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp is out of range.
    pub fn pending_shift(&self) -> Result<Option<(OffsetDateTime, OffsetDateTime)>, TokenError> {
        let (Some(start), Some(end)) = (self.shift_start, self.shift_end) else {
            return Ok(None);
        };

        let start: OffsetDateTime = OffsetDateTime::from_unix_timestamp(start)
            .map_err(|e| TokenError::InvalidTimestamp(e.to_string()))?;
        let end: OffsetDateTime = OffsetDateTime::from_unix_timestamp(end)
            .map_err(|e| TokenError::InvalidTimestamp(e.to_string()))?;

        Ok(Some((start, end)))
    }
}
