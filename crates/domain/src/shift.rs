// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::{Duration, OffsetDateTime};

/// A time-bounded on-call assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    /// The member on call for this shift.
    pub on_call_member: String,
    /// When the shift started.
    pub start: OffsetDateTime,
    /// When the shift ends.
    pub end: OffsetDateTime,
}

impl Shift {
    /// Creates a new shift.
    #[must_use]
    pub fn new(
        on_call_member: impl Into<String>,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Self {
        Self {
            on_call_member: on_call_member.into(),
            start,
            end,
        }
    }

    /// A shift has expired once its end is at or before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.end <= now
    }
}

/// Computes the end of a shift that starts at `start` and lasts `duration_weeks`.
///
/// # Errors
///
/// Returns `DomainError::TimestampOutOfRange` if the result cannot be represented.
pub fn compute_shift_end(
    start: OffsetDateTime,
    duration_weeks: u32,
) -> Result<OffsetDateTime, DomainError> {
    start
        .checked_add(Duration::weeks(i64::from(duration_weeks)))
        .ok_or_else(|| DomainError::TimestampOutOfRange {
            operation: format!("adding {duration_weeks} week(s) to the shift start"),
        })
}

/// How the end of a shift is derived from its start.
///
/// Production rotas use `Weekly`. `Fixed` ignores the configured duration and
/// is meant for local testing with very short shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftPolicy {
    /// `start + duration_weeks * 7 * 24h`.
    #[default]
    Weekly,
    /// `start + length`, whatever the configured duration.
    Fixed(Duration),
}

impl ShiftPolicy {
    /// Computes the end of a shift starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the end cannot be represented.
    pub fn end_of_shift(
        &self,
        start: OffsetDateTime,
        duration_weeks: u32,
    ) -> Result<OffsetDateTime, DomainError> {
        match self {
            Self::Weekly => compute_shift_end(start, duration_weeks),
            Self::Fixed(length) => {
                start
                    .checked_add(*length)
                    .ok_or_else(|| DomainError::TimestampOutOfRange {
                        operation: format!("adding {length} to the shift start"),
                    })
            }
        }
    }

    /// Builds the shift for `member` starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the end cannot be represented.
    pub fn begin(
        &self,
        member: impl Into<String>,
        start: OffsetDateTime,
        duration_weeks: u32,
    ) -> Result<Shift, DomainError> {
        let end: OffsetDateTime = self.end_of_shift(start, duration_weeks)?;
        Ok(Shift::new(member, start, end))
    }
}
