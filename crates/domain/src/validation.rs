// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::rota::RotaRecord;

/// Longest accepted rota name, in characters.
pub const MAX_ROTA_NAME_LEN: usize = 50;

/// Longest accepted shift duration, in weeks.
pub const MAX_DURATION_WEEKS: u32 = 52;

/// Validates that a shift may be started for this rota.
///
/// The checks run in a fixed order and a later failing check replaces the
/// error of an earlier one, so an active shift always wins over an empty
/// member list or a missing duration.
///
/// # Errors
///
/// Returns an error if:
/// - The rota has no members
/// - The rota has no shift duration
/// - A shift is already active
pub fn validate_can_start(record: &RotaRecord) -> Result<(), DomainError> {
    let mut violation: Option<DomainError> = None;

    if record.members.is_empty() {
        violation = Some(DomainError::EmptyRota);
    }

    if record.duration_weeks == 0 {
        violation = Some(DomainError::MissingShiftDuration);
    }

    if let Some(shift) = &record.shift {
        violation = Some(DomainError::AlreadyOnDuty {
            rota_name: record.rota_name.clone(),
            member: shift.on_call_member.clone(),
        });
    }

    violation.map_or(Ok(()), Err)
}

/// Returns the member after `current` in rotation order.
///
/// Wraps from the last member to the first. Returns `None` when `current`
/// is not in `members`; the first occurrence is used if it appears twice.
#[must_use]
pub fn next_member<'a>(members: &'a [String], current: &str) -> Option<&'a str> {
    let index: usize = members.iter().position(|m| m == current)?;
    members
        .get((index + 1) % members.len())
        .map(String::as_str)
}

/// Validates that `member` belongs to the rota.
///
/// # Errors
///
/// Returns `DomainError::MemberNotInRota` otherwise.
pub fn validate_member_in_rota(record: &RotaRecord, member: &str) -> Result<(), DomainError> {
    if record.members.iter().any(|m| m == member) {
        return Ok(());
    }
    Err(DomainError::MemberNotInRota {
        rota_name: record.rota_name.clone(),
        member: member.to_string(),
    })
}

/// Validates a rota name supplied at creation.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than `MAX_ROTA_NAME_LEN`.
pub fn validate_rota_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidRotaName(String::from(
            "Rota name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_ROTA_NAME_LEN {
        return Err(DomainError::InvalidRotaName(format!(
            "Rota name must be at most {MAX_ROTA_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates a configured shift duration. Zero is accepted and means unset.
///
/// # Errors
///
/// Returns an error if the duration exceeds `MAX_DURATION_WEEKS`.
pub const fn validate_duration_weeks(weeks: u32) -> Result<(), DomainError> {
    if weeks > MAX_DURATION_WEEKS {
        return Err(DomainError::InvalidDuration {
            weeks,
            max: MAX_DURATION_WEEKS,
        });
    }
    Ok(())
}
