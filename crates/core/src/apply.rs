// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Advance, Change, RotaKey, TransitionResult};
use rota_domain::{
    RotaRecord, Shift, ShiftPolicy, next_member, validate_can_start, validate_duration_weeks,
    validate_member_in_rota, validate_rota_name,
};
use time::OffsetDateTime;

/// Applies a command to the current record, producing the new record.
///
/// This function is pure: the caller reads `existing` from storage and
/// writes the result back according to `TransitionResult::change`.
///
/// # Arguments
///
/// * `key` - The rota the command targets
/// * `existing` - The stored record, or `None` if there is none
/// * `command` - The command to apply
///
/// # Errors
///
/// Returns an error if:
/// - `CreateRota` targets an existing rota, or its name or duration is invalid
/// - Any other command targets a missing rota
/// - `UpdateRota` is applied while a shift is running
/// - `StartShift` fails `validate_can_start` or names a non-member
/// - `StopShift` is applied while no shift is running
pub fn apply(
    key: &RotaKey,
    existing: Option<&RotaRecord>,
    command: Command,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateRota {
            members,
            duration_weeks,
        } => {
            if existing.is_some() {
                return Err(CoreError::RotaAlreadyExists {
                    rota_name: key.rota_name.clone(),
                });
            }

            validate_rota_name(&key.rota_name)?;
            validate_duration_weeks(duration_weeks)?;

            let record: RotaRecord = RotaRecord::new(
                key.channel_id.clone(),
                key.rota_name.clone(),
                members,
                duration_weeks,
            );

            Ok(TransitionResult {
                record,
                change: Change::Configuration,
            })
        }
        Command::UpdateRota {
            members,
            duration_weeks,
        } => {
            let current: &RotaRecord = require_existing(key, existing)?;

            // A live shift is never stopped implicitly by a reconfiguration
            if current.is_running() {
                return Err(CoreError::UpdateWhileRunning {
                    rota_name: key.rota_name.clone(),
                });
            }

            validate_duration_weeks(duration_weeks)?;

            let mut record: RotaRecord = current.clone();
            record.members = members;
            record.duration_weeks = duration_weeks;

            Ok(TransitionResult {
                record,
                change: Change::Configuration,
            })
        }
        Command::StartShift { shift } => {
            let current: &RotaRecord = require_existing(key, existing)?;

            validate_can_start(current)?;
            validate_member_in_rota(current, &shift.on_call_member)?;

            let mut record: RotaRecord = current.clone();
            record.shift = Some(shift);

            Ok(TransitionResult {
                record,
                change: Change::Shift { expected: None },
            })
        }
        Command::StopShift => {
            let current: &RotaRecord = require_existing(key, existing)?;

            let Some(previous) = current.shift.clone() else {
                return Err(CoreError::ShiftNotRunning {
                    rota_name: key.rota_name.clone(),
                });
            };

            let mut record: RotaRecord = current.clone();
            record.shift = None;

            Ok(TransitionResult {
                record,
                change: Change::Shift {
                    expected: Some(previous),
                },
            })
        }
    }
}

/// Hands an expired shift over to the next member.
///
/// The new shift starts at `now` and its end comes from `policy`.
///
/// # Errors
///
/// Returns an error if the new shift end cannot be represented.
pub fn advance_shift(
    record: &RotaRecord,
    policy: &ShiftPolicy,
    now: OffsetDateTime,
) -> Result<Advance, CoreError> {
    let Some(current) = &record.shift else {
        return Ok(Advance::NotDue);
    };

    if !current.is_expired_at(now) {
        return Ok(Advance::NotDue);
    }

    let Some(next) = next_member(&record.members, &current.on_call_member) else {
        return Ok(Advance::Stuck {
            on_call_member: current.on_call_member.clone(),
        });
    };

    let shift: Shift = policy.begin(next, now, record.duration_weeks)?;

    let mut advanced: RotaRecord = record.clone();
    advanced.shift = Some(shift);

    Ok(Advance::Advanced(TransitionResult {
        record: advanced,
        change: Change::Shift {
            expected: Some(current.clone()),
        },
    }))
}

fn require_existing<'a>(
    key: &RotaKey,
    existing: Option<&'a RotaRecord>,
) -> Result<&'a RotaRecord, CoreError> {
    existing.ok_or_else(|| CoreError::RotaNotFound {
        rota_name: key.rota_name.clone(),
    })
}
