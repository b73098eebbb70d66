// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use rota_domain::{RotaRecord, Shift};
use time::OffsetDateTime;

use crate::diesel_schema::rotas;
use crate::error::PersistenceError;

/// Diesel row for the `rotas` table.
///
/// Members are stored as a JSON array. Shift timestamps are stored as unix
/// seconds so that `shift_end <= now` compares numerically.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = rotas)]
pub struct RotaRow {
    pub channel_id: String,
    pub rota_name: String,
    pub members_json: String,
    pub duration_weeks: i32,
    pub on_call_member: Option<String>,
    pub shift_start: Option<i64>,
    pub shift_end: Option<i64>,
}

impl RotaRow {
    /// Converts the row into a domain record.
    ///
    /// # Errors
    ///
    /// Returns an error if the members column is not a JSON string array,
    /// the duration is negative, a timestamp is out of range, or the shift
    /// columns are only partially set.
    pub fn into_record(self) -> Result<RotaRecord, PersistenceError> {
        let members: Vec<String> = serde_json::from_str(&self.members_json)?;

        let duration_weeks: u32 =
            u32::try_from(self.duration_weeks).map_err(|_| PersistenceError::CorruptRecord {
                channel_id: self.channel_id.clone(),
                rota_name: self.rota_name.clone(),
                reason: format!("negative duration_weeks {}", self.duration_weeks),
            })?;

        let shift: Option<Shift> = match (self.on_call_member, self.shift_start, self.shift_end) {
            (None, None, None) => None,
            (Some(member), Some(start), Some(end)) => Some(Shift::new(
                member,
                from_unix(&self.channel_id, &self.rota_name, start)?,
                from_unix(&self.channel_id, &self.rota_name, end)?,
            )),
            _ => {
                return Err(PersistenceError::CorruptRecord {
                    channel_id: self.channel_id,
                    rota_name: self.rota_name,
                    reason: String::from("shift columns are only partially set"),
                });
            }
        };

        Ok(RotaRecord {
            channel_id: self.channel_id,
            rota_name: self.rota_name,
            members,
            duration_weeks,
            shift,
        })
    }
}

/// Shift columns in storage form.
#[derive(Debug, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = rotas, treat_none_as_null = true)]
pub struct ShiftColumns {
    pub on_call_member: Option<String>,
    pub shift_start: Option<i64>,
    pub shift_end: Option<i64>,
}

impl ShiftColumns {
    /// Storage form of an optional shift. `None` clears all three columns.
    #[must_use]
    pub fn from_shift(shift: Option<&Shift>) -> Self {
        shift.map_or(
            Self {
                on_call_member: None,
                shift_start: None,
                shift_end: None,
            },
            |s| Self {
                on_call_member: Some(s.on_call_member.clone()),
                shift_start: Some(s.start.unix_timestamp()),
                shift_end: Some(s.end.unix_timestamp()),
            },
        )
    }
}

/// Converts stored unix seconds back into a timestamp.
fn from_unix(
    channel_id: &str,
    rota_name: &str,
    seconds: i64,
) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp(seconds).map_err(|e| PersistenceError::CorruptRecord {
        channel_id: channel_id.to_string(),
        rota_name: rota_name.to_string(),
        reason: e.to_string(),
    })
}

/// Converts a configured duration into its column type.
///
/// # Errors
///
/// Returns an error if the duration does not fit the column.
pub fn duration_column(duration_weeks: u32) -> Result<i32, PersistenceError> {
    i32::try_from(duration_weeks)
        .map_err(|e| PersistenceError::SerializationError(format!("duration_weeks: {e}")))
}
