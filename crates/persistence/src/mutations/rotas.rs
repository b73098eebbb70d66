// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rota mutations.
//!
//! Configuration writes and shift writes touch disjoint columns, so a
//! reconfiguration can never clobber a concurrent shift change and vice versa.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rota_domain::Shift;
use tracing::{debug, info};

use crate::data_models::{ShiftColumns, duration_column};
use crate::diesel_schema::rotas;
use crate::error::PersistenceError;

/// Upserts the configuration of a rota.
///
/// Creates the row if it does not exist. Only `members` and `duration_weeks`
/// are written; the shift columns are left as they are.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `channel_id` - The channel the rota belongs to
/// * `rota_name` - The rota name
/// * `members` - Members in rotation order
/// * `duration_weeks` - Shift length in weeks
///
/// # Errors
///
/// Returns an error if serialization or the database write fails.
pub fn put_rota(
    conn: &mut SqliteConnection,
    channel_id: &str,
    rota_name: &str,
    members: &[String],
    duration_weeks: u32,
) -> Result<(), PersistenceError> {
    let members_json: String = serde_json::to_string(members)?;
    let duration: i32 = duration_column(duration_weeks)?;

    diesel::insert_into(rotas::table)
        .values((
            rotas::channel_id.eq(channel_id),
            rotas::rota_name.eq(rota_name),
            rotas::members_json.eq(&members_json),
            rotas::duration_weeks.eq(duration),
        ))
        .on_conflict((rotas::channel_id, rotas::rota_name))
        .do_update()
        .set((
            rotas::members_json.eq(&members_json),
            rotas::duration_weeks.eq(duration),
        ))
        .execute(conn)?;

    info!(
        channel_id,
        rota_name,
        members = members.len(),
        duration_weeks,
        "Stored rota configuration"
    );
    Ok(())
}

/// Overwrites the shift columns of a rota unconditionally.
///
/// `None` clears the shift.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the rota does not exist, or an
/// error if the database write fails.
pub fn update_shift(
    conn: &mut SqliteConnection,
    channel_id: &str,
    rota_name: &str,
    shift: Option<&Shift>,
) -> Result<(), PersistenceError> {
    let columns: ShiftColumns = ShiftColumns::from_shift(shift);

    let updated: usize = diesel::update(
        rotas::table
            .filter(rotas::channel_id.eq(channel_id))
            .filter(rotas::rota_name.eq(rota_name)),
    )
    .set(&columns)
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "rota {channel_id}/{rota_name}"
        )));
    }

    debug!(channel_id, rota_name, "Updated shift");
    Ok(())
}

/// Overwrites the shift columns only if the stored shift equals `expected`.
///
/// Returns `true` when the write was applied and `false` when the stored
/// shift had already changed (or the rota does not exist).
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn update_shift_if(
    conn: &mut SqliteConnection,
    channel_id: &str,
    rota_name: &str,
    expected: Option<&Shift>,
    new_shift: Option<&Shift>,
) -> Result<bool, PersistenceError> {
    let columns: ShiftColumns = ShiftColumns::from_shift(new_shift);
    let target = rotas::table
        .filter(rotas::channel_id.eq(channel_id))
        .filter(rotas::rota_name.eq(rota_name));

    let updated: usize = match expected {
        Some(shift) => diesel::update(
            target
                .filter(rotas::on_call_member.eq(&shift.on_call_member))
                .filter(rotas::shift_start.eq(shift.start.unix_timestamp()))
                .filter(rotas::shift_end.eq(shift.end.unix_timestamp())),
        )
        .set(&columns)
        .execute(conn)?,
        None => diesel::update(target.filter(rotas::shift_end.is_null()))
            .set(&columns)
            .execute(conn)?,
    };

    debug!(channel_id, rota_name, applied = updated == 1, "Conditional shift update");
    Ok(updated == 1)
}

/// Deletes every rota. Only meant for resetting test databases.
///
/// Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn delete_all_rotas(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(rotas::table).execute(conn)?;
    info!(deleted, "Deleted all rotas");
    Ok(deleted)
}
