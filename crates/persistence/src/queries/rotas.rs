// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rota queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rota_domain::RotaRecord;
use time::OffsetDateTime;
use tracing::{debug, error};

use crate::data_models::RotaRow;
use crate::diesel_schema::rotas;
use crate::error::PersistenceError;

/// Retrieves a rota by its key.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `channel_id` - The channel the rota belongs to
/// * `rota_name` - The rota name
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is corrupt.
/// Returns `Ok(None)` if no such rota exists.
pub fn get_rota(
    conn: &mut SqliteConnection,
    channel_id: &str,
    rota_name: &str,
) -> Result<Option<RotaRecord>, PersistenceError> {
    debug!(channel_id, rota_name, "Looking up rota");

    let row: Option<RotaRow> = rotas::table
        .filter(rotas::channel_id.eq(channel_id))
        .filter(rotas::rota_name.eq(rota_name))
        .select(RotaRow::as_select())
        .first(conn)
        .optional()?;

    row.map(RotaRow::into_record).transpose()
}

/// Lists the names of every rota in a channel, in name order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_rota_names(
    conn: &mut SqliteConnection,
    channel_id: &str,
) -> Result<Vec<String>, PersistenceError> {
    let names: Vec<String> = rotas::table
        .filter(rotas::channel_id.eq(channel_id))
        .select(rotas::rota_name)
        .order(rotas::rota_name.asc())
        .load(conn)?;

    Ok(names)
}

/// Returns every rota whose shift has ended at or before `now`.
///
/// Rotas without a shift are never returned. A corrupt row is logged and
/// left out so that it cannot hold back the other rotas.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn scan_expired_shifts(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<Vec<RotaRecord>, PersistenceError> {
    let rows: Vec<RotaRow> = rotas::table
        .filter(rotas::shift_end.is_not_null())
        .filter(rotas::shift_end.le(now.unix_timestamp()))
        .select(RotaRow::as_select())
        .order((rotas::channel_id.asc(), rotas::rota_name.asc()))
        .load(conn)?;

    debug!(count = rows.len(), "Scanned for expired shifts");

    let records: Vec<RotaRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let (channel_id, rota_name) = (row.channel_id.clone(), row.rota_name.clone());
            row.into_record()
                .inspect_err(|e| {
                    error!(
                        channel_id = %channel_id,
                        rota_name = %rota_name,
                        error = %e,
                        "Skipping corrupt rota"
                    );
                })
                .ok()
        })
        .collect();

    Ok(records)
}
