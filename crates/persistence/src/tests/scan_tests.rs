// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Expired-shift scans.

use rota_domain::{RotaRecord, Shift};
use time::{Duration, OffsetDateTime};

use super::{create_test_persistence_with_rota, create_test_shift};
use crate::Persistence;

#[test]
fn test_scan_excludes_rotas_without_shift() {
    let mut persistence: Persistence = create_test_persistence_with_rota();

    let expired: Vec<RotaRecord> = persistence
        .scan_expired_shifts(OffsetDateTime::now_utc())
        .unwrap();

    assert!(expired.is_empty());
}

#[test]
fn test_scan_excludes_shift_ending_after_now() {
    let mut persistence: Persistence = create_test_persistence_with_rota();
    let shift: Shift = create_test_shift("u1");
    persistence.update_shift("C1", "R1", Some(&shift)).unwrap();

    let expired: Vec<RotaRecord> = persistence
        .scan_expired_shifts(shift.end - Duration::seconds(1))
        .unwrap();

    assert!(expired.is_empty());
}

#[test]
fn test_scan_includes_shift_ending_exactly_now() {
    let mut persistence: Persistence = create_test_persistence_with_rota();
    let shift: Shift = create_test_shift("u1");
    persistence.update_shift("C1", "R1", Some(&shift)).unwrap();

    let expired: Vec<RotaRecord> = persistence.scan_expired_shifts(shift.end).unwrap();

    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].rota_name, "R1");
    assert_eq!(expired[0].shift, Some(shift));
}

#[test]
fn test_scan_spans_channels_and_skips_running_shifts() {
    let mut persistence: Persistence = create_test_persistence_with_rota();
    let expired_shift: Shift = create_test_shift("u1");
    persistence
        .update_shift("C1", "R1", Some(&expired_shift))
        .unwrap();

    persistence
        .put_rota("C2", "R2", &[String::from("u5")], 1)
        .unwrap();
    persistence
        .update_shift("C2", "R2", Some(&create_test_shift("u5")))
        .unwrap();

    persistence
        .put_rota("C2", "Later", &[String::from("u7")], 1)
        .unwrap();
    let later: Shift = Shift::new(
        "u7",
        expired_shift.end,
        expired_shift.end + Duration::weeks(1),
    );
    persistence.update_shift("C2", "Later", Some(&later)).unwrap();

    let expired: Vec<RotaRecord> = persistence
        .scan_expired_shifts(expired_shift.end + Duration::hours(1))
        .unwrap();

    let keys: Vec<(String, String)> = expired
        .into_iter()
        .map(|r| (r.channel_id, r.rota_name))
        .collect();
    assert_eq!(
        keys,
        vec![
            (String::from("C1"), String::from("R1")),
            (String::from("C2"), String::from("R2")),
        ]
    );
}

#[test]
fn test_scan_skips_corrupt_rows() {
    use diesel::RunQueryDsl;

    let mut persistence: Persistence = create_test_persistence_with_rota();
    let shift: Shift = create_test_shift("u1");
    persistence.update_shift("C1", "R1", Some(&shift)).unwrap();
    persistence
        .put_rota("C1", "Broken", &[String::from("u1")], 1)
        .unwrap();
    persistence
        .update_shift("C1", "Broken", Some(&shift))
        .unwrap();
    diesel::sql_query("UPDATE rotas SET members_json = 'not json' WHERE rota_name = 'Broken'")
        .execute(&mut persistence.conn)
        .unwrap();

    let expired: Vec<RotaRecord> = persistence.scan_expired_shifts(shift.end).unwrap();

    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].rota_name, "R1");
    assert!(persistence.get_rota("C1", "Broken").is_err());
}
