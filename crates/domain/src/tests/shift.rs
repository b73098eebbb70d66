// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{Shift, ShiftPolicy, compute_shift_end};

#[test]
fn test_compute_shift_end_one_week() {
    let start: OffsetDateTime = datetime!(2026-03-02 09:15:30 UTC);

    let end: OffsetDateTime = compute_shift_end(start, 1).unwrap();

    assert_eq!(end, datetime!(2026-03-09 09:15:30 UTC));
    assert_eq!(end - start, Duration::seconds(7 * 24 * 60 * 60));
}

#[test]
fn test_compute_shift_end_multiple_weeks() {
    let start: OffsetDateTime = datetime!(2026-12-28 00:00 UTC);

    let end: OffsetDateTime = compute_shift_end(start, 2).unwrap();

    assert_eq!(end, datetime!(2027-01-11 00:00 UTC));
}

#[test]
fn test_compute_shift_end_is_deterministic() {
    let start: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

    assert_eq!(
        compute_shift_end(start, 3).unwrap(),
        compute_shift_end(start, 3).unwrap()
    );
}

#[test]
fn test_compute_shift_end_overflow_is_an_error() {
    let start: OffsetDateTime = datetime!(9999-12-31 00:00 UTC);

    assert!(compute_shift_end(start, 1).is_err());
}

#[test]
fn test_weekly_policy_matches_compute_shift_end() {
    let start: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

    assert_eq!(
        ShiftPolicy::Weekly.end_of_shift(start, 2).unwrap(),
        compute_shift_end(start, 2).unwrap()
    );
}

#[test]
fn test_fixed_policy_ignores_duration() {
    let start: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);
    let policy: ShiftPolicy = ShiftPolicy::Fixed(Duration::minutes(1));

    assert_eq!(
        policy.end_of_shift(start, 4).unwrap(),
        datetime!(2026-03-02 09:01 UTC)
    );
}

#[test]
fn test_policy_begin_builds_shift() {
    let start: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

    let shift: Shift = ShiftPolicy::Weekly.begin("u1", start, 1).unwrap();

    assert_eq!(shift.on_call_member, "u1");
    assert_eq!(shift.start, start);
    assert_eq!(shift.end, datetime!(2026-03-09 09:00 UTC));
}

#[test]
fn test_shift_expires_at_its_end() {
    let shift: Shift = Shift::new(
        "u1",
        datetime!(2026-03-02 09:00 UTC),
        datetime!(2026-03-09 09:00 UTC),
    );

    assert!(!shift.is_expired_at(datetime!(2026-03-09 08:59:59 UTC)));
    assert!(shift.is_expired_at(datetime!(2026-03-09 09:00 UTC)));
    assert!(shift.is_expired_at(datetime!(2026-03-10 00:00 UTC)));
}
