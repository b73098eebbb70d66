// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the time-driven hand-over of expired shifts.

use rota_domain::{RotaRecord, Shift, ShiftPolicy};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use super::helpers::{create_configured_record, create_running_record, shift_end};
use crate::{Advance, Change, advance_shift};

#[test]
fn test_advance_not_due_without_shift() {
    let record: RotaRecord = create_configured_record();

    let advance: Advance = advance_shift(&record, &ShiftPolicy::Weekly, shift_end()).unwrap();

    assert_eq!(advance, Advance::NotDue);
}

#[test]
fn test_advance_not_due_before_shift_end() {
    let record: RotaRecord = create_running_record("u1");
    let now: OffsetDateTime = shift_end() - Duration::seconds(1);

    let advance: Advance = advance_shift(&record, &ShiftPolicy::Weekly, now).unwrap();

    assert_eq!(advance, Advance::NotDue);
}

#[test]
fn test_advance_hands_over_to_next_member_at_shift_end() {
    let record: RotaRecord = create_running_record("u1");
    let now: OffsetDateTime = shift_end();

    let Advance::Advanced(result) = advance_shift(&record, &ShiftPolicy::Weekly, now).unwrap()
    else {
        panic!("expected the shift to advance");
    };

    let shift: &Shift = result.record.shift.as_ref().unwrap();
    assert_eq!(shift.on_call_member, "u2");
    assert_eq!(shift.start, now);
    assert_eq!(shift.end, shift_end() + Duration::weeks(1));
    assert_eq!(
        result.change,
        Change::Shift {
            expected: record.shift.clone()
        }
    );
}

#[test]
fn test_late_advance_starts_new_shift_at_now() {
    let record: RotaRecord = create_running_record("u1");
    let now: OffsetDateTime = shift_end() + Duration::hours(3);

    let Advance::Advanced(result) = advance_shift(&record, &ShiftPolicy::Weekly, now).unwrap()
    else {
        panic!("expected the shift to advance");
    };

    let shift: &Shift = result.record.shift.as_ref().unwrap();
    assert_eq!(shift.start, now);
    assert_eq!(shift.end, datetime!(2026-03-16 12:00 UTC));
}

#[test]
fn test_advance_wraps_to_first_member() {
    let record: RotaRecord = create_running_record("u3");

    let Advance::Advanced(result) =
        advance_shift(&record, &ShiftPolicy::Weekly, shift_end()).unwrap()
    else {
        panic!("expected the shift to advance");
    };

    assert_eq!(result.record.on_call_member(), Some("u1"));
}

#[test]
fn test_advance_stuck_when_on_call_member_was_removed() {
    let mut record: RotaRecord = create_running_record("u1");
    record.members = vec![String::from("u2"), String::from("u3")];

    let advance: Advance = advance_shift(&record, &ShiftPolicy::Weekly, shift_end()).unwrap();

    assert_eq!(
        advance,
        Advance::Stuck {
            on_call_member: String::from("u1")
        }
    );
}

#[test]
fn test_advance_uses_injected_policy() {
    let record: RotaRecord = create_running_record("u1");
    let now: OffsetDateTime = datetime!(2026-03-10 12:00 UTC);
    let policy: ShiftPolicy = ShiftPolicy::Fixed(Duration::minutes(1));

    let Advance::Advanced(result) = advance_shift(&record, &policy, now).unwrap() else {
        panic!("expected the shift to advance");
    };

    assert_eq!(
        result.record.shift.unwrap().end,
        datetime!(2026-03-10 12:01 UTC)
    );
}
