// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod scan_tests;

use rota_domain::Shift;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub fn create_test_members() -> Vec<String> {
    vec![String::from("u1"), String::from("u2")]
}

pub fn create_test_start() -> OffsetDateTime {
    datetime!(2026-03-02 09:00 UTC)
}

pub fn create_test_shift(member: &str) -> Shift {
    Shift::new(
        member,
        create_test_start(),
        create_test_start() + time::Duration::weeks(1),
    )
}

/// Creates an in-memory store holding `C1/R1` with two members and a
/// one-week duration.
pub fn create_test_persistence_with_rota() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .put_rota("C1", "R1", &create_test_members(), 1)
        .unwrap();
    persistence
}
