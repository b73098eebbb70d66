// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{RotaRecord, Shift};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::RotaKey;

pub fn create_test_key() -> RotaKey {
    RotaKey::new("C1", "R1")
}

pub fn create_test_members() -> Vec<String> {
    vec![String::from("u1"), String::from("u2"), String::from("u3")]
}

pub fn shift_start() -> OffsetDateTime {
    datetime!(2026-03-02 09:00 UTC)
}

pub fn shift_end() -> OffsetDateTime {
    datetime!(2026-03-09 09:00 UTC)
}

pub fn create_configured_record() -> RotaRecord {
    RotaRecord::new("C1", "R1", create_test_members(), 1)
}

pub fn create_running_record(on_call_member: &str) -> RotaRecord {
    let mut record: RotaRecord = create_configured_record();
    record.shift = Some(Shift::new(on_call_member, shift_start(), shift_end()));
    record
}
