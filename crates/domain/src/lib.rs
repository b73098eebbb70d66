// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod rota;
mod shift;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use rota::{RotaRecord, ShiftState, mention};
pub use shift::{Shift, ShiftPolicy, compute_shift_end};
pub use validation::{
    MAX_DURATION_WEEKS, MAX_ROTA_NAME_LEN, next_member, validate_can_start,
    validate_duration_weeks, validate_member_in_rota, validate_rota_name,
};
