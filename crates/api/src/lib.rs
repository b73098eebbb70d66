// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command handlers, action routing and the shift scheduler.
//!
//! Everything here talks to the outside world through two seams:
//! `RotaStore` for persistence and `Notifier` for the chat platform.

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
#![allow(clippy::multiple_crate_versions)]

mod dispatch;
mod error;
mod handlers;
mod messages;
mod notifier;
mod request_response;
mod scheduler;
mod store;
mod token;

#[cfg(test)]
mod tests;

pub use dispatch::{Action, ActionOutcome, dispatch};
pub use error::{ApiError, GENERIC_FAILURE_MESSAGE, translate_core_error};
pub use handlers::RotaCommands;
pub use notifier::{Color, DURATION_CHOICES, FormKind, FormSpec, Notifier, NotifyError};
pub use request_response::{
    AvailableAction, CreateRotaRequest, ListRotasResponse, RotaDetails, StartRotaRequest,
    UpdateRotaRequest,
};
pub use scheduler::{DEFAULT_SWEEP_INTERVAL, ShiftScheduler, SweepReport};
pub use store::{DEFAULT_STORAGE_TIMEOUT, RotaStore, SharedPersistence, persist_transition};
pub use token::{FORM_TOKEN_VERSION, FormToken, TokenError};
