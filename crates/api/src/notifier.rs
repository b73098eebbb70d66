// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The outbound seam to the chat platform.

use serde::Serialize;
use thiserror::Error;

/// Accent color attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// The action succeeded.
    Success,
    /// The action was rejected or failed.
    Failure,
}

impl Color {
    /// The hex code the platform renders.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Success => "#4af030",
            Self::Failure => "#f0303a",
        }
    }
}

/// Errors reported by a notifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The request never reached the platform or its response was unreadable.
    #[error("Notification transport failed: {0}")]
    Transport(String),
    /// The platform answered with an error.
    #[error("Platform rejected {method}: {error}")]
    Rejected {
        /// The platform method that was called.
        method: String,
        /// The error code the platform returned.
        error: String,
    },
}

/// Which form to open. Also names the callback of its submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Asks for a name, members and a duration.
    CreateRota,
    /// Asks for members and a duration, preselected from the current rota.
    UpdateRota,
    /// Asks which member takes the first shift.
    StartRota,
}

impl FormKind {
    /// The callback id submissions of this form are routed by.
    #[must_use]
    pub const fn callback_id(self) -> &'static str {
        match self {
            Self::CreateRota => "create_rota",
            Self::UpdateRota => "update_rota",
            Self::StartRota => "start_rota",
        }
    }
}

/// Shift durations offered by the create and update forms, in weeks.
pub const DURATION_CHOICES: [u32; 2] = [1, 2];

/// A presentation-neutral description of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSpec {
    /// Which form this is.
    pub kind: FormKind,
    /// Form title.
    pub title: String,
    /// The rota the form is about, if it exists yet.
    pub rota_name: Option<String>,
    /// Preselected members (create/update) or the choices offered (start).
    pub members: Vec<String>,
    /// Preselected duration, if any.
    pub duration_weeks: Option<u32>,
    /// Extra text shown above the inputs.
    pub note: Option<String>,
    /// The encoded correlation token.
    pub token: String,
}

/// Delivers messages and forms to the chat platform.
///
/// Every call is best effort from the caller's point of view: a failed
/// notification is logged and never undoes a stored change.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Posts a message visible to the whole channel. Returns the message id.
    async fn post_message(
        &self,
        channel_id: &str,
        text: &str,
        color: Color,
    ) -> Result<String, NotifyError>;

    /// Posts a message only `user_id` can see.
    async fn post_ephemeral(
        &self,
        channel_id: &str,
        user_id: &str,
        text: &str,
        color: Color,
    ) -> Result<(), NotifyError>;

    /// Opens a form in response to `trigger_id`. Returns the form id.
    async fn open_form(&self, trigger_id: &str, form: &FormSpec) -> Result<String, NotifyError>;
}
