// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slack Web API notifier.
//!
//! Messages are sent as a single colored attachment. Forms are opened as
//! modals whose `private_metadata` carries the correlation token, so the
//! submission can be routed back to its rota.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rota_api::{Color, DURATION_CHOICES, FormKind, FormSpec, Notifier, NotifyError};
use rota_domain::mention;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Slack caps modal titles at this many characters.
const MAX_TITLE_LEN: usize = 24;

/// Block and action ids of the form inputs, read back on submission.
pub const ROTA_NAME_BLOCK: &str = "rota_name";
pub const ROTA_NAME_ACTION: &str = "set_rota_name";
pub const ROTA_MEMBERS_BLOCK: &str = "rota_members";
pub const ROTA_MEMBERS_ACTION: &str = "select_rota_members";
pub const ROTA_DURATION_BLOCK: &str = "rota_duration";
pub const ROTA_DURATION_ACTION: &str = "set_rota_duration";
pub const ON_CALL_MEMBER_BLOCK: &str = "on_call_member";
pub const ON_CALL_MEMBER_ACTION: &str = "set_on_call_member";

/// The parts of a Web API response the notifier looks at.
#[derive(Debug, Deserialize)]
pub struct SlackResponse {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Error code when `ok` is false.
    #[serde(default)]
    pub error: Option<String>,
    /// Timestamp id of a posted message.
    #[serde(default)]
    pub ts: Option<String>,
    /// The opened view.
    #[serde(default)]
    pub view: Option<SlackView>,
}

/// An opened modal.
#[derive(Debug, Deserialize)]
pub struct SlackView {
    /// The view id.
    pub id: String,
}

/// Posts to the Slack Web API with a bot token.
pub struct SlackNotifier {
    client: Client,
    api_url: String,
    token: String,
}

impl SlackNotifier {
    /// Creates a notifier for the Web API at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client: Client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn call(&self, method: &str, body: &Value) -> Result<SlackResponse, NotifyError> {
        let url: String = format!("{}/{method}", self.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(method, %status, "Slack API returned an HTTP error");
            return Err(NotifyError::Transport(format!("HTTP {status} from {method}")));
        }

        let parsed: SlackResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        check_response(method, parsed)
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn post_message(
        &self,
        channel_id: &str,
        text: &str,
        color: Color,
    ) -> Result<String, NotifyError> {
        let body: Value = json!({
            "channel": channel_id,
            "attachments": [attachment(text, color)],
        });

        let response: SlackResponse = self.call("chat.postMessage", &body).await?;
        debug!(channel_id, ts = ?response.ts, "Posted message");

        Ok(response.ts.unwrap_or_default())
    }

    async fn post_ephemeral(
        &self,
        channel_id: &str,
        user_id: &str,
        text: &str,
        color: Color,
    ) -> Result<(), NotifyError> {
        let body: Value = json!({
            "channel": channel_id,
            "user": user_id,
            "attachments": [attachment(text, color)],
        });

        self.call("chat.postEphemeral", &body).await?;
        debug!(channel_id, user_id, "Posted ephemeral message");

        Ok(())
    }

    async fn open_form(&self, trigger_id: &str, form: &FormSpec) -> Result<String, NotifyError> {
        let body: Value = json!({
            "trigger_id": trigger_id,
            "view": build_view(form),
        });

        let response: SlackResponse = self.call("views.open", &body).await?;

        Ok(response.view.map(|v| v.id).unwrap_or_default())
    }
}

/// Turns a response with `ok: false` into a rejection.
///
/// # Errors
///
/// Returns `NotifyError::Rejected` carrying the platform's error code.
pub fn check_response(method: &str, response: SlackResponse) -> Result<SlackResponse, NotifyError> {
    if response.ok {
        return Ok(response);
    }

    let error: String = response
        .error
        .unwrap_or_else(|| String::from("unknown_error"));
    warn!(method, error = %error, "Slack API rejected the call");

    Err(NotifyError::Rejected {
        method: method.to_string(),
        error,
    })
}

/// A single colored attachment.
#[must_use]
pub fn attachment(text: &str, color: Color) -> Value {
    json!({
        "color": color.hex(),
        "text": text,
    })
}

/// Builds the modal view for a form.
#[must_use]
pub fn build_view(form: &FormSpec) -> Value {
    let mut blocks: Vec<Value> = Vec::new();

    match form.kind {
        FormKind::CreateRota => {
            blocks.push(rota_name_block());
            blocks.push(members_block(&form.members));
            blocks.push(duration_block(form.duration_weeks));
        }
        FormKind::UpdateRota => {
            blocks.push(members_block(&form.members));
            blocks.push(duration_block(form.duration_weeks));
        }
        FormKind::StartRota => {
            blocks.push(on_call_member_block(&form.members));
        }
    }

    if let Some(note) = &form.note {
        blocks.push(json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": note },
        }));
    }

    json!({
        "type": "modal",
        "callback_id": form.kind.callback_id(),
        "title": plain_text(&truncate_title(&form.title)),
        "close": plain_text("Close"),
        "submit": plain_text("Save"),
        "private_metadata": form.token,
        "blocks": blocks,
    })
}

fn truncate_title(title: &str) -> String {
    title.chars().take(MAX_TITLE_LEN).collect()
}

fn plain_text(text: &str) -> Value {
    json!({ "type": "plain_text", "text": text })
}

fn rota_name_block() -> Value {
    json!({
        "type": "input",
        "block_id": ROTA_NAME_BLOCK,
        "label": plain_text("Rota Name"),
        "element": {
            "type": "plain_text_input",
            "action_id": ROTA_NAME_ACTION,
            "placeholder": plain_text("New rota name"),
            "max_length": rota_domain::MAX_ROTA_NAME_LEN,
        },
    })
}

fn members_block(members: &[String]) -> Value {
    json!({
        "type": "input",
        "block_id": ROTA_MEMBERS_BLOCK,
        "label": plain_text("Select members of your rota"),
        "element": {
            "type": "multi_users_select",
            "action_id": ROTA_MEMBERS_ACTION,
            "initial_users": members,
        },
    })
}

fn duration_option(weeks: u32) -> Value {
    let label: String = if weeks == 1 {
        String::from("1 week")
    } else {
        format!("{weeks} weeks")
    };
    json!({
        "value": weeks.to_string(),
        "text": plain_text(&label),
    })
}

fn duration_block(selected: Option<u32>) -> Value {
    let options: Vec<Value> = DURATION_CHOICES.iter().copied().map(duration_option).collect();

    let mut element: Value = json!({
        "type": "radio_buttons",
        "action_id": ROTA_DURATION_ACTION,
        "options": options,
    });

    if let Some(weeks) = selected.filter(|w| DURATION_CHOICES.contains(w)) {
        element["initial_option"] = duration_option(weeks);
    }

    json!({
        "type": "input",
        "block_id": ROTA_DURATION_BLOCK,
        "label": plain_text("How long is one rota shift?"),
        "element": element,
    })
}

fn on_call_member_block(members: &[String]) -> Value {
    let options: Vec<Value> = members
        .iter()
        .map(|m| {
            json!({
                "value": m,
                "text": plain_text(&mention(m)),
            })
        })
        .collect();

    json!({
        "type": "input",
        "block_id": ON_CALL_MEMBER_BLOCK,
        "label": plain_text("Who should be on duty for this shift?"),
        "element": {
            "type": "static_select",
            "action_id": ON_CALL_MEMBER_ACTION,
            "options": options,
        },
    })
}
