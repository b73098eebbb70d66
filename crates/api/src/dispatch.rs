// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inbound action routing.
//!
//! Every inbound user action is one `Action` variant, tagged by the action
//! id the platform sends, and `dispatch` maps each variant to its handler.
//! Rejections are reported back to the acting user as ephemeral messages.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::handlers::RotaCommands;
use crate::notifier::Color;
use crate::request_response::{CreateRotaRequest, RotaDetails, UpdateRotaRequest};
use crate::token::FormToken;

/// An inbound user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// The `/rota` command: list the channel's rotas.
    ChannelPrompt {
        /// The channel the command was issued in.
        channel_id: String,
        /// The issuing user.
        user_id: String,
    },
    /// Open the create form.
    CreateRotaPrompt {
        /// The channel the form is for.
        channel_id: String,
        /// The acting user.
        user_id: String,
        /// The platform trigger for opening a form.
        trigger_id: String,
    },
    /// Submission of the create form.
    CreateRota {
        /// The form's correlation token.
        token: String,
        /// The acting user.
        user_id: String,
        /// The entered rota name.
        rota_name: String,
        /// The selected members.
        members: Vec<String>,
        /// The selected duration in weeks.
        duration_weeks: u32,
    },
    /// Show the details of one rota.
    SelectRota {
        /// The channel the rota belongs to.
        channel_id: String,
        /// The acting user.
        user_id: String,
        /// The selected rota.
        rota_name: String,
    },
    /// Open the update form.
    UpdateRotaPrompt {
        /// The channel the rota belongs to.
        channel_id: String,
        /// The acting user.
        user_id: String,
        /// The rota to update.
        rota_name: String,
        /// The platform trigger for opening a form.
        trigger_id: String,
    },
    /// Submission of the update form.
    UpdateRota {
        /// The form's correlation token.
        token: String,
        /// The acting user.
        user_id: String,
        /// The selected members.
        members: Vec<String>,
        /// The selected duration in weeks.
        duration_weeks: u32,
    },
    /// Open the start form.
    StartRotaPrompt {
        /// The channel the rota belongs to.
        channel_id: String,
        /// The acting user.
        user_id: String,
        /// The rota to start.
        rota_name: String,
        /// The platform trigger for opening a form.
        trigger_id: String,
    },
    /// Submission of the start form.
    StartRota {
        /// The form's correlation token.
        token: String,
        /// The acting user.
        user_id: String,
        /// The member taking the first shift.
        on_call_member: String,
    },
    /// Stop the running shift.
    StopRota {
        /// The channel the rota belongs to.
        channel_id: String,
        /// The acting user.
        user_id: String,
        /// The rota to stop.
        rota_name: String,
    },
}

impl Action {
    /// The action id this variant is tagged with.
    #[must_use]
    pub const fn action_id(&self) -> &'static str {
        match self {
            Self::ChannelPrompt { .. } => "channel_prompt",
            Self::CreateRotaPrompt { .. } => "create_rota_prompt",
            Self::CreateRota { .. } => "create_rota",
            Self::SelectRota { .. } => "select_rota",
            Self::UpdateRotaPrompt { .. } => "update_rota_prompt",
            Self::UpdateRota { .. } => "update_rota",
            Self::StartRotaPrompt { .. } => "start_rota_prompt",
            Self::StartRota { .. } => "start_rota",
            Self::StopRota { .. } => "stop_rota",
        }
    }

    /// The channel and user a rejection should be shown to.
    ///
    /// Form submissions only know their channel through the token, so an
    /// undecodable token has no reply target.
    #[must_use]
    pub fn reply_target(&self) -> Option<(String, String)> {
        match self {
            Self::ChannelPrompt {
                channel_id,
                user_id,
            }
            | Self::CreateRotaPrompt {
                channel_id,
                user_id,
                ..
            }
            | Self::SelectRota {
                channel_id,
                user_id,
                ..
            }
            | Self::UpdateRotaPrompt {
                channel_id,
                user_id,
                ..
            }
            | Self::StartRotaPrompt {
                channel_id,
                user_id,
                ..
            }
            | Self::StopRota {
                channel_id,
                user_id,
                ..
            } => Some((channel_id.clone(), user_id.clone())),
            Self::CreateRota { token, user_id, .. }
            | Self::UpdateRota { token, user_id, .. }
            | Self::StartRota { token, user_id, .. } => FormToken::decode(token)
                .ok()
                .map(|t| (t.channel_id, user_id.clone())),
        }
    }
}

/// What a dispatched action produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The rota as it looks after the action.
    Rota {
        /// The rota details.
        details: RotaDetails,
    },
    /// A form was opened.
    FormOpened {
        /// The id the notifier returned for the form.
        form_id: String,
    },
    /// The channel's rota names.
    RotaNames {
        /// Rota names in name order.
        rota_names: Vec<String>,
    },
}

/// Routes an action to its handler.
///
/// Rejections are shown to the acting user and storage or internal
/// failures get a generic message; the error is returned either way.
///
/// # Errors
///
/// Returns the handler's error.
pub async fn dispatch(
    commands: &RotaCommands,
    action: Action,
    now: OffsetDateTime,
) -> Result<ActionOutcome, ApiError> {
    let action_id: &'static str = action.action_id();
    let reply_target: Option<(String, String)> = action.reply_target();

    let result: Result<ActionOutcome, ApiError> = route(commands, action, now).await;

    let Err(err) = &result else {
        return result;
    };

    if err.is_rejection() {
        info!(action = action_id, error = %err, "Action rejected");
    } else {
        error!(action = action_id, error = %err, "Action failed");
    }

    let Some((channel_id, user_id)) = reply_target else {
        return result;
    };

    if let Err(e) = commands
        .notifier()
        .post_ephemeral(&channel_id, &user_id, &err.user_message(), Color::Failure)
        .await
    {
        warn!(action = action_id, error = %e, "Failed to report rejection");
    }

    result
}

async fn route(
    commands: &RotaCommands,
    action: Action,
    now: OffsetDateTime,
) -> Result<ActionOutcome, ApiError> {
    match action {
        Action::ChannelPrompt {
            channel_id,
            user_id,
        } => {
            let rota_names: Vec<String> = commands.channel_prompt(&channel_id, &user_id).await?;
            Ok(ActionOutcome::RotaNames { rota_names })
        }
        Action::CreateRotaPrompt {
            channel_id,
            trigger_id,
            ..
        } => {
            let form_id: String = commands.create_prompt(&channel_id, &trigger_id).await?;
            Ok(ActionOutcome::FormOpened { form_id })
        }
        Action::CreateRota {
            token,
            user_id,
            rota_name,
            members,
            duration_weeks,
        } => {
            let token: FormToken = FormToken::decode(&token)?;
            let request: CreateRotaRequest = CreateRotaRequest {
                channel_id: token.channel_id,
                user_id,
                rota_name,
                members,
                duration_weeks,
            };
            let details: RotaDetails = commands.create_rota(&request, now).await?;
            Ok(ActionOutcome::Rota { details })
        }
        Action::SelectRota {
            channel_id,
            user_id,
            rota_name,
        } => {
            let details: RotaDetails = commands
                .show_rota(&channel_id, &user_id, &rota_name, now)
                .await?;
            Ok(ActionOutcome::Rota { details })
        }
        Action::UpdateRotaPrompt {
            channel_id,
            rota_name,
            trigger_id,
            ..
        } => {
            let form_id: String = commands
                .update_prompt(&channel_id, &rota_name, &trigger_id)
                .await?;
            Ok(ActionOutcome::FormOpened { form_id })
        }
        Action::UpdateRota {
            token,
            user_id,
            members,
            duration_weeks,
        } => {
            let token: FormToken = FormToken::decode(&token)?;
            let request: UpdateRotaRequest = UpdateRotaRequest {
                channel_id: token.channel_id,
                user_id,
                rota_name: token.rota_name,
                members,
                duration_weeks,
            };
            let details: RotaDetails = commands.update_rota(&request, now).await?;
            Ok(ActionOutcome::Rota { details })
        }
        Action::StartRotaPrompt {
            channel_id,
            rota_name,
            trigger_id,
            ..
        } => {
            let form_id: String = commands
                .start_rota_prompt(&channel_id, &rota_name, &trigger_id, now)
                .await?;
            Ok(ActionOutcome::FormOpened { form_id })
        }
        Action::StartRota {
            token,
            user_id,
            on_call_member,
        } => {
            let details: RotaDetails = commands
                .complete_start(&token, &user_id, &on_call_member, now)
                .await?;
            Ok(ActionOutcome::Rota { details })
        }
        Action::StopRota {
            channel_id,
            user_id,
            rota_name,
        } => {
            let details: RotaDetails = commands
                .stop_rota(&channel_id, &user_id, &rota_name, now)
                .await?;
            Ok(ActionOutcome::Rota { details })
        }
    }
}
