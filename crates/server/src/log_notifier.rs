// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use async_trait::async_trait;
use rota_api::{Color, FormSpec, Notifier, NotifyError};
use time::OffsetDateTime;
use tracing::info;

/// A notifier that only logs what it would have sent.
///
/// Used when no Slack token is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn post_message(
        &self,
        channel_id: &str,
        text: &str,
        color: Color,
    ) -> Result<String, NotifyError> {
        info!(channel_id, color = color.hex(), text, "Message");
        Ok(OffsetDateTime::now_utc().unix_timestamp().to_string())
    }

    async fn post_ephemeral(
        &self,
        channel_id: &str,
        user_id: &str,
        text: &str,
        color: Color,
    ) -> Result<(), NotifyError> {
        info!(channel_id, user_id, color = color.hex(), text, "Ephemeral message");
        Ok(())
    }

    async fn open_form(&self, trigger_id: &str, form: &FormSpec) -> Result<String, NotifyError> {
        info!(
            trigger_id,
            callback_id = form.kind.callback_id(),
            title = %form.title,
            "Form"
        );
        Ok(format!("log-{trigger_id}"))
    }
}
