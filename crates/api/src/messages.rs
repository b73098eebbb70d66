// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User-facing message text.

use rota_domain::mention;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc2822;

use crate::request_response::RotaDetails;

/// Announces a new on-call member to the channel.
#[must_use]
pub fn new_on_call(rota_name: &str, member: &str) -> String {
    format!("[{rota_name}] The new on-call person is: {}", mention(member))
}

/// Announces an automatic hand-over at the end of a shift.
#[must_use]
pub fn now_on_duty(rota_name: &str, member: &str) -> String {
    format!("[{rota_name}] {} now on duty!", mention(member))
}

/// Confirms a stopped shift.
#[must_use]
pub fn shift_stopped(rota_name: &str) -> String {
    format!("[{rota_name}] OK, I've stopped the current on-call shift.")
}

/// Shown by the channel prompt when the channel has no rotas.
pub const NO_ROTAS: &str = "Looks like this channel does not have any rotas. Shall we create one?";

/// Heads the channel prompt's list of rotas.
pub const WHICH_ROTA: &str = "Which rota do you want to look at?";

/// The channel prompt text for `names`.
#[must_use]
pub fn channel_rotas(names: &[String]) -> String {
    if names.is_empty() {
        return String::from(NO_ROTAS);
    }
    let listed: Vec<String> = names.iter().map(|n| format!("• {n}")).collect();
    format!("{WHICH_ROTA}\n{}", listed.join("\n"))
}

/// The note shown on a start form.
#[must_use]
pub fn shift_will_end(end: OffsetDateTime) -> String {
    format!("*Their on-call shift will end on: {}*", format_time(end))
}

/// Renders the details view of a rota as text.
#[must_use]
pub fn rota_details(details: &RotaDetails) -> String {
    let mut lines: Vec<String> = vec![
        details.rota_name.clone(),
        format!(
            "Duration of an on-call shift: {} week(s)",
            details.duration_weeks
        ),
    ];

    if details.members.is_empty() {
        lines.push(String::from(
            "The rota is empty. Shall we pull in some members?",
        ));
        return lines.join("\n");
    }

    match (&details.on_call_member, &details.shift_end) {
        (Some(member), Some(end)) => lines.push(format!(
            "*The current on-call person is: {} (shift ends at {end})*",
            mention(member)
        )),
        _ => lines.push(String::from("*The rota has not started yet.*")),
    }

    let members: Vec<String> = details
        .members
        .iter()
        .map(|m| format!("• {}", mention(m)))
        .collect();
    lines.push(format!("Current rota members:\n{}", members.join("\n")));

    lines.join("\n")
}

fn format_time(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(&Rfc2822)
        .unwrap_or_else(|_| timestamp.to_string())
}
