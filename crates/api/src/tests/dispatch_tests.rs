// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Action routing.

use super::helpers::{TestHarness, create_test_harness, create_test_now, create_test_rota};
use crate::{Action, ActionOutcome, ApiError, Color, FormToken, dispatch};

#[test]
fn test_action_is_tagged_by_action_id() {
    let action: Action = serde_json::from_str(
        r#"{"action":"stop_rota","channel_id":"C1","user_id":"u1","rota_name":"R1"}"#,
    )
    .unwrap();

    assert_eq!(
        action,
        Action::StopRota {
            channel_id: String::from("C1"),
            user_id: String::from("u1"),
            rota_name: String::from("R1"),
        }
    );
    assert_eq!(action.action_id(), "stop_rota");
}

#[test]
fn test_unknown_action_id_does_not_parse() {
    let parsed: Result<Action, serde_json::Error> =
        serde_json::from_str(r#"{"action":"delete_rota","channel_id":"C1"}"#);
    assert!(parsed.is_err());
}

#[test]
fn test_reply_target_of_form_submission_comes_from_token() {
    let token: String = FormToken::for_rota("C7", "R1").encode().unwrap();
    let action: Action = Action::UpdateRota {
        token,
        user_id: String::from("u1"),
        members: Vec::new(),
        duration_weeks: 1,
    };

    assert_eq!(
        action.reply_target(),
        Some((String::from("C7"), String::from("u1")))
    );
}

#[tokio::test]
async fn test_dispatch_create_submission_uses_token_channel() {
    let harness: TestHarness = create_test_harness();
    let action: Action = Action::CreateRota {
        token: FormToken::for_rota("C1", "").encode().unwrap(),
        user_id: String::from("creator"),
        rota_name: String::from("R1"),
        members: vec![String::from("u1")],
        duration_weeks: 1,
    };

    let outcome: ActionOutcome = dispatch(&harness.commands, action, create_test_now())
        .await
        .unwrap();

    let ActionOutcome::Rota { details } = outcome else {
        panic!("expected rota details");
    };
    assert_eq!(details.channel_id, "C1");
    assert_eq!(
        harness.commands.list_rota_names("C1").await.unwrap(),
        vec![String::from("R1")]
    );
}

#[tokio::test]
async fn test_dispatch_rejection_is_shown_to_acting_user() {
    let harness: TestHarness = create_test_harness();
    create_test_rota(&harness, &["u1"], 1).await;

    let err: ApiError = dispatch(
        &harness.commands,
        Action::StopRota {
            channel_id: String::from("C1"),
            user_id: String::from("u1"),
            rota_name: String::from("R1"),
        },
        create_test_now(),
    )
    .await
    .unwrap_err();

    assert!(err.is_rejection());
    assert_eq!(
        harness.notifier.ephemerals().last().unwrap(),
        &(
            String::from("[R1] Can't stop an on-call shift that has yet to start."),
            Color::Failure
        )
    );
}

#[tokio::test]
async fn test_dispatch_channel_prompt_returns_names() {
    let harness: TestHarness = create_test_harness();
    create_test_rota(&harness, &["u1"], 1).await;

    let outcome: ActionOutcome = dispatch(
        &harness.commands,
        Action::ChannelPrompt {
            channel_id: String::from("C1"),
            user_id: String::from("u1"),
        },
        create_test_now(),
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::RotaNames {
            rota_names: vec![String::from("R1")]
        }
    );
}

#[tokio::test]
async fn test_dispatch_start_prompt_then_submission_starts_shift() {
    let harness: TestHarness = create_test_harness();
    create_test_rota(&harness, &["u1", "u2"], 1).await;

    let opened: ActionOutcome = dispatch(
        &harness.commands,
        Action::StartRotaPrompt {
            channel_id: String::from("C1"),
            user_id: String::from("u1"),
            rota_name: String::from("R1"),
            trigger_id: String::from("T1"),
        },
        create_test_now(),
    )
    .await
    .unwrap();
    assert!(matches!(opened, ActionOutcome::FormOpened { .. }));

    let token: String = harness.notifier.forms().remove(0).token;
    let outcome: ActionOutcome = dispatch(
        &harness.commands,
        Action::StartRota {
            token,
            user_id: String::from("u1"),
            on_call_member: String::from("u2"),
        },
        create_test_now(),
    )
    .await
    .unwrap();

    let ActionOutcome::Rota { details } = outcome else {
        panic!("expected rota details");
    };
    assert_eq!(details.on_call_member.as_deref(), Some("u2"));
}

#[tokio::test]
async fn test_dispatch_bad_token_is_invalid_input_without_reply() {
    let harness: TestHarness = create_test_harness();

    let err: ApiError = dispatch(
        &harness.commands,
        Action::StartRota {
            token: String::from("garbage"),
            user_id: String::from("u1"),
            on_call_member: String::from("u2"),
        },
        create_test_now(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { .. }));
    assert!(harness.notifier.sent().is_empty());
}
