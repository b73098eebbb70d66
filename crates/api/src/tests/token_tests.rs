// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;

use crate::{FORM_TOKEN_VERSION, FormToken, TokenError};

#[test]
fn test_pending_shift_token_decodes_to_same_times() {
    let token: FormToken = FormToken::for_pending_shift(
        "C1",
        "R1",
        datetime!(2026-03-02 09:00 UTC),
        datetime!(2026-03-09 09:00 UTC),
    );

    let decoded: FormToken = FormToken::decode(&token.encode().unwrap()).unwrap();

    assert_eq!(decoded, token);
    assert_eq!(
        decoded.pending_shift().unwrap(),
        Some((
            datetime!(2026-03-02 09:00 UTC),
            datetime!(2026-03-09 09:00 UTC)
        ))
    );
}

#[test]
fn test_rota_token_has_no_pending_shift() {
    let token: FormToken = FormToken::for_rota("C1", "R1");

    assert_eq!(token.version, FORM_TOKEN_VERSION);
    assert_eq!(token.pending_shift().unwrap(), None);
    assert!(!token.encode().unwrap().contains("shift_start"));
}

#[test]
fn test_decode_rejects_other_versions() {
    let encoded: &str = r#"{"version":99,"channel_id":"C1","rota_name":"R1"}"#;

    let err: TokenError = FormToken::decode(encoded).unwrap_err();

    assert_eq!(
        err,
        TokenError::UnsupportedVersion {
            found: 99,
            expected: FORM_TOKEN_VERSION
        }
    );
}

#[test]
fn test_decode_rejects_garbage() {
    let err: TokenError = FormToken::decode("not json").unwrap_err();
    assert!(matches!(err, TokenError::Malformed(_)));
}

#[test]
fn test_out_of_range_timestamp_is_reported() {
    let token: FormToken = FormToken {
        shift_start: Some(i64::MAX),
        shift_end: Some(0),
        ..FormToken::for_rota("C1", "R1")
    };

    assert!(matches!(
        token.pending_shift(),
        Err(TokenError::InvalidTimestamp(_))
    ));
}
