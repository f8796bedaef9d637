//! Tests for user identifiers, emails and credential wrappers.

use super::*;
use chrono::TimeZone;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(0)]
#[case(-1)]
#[case(i64::MIN)]
fn user_id_rejects_non_positive(#[case] raw: i64) {
    let err = UserId::new(raw).expect_err("non-positive ids must fail");
    assert_eq!(err, ValidationError::NonPositiveId { entity: "user" });
}

#[rstest]
fn user_id_deserialises_through_validation() {
    let ok: UserId = serde_json::from_value(json!(7)).expect("positive id");
    assert_eq!(ok.get(), 7);
    assert!(serde_json::from_value::<UserId>(json!(0)).is_err());
}

#[rstest]
#[case("a@x.com")]
#[case("Mixed.Case+tag@sub.domain.io")]
fn email_accepts_valid_shapes(#[case] raw: &str) {
    let email = Email::new(raw).expect("valid email");
    assert_eq!(email.as_str(), raw);
}

#[rstest]
#[case("")]
#[case("plain")]
#[case("a@b")]
#[case("a b@x.com")]
fn email_rejects_invalid_shapes(#[case] raw: &str) {
    assert_eq!(Email::new(raw), Err(ValidationError::InvalidEmail));
}

fn email_of_length(len: usize) -> String {
    let domain = "@example.com";
    format!("{}{domain}", "a".repeat(len - domain.len()))
}

#[rstest]
fn email_at_column_limit_is_accepted() {
    let raw = email_of_length(EMAIL_MAX);
    let email = Email::new(raw.as_str()).expect("email at limit");
    assert_eq!(email.as_str().len(), EMAIL_MAX);
}

#[rstest]
#[case(EMAIL_MAX + 1)]
#[case(412)]
fn email_longer_than_column_is_rejected(#[case] len: usize) {
    let raw = email_of_length(len);
    assert_eq!(
        Email::new(raw),
        Err(ValidationError::EmailTooLong { max: EMAIL_MAX })
    );
}

#[rstest]
fn password_rejects_empty_but_keeps_whitespace() {
    assert_eq!(Password::new("").map(|_| ()), Err(ValidationError::EmptyPassword));
    let password = Password::new(" pw ").expect("non-empty password");
    assert_eq!(password.expose(), " pw ");
}

#[rstest]
fn secrets_are_redacted_in_debug_output() {
    let password = Password::new("hunter2").expect("password");
    let hash = HashedPassword::new("$2b$10$abcdef");
    assert!(!format!("{password:?}").contains("hunter2"));
    assert!(!format!("{hash:?}").contains("abcdef"));
}

#[rstest]
fn user_serialisation_omits_hash() {
    let registered_at = Utc
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let user = User::new(
        UserId::new(3).expect("id"),
        Email::new("a@x.com").expect("email"),
        HashedPassword::new("$2b$10$secret"),
        registered_at,
    );

    let value = serde_json::to_value(&user).expect("user serialises");
    assert_eq!(value["id"], json!(3));
    assert_eq!(value["email"], json!("a@x.com"));
    assert!(value.get("hashedPassword").is_none());
    assert!(value.get("registeredAt").is_some());
}
