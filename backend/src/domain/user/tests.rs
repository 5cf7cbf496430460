//! Tests for the user model.

use super::*;
use rstest::rstest;

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("ada", UserValidationError::InvalidEmail)]
#[case("ada@", UserValidationError::InvalidEmail)]
#[case("ada lovelace@example.com", UserValidationError::InvalidEmail)]
fn rejects_invalid_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Email::new(raw).expect_err("invalid email"), expected);
}

#[rstest]
fn normalises_email_case_and_whitespace() {
    let email = Email::new("  Ada@Example.COM ").expect("valid email");
    assert_eq!(email.as_ref(), "ada@example.com");
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("  ", UserValidationError::EmptyUsername)]
fn rejects_blank_usernames(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw).expect_err("invalid username"), expected);
}

#[rstest]
fn long_usernames_are_accepted() {
    let raw = "a".repeat(200);
    let username = Username::new(&raw).expect("long username");
    assert_eq!(username.as_ref(), raw);
}

#[rstest]
fn password_hash_debug_is_redacted() {
    let hash = PasswordHash::new("$2b$04$abcdefghijklmnopqrstuv");
    assert!(!format!("{hash:?}").contains("abcdef"));
}

#[rstest]
fn user_id_parses_and_displays_hyphenated_uuid() {
    let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    let id: UserId = raw.parse().expect("valid uuid");
    assert_eq!(id.to_string(), raw);
    assert!("not-a-uuid".parse::<UserId>().is_err());
}
