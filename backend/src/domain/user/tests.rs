//! Tests for the domain user model.

use super::*;
use rstest::rstest;
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    let err = UserId::new(raw).expect_err("invalid id must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn user_id_preserves_raw_text() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(id.as_ref(), VALID_ID);
    assert_eq!(id.as_uuid().to_string(), VALID_ID);
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("ada lovelace", UserValidationError::UsernameInvalidCharacters)]
#[case("semi;colon", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    let err = Username::new(raw).expect_err("invalid username must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn username_rejects_overlong_values() {
    let err = Username::new("a".repeat(USERNAME_MAX + 1)).expect_err("too long");
    assert_eq!(err, UserValidationError::UsernameTooLong { max: USERNAME_MAX });
}

#[rstest]
fn username_is_trimmed() {
    let username = Username::new("  ada.l  ").expect("valid username");
    assert_eq!(username.as_ref(), "ada.l");
}

#[rstest]
#[case("user", Role::User)]
#[case("premium", Role::Premium)]
#[case("admin", Role::Admin)]
fn role_parses_wire_names(#[case] raw: &str, #[case] expected: Role) {
    let role: Role = raw.parse().expect("known role");
    assert_eq!(role, expected);
    assert_eq!(role.as_str(), raw);
}

#[rstest]
fn role_rejects_unknown_names() {
    let err = "owner".parse::<Role>().expect_err("unknown role");
    assert_eq!(err.input, "owner");
}

#[rstest]
fn user_serialises_with_camel_case_and_snake_case_role() {
    let user = User::try_from_strings(VALID_ID, "ada", Role::Premium).expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({"id": VALID_ID, "username": "ada", "role": "premium"})
    );
}

#[rstest]
fn with_role_replaces_only_the_role() {
    let user = User::try_from_strings(VALID_ID, "ada", Role::User).expect("valid user");
    let promoted = user.clone().with_role(Role::Admin);
    assert_eq!(promoted.role(), Role::Admin);
    assert_eq!(promoted.id(), user.id());
    assert_eq!(promoted.username(), user.username());
}
