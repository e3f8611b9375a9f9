//! Domain-focused tests for credentials, tokens, and roles.

use crate::session::domain::{AuthToken, Credentials, Registration, Role, SessionDomainError};
use rstest::rstest;

#[rstest]
fn credentials_normalise_email() {
    let credentials = Credentials::new("  Ada@Example.COM ", "pw").expect("valid credentials");
    assert_eq!(credentials.email(), "ada@example.com");
}

#[rstest]
#[case("")]
#[case("ada")]
#[case("@example.com")]
#[case("ada@")]
fn credentials_reject_malformed_email(#[case] email: &str) {
    let result = Credentials::new(email, "pw");
    assert!(matches!(result, Err(SessionDomainError::InvalidEmail(_))));
}

#[rstest]
fn credentials_reject_empty_password() {
    let result = Credentials::new("ada@example.com", "");
    assert_eq!(result, Err(SessionDomainError::EmptyPassword));
}

#[rstest]
fn credentials_debug_hides_password() {
    let credentials = Credentials::new("ada@example.com", "hunter2").expect("valid credentials");
    let rendered = format!("{credentials:?}");
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("ada@example.com"));
}

#[rstest]
fn registration_defaults_to_employee() {
    let registration =
        Registration::new(" Ada ", "ada@example.com", "pw").expect("valid registration");
    assert_eq!(registration.name(), "Ada");
    assert_eq!(registration.role(), Role::Employee);
    assert_eq!(
        registration.with_role(Role::Hod).role(),
        Role::Hod
    );
}

#[rstest]
fn registration_requires_a_name() {
    let result = Registration::new("   ", "ada@example.com", "pw");
    assert_eq!(result, Err(SessionDomainError::EmptyName));
}

#[rstest]
fn registration_serialises_without_missing_department() {
    let registration =
        Registration::new("Ada", "ada@example.com", "pw").expect("valid registration");
    let json = serde_json::to_value(&registration).expect("serialises");
    assert_eq!(json.get("role"), Some(&serde_json::json!("employee")));
    assert!(json.get("department").is_none());
}

#[rstest]
fn token_rejects_blank_values_and_redacts_debug() {
    assert_eq!(AuthToken::new("  "), Err(SessionDomainError::EmptyToken));
    let token = AuthToken::new("abc").expect("valid token");
    assert_eq!(token.expose(), "abc");
    assert_eq!(format!("{token:?}"), "AuthToken(***)");
}

#[rstest]
#[case("employee", Role::Employee)]
#[case("HOD", Role::Hod)]
#[case(" admin ", Role::Admin)]
fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(Role::try_from(raw).expect("known role"), expected);
}

#[rstest]
fn unknown_role_is_rejected() {
    assert!(Role::try_from("intern").is_err());
}
