use crate::connection::Identity;

use serde_json::json;

/// **VALUE**: Verifies that a full identity payload is parsed.
///
/// **WHY THIS MATTERS**: The identity endpoint returns more than the username; the UI shows
/// the display name and checks roles before offering uploads.
///
/// **BUG THIS CATCHES**: Would catch field renames that silently drop optional data.
#[test]
fn given_full_payload_when_parsed_then_reads_user_roles_and_org() {
    // GIVEN: A payload shaped like the server's identity response
    let payload = json!({
        "user": {
            "username": "alice",
            "name": "Alice Example",
            "email": "alice@example.org",
            "provider": "opencast"
        },
        "roles": ["ROLE_USER", "ROLE_STUDIO"],
        "org": { "id": "mh_default_org", "name": "Default" },
        "userRole": "ROLE_USER_ALICE"
    });

    // WHEN: Parsing
    let identity: Identity = serde_json::from_value(payload).unwrap();

    // THEN: Required and optional fields are read, unknown fields ignored
    assert_eq!(identity.username(), "alice");
    assert_eq!(identity.user.name.as_deref(), Some("Alice Example"));
    assert_eq!(identity.user.email.as_deref(), Some("alice@example.org"));
    assert!(identity.has_role("ROLE_STUDIO"));
    assert!(!identity.has_role("ROLE_ADMIN"));
    assert_eq!(
        identity.org.and_then(|o| o.id).as_deref(),
        Some("mh_default_org")
    );
    assert!(!serde_json::from_value::<Identity>(json!({"user": {"username": "x"}}))
        .unwrap()
        .is_anonymous());
}

/// **VALUE**: Verifies the anonymous sentinel.
///
/// **WHY THIS MATTERS**: `anonymous` is how the server says "not logged in". Every
/// state decision after a successful identity check hinges on this comparison.
///
/// **BUG THIS CATCHES**: Would catch a case-insensitive or prefix comparison.
#[test]
fn given_anonymous_payload_when_parsed_then_is_anonymous() {
    let identity: Identity =
        serde_json::from_value(json!({"user": {"username": "anonymous"}})).unwrap();

    assert!(identity.is_anonymous());
    assert!(identity.roles.is_empty());
    assert!(identity.org.is_none());

    let similar: Identity =
        serde_json::from_value(json!({"user": {"username": "Anonymous"}})).unwrap();
    assert!(!similar.is_anonymous());
}

/// **VALUE**: Verifies that a payload without `user.username` is rejected.
///
/// **WHY THIS MATTERS**: A body that parses as JSON but lacks the username cannot be used
/// to decide the state; it must end in `InvalidResponse`.
///
/// **BUG THIS CATCHES**: Would catch if `username` got a serde default.
#[test]
fn given_payload_without_username_when_parsed_then_fails() {
    assert!(serde_json::from_value::<Identity>(json!({})).is_err());
    assert!(serde_json::from_value::<Identity>(json!({"user": {}})).is_err());
    assert!(serde_json::from_value::<Identity>(json!({"user": {"username": 7}})).is_err());
}
