mod common;

use auth::TokenError;
use auth::TokenKind;
use bank_service::session::errors::SessionError;
use bank_service::session::models::ClientMetadata;
use bank_service::session::models::LoginCommand;
use bank_service::session::models::TokenDurations;
use bank_service::user::models::CreateUserCommand;
use bank_service::user::models::EmailAddress;
use bank_service::user::models::FullName;
use bank_service::user::models::Username;
use chrono::Duration;
use common::TestApp;

async fn register_alice(app: &TestApp) {
    app.state
        .user_service
        .create_user(CreateUserCommand::new(
            Username::new("alice".to_string()).unwrap(),
            FullName::new("Alice Liddell".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "s3cret-pass".to_string(),
        ))
        .await
        .expect("Failed to create alice");
}

fn login(password: &str) -> LoginCommand {
    LoginCommand {
        username: Username::new("alice".to_string()).unwrap(),
        password: password.to_string(),
        metadata: ClientMetadata {
            user_agent: "integration-test".to_string(),
            client_ip: "198.51.100.1".to_string(),
        },
    }
}

async fn full_lifecycle(kind: TokenKind) {
    let app = TestApp::new(kind);
    register_alice(&app).await;

    let login = app
        .state
        .session_service
        .login_user(login("s3cret-pass"))
        .await
        .expect("Failed to log in");

    assert_eq!(login.user.username.as_str(), "alice");
    assert!(login.refresh_token_expires_at > login.access_token_expires_at);

    let stored = app.sessions.get(&login.session_id).await.unwrap();
    assert_eq!(stored.refresh_token, login.refresh_token);
    assert_eq!(stored.user_agent, "integration-test");
    assert_eq!(stored.client_ip, "198.51.100.1");
    assert!(!stored.is_blocked);

    // Both tokens verify and name alice; the refresh id is the session id.
    let access = app.state.authenticator.verify_token(&login.access_token).unwrap();
    let refresh = app.state.authenticator.verify_token(&login.refresh_token).unwrap();
    assert_eq!(access.username, "alice");
    assert_eq!(refresh.id, login.session_id);

    let renewed = app
        .state
        .session_service
        .renew_access_token(&login.refresh_token)
        .await
        .expect("Failed to renew");
    assert_ne!(renewed.access_token, login.access_token);
    assert!(renewed.access_token_expires_at >= login.access_token_expires_at);
    assert_eq!(
        app.state
            .authenticator
            .verify_token(&renewed.access_token)
            .unwrap()
            .username,
        "alice"
    );

    // The refresh token is not rotated and stays usable.
    app.state
        .session_service
        .renew_access_token(&login.refresh_token)
        .await
        .expect("Failed to renew twice");

    let blocked = app
        .state
        .session_service
        .block_session(&access, login.session_id)
        .await
        .expect("Failed to block");
    assert!(blocked.is_blocked);

    let result = app
        .state
        .session_service
        .renew_access_token(&login.refresh_token)
        .await;
    assert!(matches!(result, Err(SessionError::SessionRevoked)));

    // Blocking twice is not an error.
    app.state
        .session_service
        .block_session(&access, login.session_id)
        .await
        .expect("Failed to block again");
}

#[tokio::test]
async fn test_session_lifecycle_with_jwt_tokens() {
    full_lifecycle(TokenKind::Jwt).await;
}

#[tokio::test]
async fn test_session_lifecycle_with_sealed_tokens() {
    full_lifecycle(TokenKind::Sealed).await;
}

#[tokio::test]
async fn test_login_with_wrong_password_creates_no_session() {
    let app = TestApp::new(TokenKind::Sealed);
    register_alice(&app).await;

    let result = app
        .state
        .session_service
        .login_user(login("not-the-password"))
        .await;

    assert!(matches!(result, Err(SessionError::InvalidCredentials)));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::new(TokenKind::Jwt);

    let result = app
        .state
        .session_service
        .login_user(login("s3cret-pass"))
        .await;

    assert!(matches!(result, Err(SessionError::UserNotFound(_))));
}

#[tokio::test]
async fn test_access_token_cannot_renew_itself() {
    let app = TestApp::new(TokenKind::Jwt);
    register_alice(&app).await;

    let login = app
        .state
        .session_service
        .login_user(login("s3cret-pass"))
        .await
        .unwrap();

    // An access token's id names no session.
    let result = app
        .state
        .session_service
        .renew_access_token(&login.access_token)
        .await;
    assert!(matches!(result, Err(SessionError::SessionNotFound(_))));
}

#[tokio::test]
async fn test_tokens_from_another_format_are_rejected() {
    let jwt_app = TestApp::new(TokenKind::Jwt);
    let sealed_app = TestApp::new(TokenKind::Sealed);
    register_alice(&jwt_app).await;

    let login = jwt_app
        .state
        .session_service
        .login_user(login("s3cret-pass"))
        .await
        .unwrap();

    let result = sealed_app
        .state
        .session_service
        .renew_access_token(&login.refresh_token)
        .await;
    assert!(matches!(
        result,
        Err(SessionError::Token(TokenError::InvalidToken))
    ));
}

#[tokio::test]
async fn test_expired_refresh_token_is_rejected() {
    let durations = TokenDurations::new(Duration::seconds(1), Duration::seconds(2)).unwrap();
    let app = TestApp::with_durations(TokenKind::Sealed, durations);
    register_alice(&app).await;

    let login = app
        .state
        .session_service
        .login_user(login("s3cret-pass"))
        .await
        .unwrap();

    // Expiry is inclusive at whole-second resolution, so wait past it.
    tokio::time::sleep(std::time::Duration::from_millis(3_100)).await;

    let result = app
        .state
        .session_service
        .renew_access_token(&login.refresh_token)
        .await;
    assert!(matches!(
        result,
        Err(SessionError::Token(TokenError::ExpiredToken))
    ));
}
