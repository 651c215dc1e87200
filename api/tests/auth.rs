mod helper;

use axum::http::{Method, StatusCode};
use helper::{authorized, body_json, request, send, user, Mocks, TOKEN};
use kernel::model::{auth::AccessToken, user::User};
use shared::error::AppError;

#[tokio::test]
async fn register_creates_user() {
    let mut mocks = Mocks::default();
    mocks
        .user
        .expect_create()
        .withf(|u| u.email == "alice@example.com" && u.password == "password123")
        .returning(|u| {
            Ok(User {
                user_id: kernel::model::id::UserId::new(),
                name: u.name,
                email: u.email,
            })
        });

    let res = send(
        mocks.into_app(),
        request(
            Method::POST,
            "/register",
            Some(serde_json::json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "password123"
            })),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body_json(res).await;
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn register_rejects_short_password() {
    let res = send(
        Mocks::default().into_app(),
        request(
            Method::POST,
            "/register",
            Some(serde_json::json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "short"
            })),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(res).await["errors"]["password"].is_array());
}

#[tokio::test]
async fn login_issues_bearer_token() {
    let alice = user("Alice");
    let user_id = alice.user_id;
    let mut mocks = Mocks::default();
    mocks
        .auth
        .expect_verify_user()
        .withf(|email, password| email == "alice@example.com" && password == "password123")
        .returning(move |_, _| Ok(user_id));
    mocks
        .auth
        .expect_create_token()
        .withf(move |t| t.user_id == user_id)
        .returning(|t| Ok(AccessToken(t.access_token)));

    let res = send(
        mocks.into_app(),
        request(
            Method::POST,
            "/login",
            Some(serde_json::json!({
                "email": "alice@example.com",
                "password": "password123"
            })),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user_id"], user_id.to_string());
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn login_with_bad_credentials_is_401() {
    let mut mocks = Mocks::default();
    mocks
        .auth
        .expect_verify_user()
        .returning(|_, _| Err(AppError::UnauthenticatedError));

    let res = send(
        mocks.into_app(),
        request(
            Method::POST,
            "/login",
            Some(serde_json::json!({
                "email": "alice@example.com",
                "password": "wrong-password"
            })),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res).await["message"], "Invalid credentials.");
}

#[tokio::test]
async fn profile_requires_token() {
    let res = send(
        Mocks::default().into_app(),
        request(Method::GET, "/profile", None),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res).await["message"], "Unauthenticated.");
}

#[tokio::test]
async fn unknown_token_is_401() {
    let mut mocks = Mocks::default();
    mocks
        .auth
        .expect_fetch_user_id_from_token()
        .returning(|_| Ok(None));

    let res = send(
        mocks.into_app(),
        authorized(request(Method::GET, "/profile", None)),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_returns_current_user() {
    let alice = user("Alice");
    let mut mocks = Mocks::default();
    mocks.authorize(alice.clone());

    let res = send(
        mocks.into_app(),
        authorized(request(Method::GET, "/profile", None)),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["id"], alice.user_id.to_string());
    assert_eq!(body["name"], "Alice");
}

#[tokio::test]
async fn logout_revokes_token() {
    let mut mocks = Mocks::default();
    mocks.authorize(user("Alice"));
    mocks
        .auth
        .expect_delete_token()
        .withf(|t| t.0 == TOKEN)
        .times(1)
        .returning(|_| Ok(()));

    let res = send(
        mocks.into_app(),
        authorized(request(Method::POST, "/logout", None)),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["message"], "Logged out successfully");
}

#[tokio::test]
async fn health_endpoints() {
    let mut mocks = Mocks::default();
    mocks.health.expect_check_db().returning(|| false);
    let app = mocks.into_app();

    let res = send(app.clone(), request(Method::GET, "/health", None)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(app, request(Method::GET, "/health/db", None)).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
