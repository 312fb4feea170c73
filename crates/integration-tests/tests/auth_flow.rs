//! End-to-end authentication flow: registration, login, token guard.

#![allow(clippy::unwrap_used)]

use serde_json::Value;

use shoplist_core::UserId;
use shoplist_integration_tests::TestContext;

#[tokio::test]
async fn register_returns_token_and_normalized_user() {
    let ctx = TestContext::spawn().await;

    let (token, user) = ctx.register("alice", "  Alice@Example.COM ", "password123").await;

    assert!(!token.is_empty());
    assert_eq!(user["username"], "alice");
    assert_eq!(user["email"], "alice@example.com");
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());

    // The issued token is immediately usable.
    let response = ctx
        .client
        .get(ctx.url("/api/auth/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["username"], "alice");
}

#[tokio::test]
async fn register_rejects_duplicate_email_and_username() {
    let ctx = TestContext::spawn().await;
    ctx.register("alice", "alice@example.com", "password123").await;

    for payload in [
        // Same email, different username.
        serde_json::json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "password123",
        }),
        // Same username, different email.
        serde_json::json!({
            "username": "alice",
            "email": "alice2@example.com",
            "password": "password123",
        }),
    ] {
        let response = ctx
            .client
            .post(ctx.url("/api/auth/register"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);

        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["message"],
            "User already exists with this email or username"
        );
    }
}

#[tokio::test]
async fn register_lists_every_violated_field() {
    let ctx = TestContext::spawn().await;

    let response = ctx
        .client
        .post(ctx.url("/api/auth/register"))
        .json(&serde_json::json!({
            "username": "ab",
            "email": "not-an-email",
            "password": "123",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["username", "email", "password"]);
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials_only() {
    let ctx = TestContext::spawn().await;
    ctx.register("alice", "alice@example.com", "password123").await;

    let response = ctx
        .client
        .post(ctx.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "alice@example.com",
            "password": "password123",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["token"].as_str().is_some());

    // Wrong password and unknown email fail with the same message, so
    // callers cannot tell whether the email exists.
    let mut messages = Vec::new();
    for (email, password) in [
        ("alice@example.com", "wrongpassword"),
        ("nobody@example.com", "password123"),
    ] {
        let response = ctx
            .client
            .post(ctx.url("/api/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 401);
        let body: Value = response.json().await.unwrap();
        messages.push(body["message"].as_str().unwrap().to_owned());
    }
    assert_eq!(messages.first(), messages.last());
}

#[tokio::test]
async fn guard_rejects_each_failure_shape() {
    let ctx = TestContext::spawn().await;

    // No Authorization header at all.
    let response = ctx
        .client
        .get(ctx.url("/api/shopping-lists"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Not authorized, no token");

    // Token without the Bearer scheme prefix.
    let (token, _) = ctx.register("alice", "alice@example.com", "password123").await;
    let response = ctx
        .client
        .get(ctx.url("/api/shopping-lists"))
        .header("Authorization", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Not authorized, no token");

    // Malformed token.
    let response = ctx
        .client
        .get(ctx.url("/api/shopping-lists"))
        .bearer_auth("invalid-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Not authorized, token failed");

    // Well-signed token whose user id resolves to nothing.
    let phantom = ctx.state.tokens().issue(UserId::generate()).unwrap();
    let response = ctx
        .client
        .get(ctx.url("/api/shopping-lists"))
        .bearer_auth(phantom)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User not found");
}
