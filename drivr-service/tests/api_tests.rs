mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

const CREDENTIALS_MESSAGE: &str = "Could not validate the user credentials.";

async fn message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["message"]
        .as_str()
        .expect("Missing error message")
        .to_string()
}

// Login

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("alice@example.com", "pass_word!", true, false).await;

    let response = app.login("alice@example.com", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    let payload = app.tokens.decode(token, Utc::now()).unwrap();
    assert_eq!(payload.sub, user.id.to_string());

    // The token works against an active-only route
    let response = app
        .get_authenticated("/users/me", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.seed_user("alice@example.com", "pass_word!", true, false).await;

    let response = app.login("alice@example.com", "wrong").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(response).await, "Incorrect email or password.");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app.login("nobody@example.com", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(response).await, "Incorrect email or password.");
}

#[tokio::test]
async fn test_login_inactive_user() {
    let app = TestApp::spawn().await;
    app.seed_user("idle@example.com", "pass_word!", false, false).await;

    let response = app.login("idle@example.com", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(response).await, "Inactive user.");
}

// Token resolution and gates

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(response).await, "Not authenticated");
}

#[tokio::test]
async fn test_invalid_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/users/me", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(message(response).await, CREDENTIALS_MESSAGE);
}

#[tokio::test]
async fn test_expired_token() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("alice@example.com", "pass_word!", true, false).await;

    let issued_at = Utc::now() - Duration::days(9);
    let token = app.tokens.issue(&user.id.to_string(), issued_at).unwrap();

    let response = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(message(response).await, CREDENTIALS_MESSAGE);
}

#[tokio::test]
async fn test_subject_that_is_not_a_user_id() {
    let app = TestApp::spawn().await;
    let token = app.tokens.issue("42", Utc::now()).unwrap();

    let response = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(message(response).await, CREDENTIALS_MESSAGE);
}

#[tokio::test]
async fn test_token_for_deleted_user() {
    let app = TestApp::spawn().await;
    let moderator = app.seed_user("mod@example.com", "pass_word!", true, true).await;
    let user = app.seed_user("alice@example.com", "pass_word!", true, false).await;
    let token = app.token_for(&user);

    let response = app
        .delete_authenticated(&format!("/users/{}", user.id), &app.token_for(&moderator))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(message(response).await, "User not found.");
}

#[tokio::test]
async fn test_inactive_user_refused_on_active_route() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("idle@example.com", "pass_word!", false, false).await;

    let response = app
        .get_authenticated("/reports", &app.token_for(&user))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(response).await, "The user is inactive.");
}

#[tokio::test]
async fn test_non_moderator_refused_on_moderator_route() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("alice@example.com", "pass_word!", true, false).await;

    let response = app
        .get_authenticated("/users", &app.token_for(&user))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        message(response).await,
        "You must be moderator to perform this action."
    );
}

#[tokio::test]
async fn test_deactivation_takes_effect_for_existing_tokens() {
    let app = TestApp::spawn().await;
    let moderator = app.seed_user("mod@example.com", "pass_word!", true, true).await;
    let user = app.seed_user("alice@example.com", "pass_word!", true, false).await;
    let token = app.token_for(&user);

    let response = app
        .patch_authenticated(&format!("/users/{}", user.id), &app.token_for(&moderator))
        .json(&json!({ "is_active": false }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// Users

#[tokio::test]
async fn test_register_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .json(&json!({
            "email": "alice@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["is_active"], true);
    assert_eq!(body["data"]["is_moderator"], false);
    assert!(body["data"]["id"].is_string());
    assert!(body["data"].get("password_hash").is_none());

    let response = app.login("alice@example.com", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.seed_user("alice@example.com", "pass_word!", true, false).await;

    let response = app
        .post("/users")
        .json(&json!({
            "email": "alice@example.com",
            "password": "other"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(message(response).await.contains("already exists"));
}

#[tokio::test]
async fn test_register_empty_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .json(&json!({
            "email": "alice@example.com",
            "password": ""
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .json(&json!({
            "email": "not-an-email",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_current_user_password() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("alice@example.com", "old_pass", true, false).await;

    let response = app
        .patch_authenticated("/users/me", &app.token_for(&user))
        .json(&json!({ "password": "new_pass" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.login("alice@example.com", "old_pass").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.login("alice@example.com", "new_pass").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_current_user_cannot_grant_moderator() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("alice@example.com", "pass_word!", true, false).await;

    let response = app
        .patch_authenticated("/users/me", &app.token_for(&user))
        .json(&json!({ "is_moderator": true }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["is_moderator"], false);
}

#[tokio::test]
async fn test_moderator_lists_users() {
    let app = TestApp::spawn().await;
    let moderator = app.seed_user("mod@example.com", "pass_word!", true, true).await;
    app.seed_user("alice@example.com", "pass_word!", true, false).await;
    app.seed_user("bob@example.com", "pass_word!", true, false).await;

    let response = app
        .get_authenticated("/users?limit=2", &app.token_for(&moderator))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_inactive_moderator_can_manage_users() {
    let app = TestApp::spawn().await;
    let moderator = app.seed_user("mod@example.com", "pass_word!", false, true).await;
    let user = app.seed_user("alice@example.com", "pass_word!", true, false).await;

    let response = app
        .get_authenticated(&format!("/users/{}", user.id), &app.token_for(&moderator))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_moderator_get_unknown_user() {
    let app = TestApp::spawn().await;
    let moderator = app.seed_user("mod@example.com", "pass_word!", true, true).await;

    let response = app
        .get_authenticated(
            &format!("/users/{}", uuid::Uuid::new_v4()),
            &app.token_for(&moderator),
        )
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_user_id_in_path() {
    let app = TestApp::spawn().await;
    let moderator = app.seed_user("mod@example.com", "pass_word!", true, true).await;
    let token = app.token_for(&moderator);

    let responses = [
        app.get_authenticated("/users/not-a-uuid", &token).send().await,
        app.patch_authenticated("/users/not-a-uuid", &token)
            .json(&json!({ "is_active": false }))
            .send()
            .await,
        app.delete_authenticated("/users/not-a-uuid", &token).send().await,
    ];

    for response in responses {
        let response = response.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

// Reports

async fn create_report(app: &TestApp, token: &str, markdown: &str) -> Value {
    let response = app
        .post_authenticated("/reports", token)
        .json(&json!({
            "markdown": markdown,
            "html": format!("<p>{}</p>", markdown)
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"].clone()
}

#[tokio::test]
async fn test_report_lifecycle() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("alice@example.com", "pass_word!", true, false).await;
    let token = app.token_for(&user);

    let report = create_report(&app, &token, "first trip").await;
    assert_eq!(report["user_id"], user.id.to_string());
    let report_id = report["id"].as_str().unwrap().to_string();

    let response = app
        .get_authenticated("/reports", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .patch_authenticated(&format!("/reports/{}", report_id), &token)
        .json(&json!({ "markdown": "edited" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["markdown"], "edited");
    assert_eq!(body["data"]["html"], "<p>first trip</p>");

    let response = app
        .delete_authenticated(&format!("/reports/{}", report_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/reports/{}", report_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_markdown_rejected() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("alice@example.com", "pass_word!", true, false).await;

    let response = app
        .post_authenticated("/reports", &app.token_for(&user))
        .json(&json!({ "markdown": "", "html": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_report_id_in_path() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("alice@example.com", "pass_word!", true, false).await;
    let token = app.token_for(&user);

    let responses = [
        app.get_authenticated("/reports/not-a-uuid", &token).send().await,
        app.patch_authenticated("/reports/not-a-uuid", &token)
            .json(&json!({ "markdown": "edited" }))
            .send()
            .await,
        app.delete_authenticated("/reports/not-a-uuid", &token).send().await,
    ];

    for response in responses {
        let response = response.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_reports_hidden_from_other_users() {
    let app = TestApp::spawn().await;
    let owner = app.seed_user("alice@example.com", "pass_word!", true, false).await;
    let other = app.seed_user("bob@example.com", "pass_word!", true, false).await;

    let report = create_report(&app, &app.token_for(&owner), "private").await;
    let path = format!("/reports/{}", report["id"].as_str().unwrap());
    let other_token = app.token_for(&other);

    let response = app
        .get_authenticated(&path, &other_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete_authenticated(&path, &other_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated("/reports", &other_token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_moderator_reads_and_deletes_any_report() {
    let app = TestApp::spawn().await;
    let owner = app.seed_user("alice@example.com", "pass_word!", true, false).await;
    let moderator = app.seed_user("mod@example.com", "pass_word!", true, true).await;

    let report = create_report(&app, &app.token_for(&owner), "flagged").await;
    let path = format!("/reports/{}", report["id"].as_str().unwrap());
    let moderator_token = app.token_for(&moderator);

    let response = app
        .get_authenticated(&path, &moderator_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .patch_authenticated(&path, &moderator_token)
        .json(&json!({ "markdown": "rewritten" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete_authenticated(&path, &moderator_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_deleting_user_removes_their_reports() {
    let app = TestApp::spawn().await;
    let owner = app.seed_user("alice@example.com", "pass_word!", true, false).await;
    let moderator = app.seed_user("mod@example.com", "pass_word!", true, true).await;

    create_report(&app, &app.token_for(&owner), "one").await;
    create_report(&app, &app.token_for(&owner), "two").await;

    let response = app
        .delete_authenticated(&format!("/users/{}", owner.id), &app.token_for(&moderator))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(app.store.reports.read().await.is_empty());
}
