mod common;

use common::TestApp;
use common::TEST_PASSWORD;
use reqwest::header;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["service"], "user-service");
}

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "username": "testuser",
            "email": "test@example.com",
            "password": TEST_PASSWORD,
            "first_name": "Test",
            "last_name": "User"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "testuser");
    assert_eq!(body["data"]["email"], "test@example.com");
    assert_eq!(body["data"]["first_name"], "Test");
    assert_eq!(body["data"]["last_name"], "User");
    assert_eq!(body["data"]["is_active"], true);
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_duplicates_conflict() {
    let app = TestApp::spawn().await;
    app.create_user("testuser", "test@example.com").await;

    for (username, email) in [("testuser", "other@example.com"), ("other", "test@example.com")] {
        let response = app
            .post("/api/users")
            .json(&json!({
                "username": username,
                "email": email,
                "password": TEST_PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .contains("already"));
    }
}

#[tokio::test]
async fn test_create_user_invalid_fields() {
    let app = TestApp::spawn().await;

    for (username, email) in [("ab", "test@example.com"), ("testuser", "not-an-email")] {
        let response = app
            .post("/api/users")
            .json(&json!({
                "username": username,
                "email": email,
                "password": TEST_PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.create_user("testuser", "test@example.com").await;

    let response = app.login("test@example.com", TEST_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["token_type"], "bearer");
    assert!(body["data"]["expires_at"].is_string());

    let token = body["data"]["access_token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.create_user("testuser", "test@example.com").await;

    let wrong_password = app.login("test@example.com", "wrongpassword").await;
    let unknown_user = app.login("nobody@example.com", TEST_PASSWORD).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.headers().get(header::WWW_AUTHENTICATE),
        unknown_user.headers().get(header::WWW_AUTHENTICATE)
    );

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_user: Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(
        wrong_password["data"]["message"],
        "Incorrect email or password"
    );
}

#[tokio::test]
async fn test_current_user_resolves_token_subject() {
    let app = TestApp::spawn().await;
    let created = app.create_user("testuser", "test@example.com").await;
    let token = app.token_for("test@example.com").await;

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], created["data"]["id"]);
    assert_eq!(body["data"]["email"], "test@example.com");
}

#[tokio::test]
async fn test_protected_routes_require_bearer_token() {
    let app = TestApp::spawn().await;
    let created = app.create_user("testuser", "test@example.com").await;
    let user_id = created["data"]["id"].as_str().unwrap();

    let missing = app
        .get(&format!("/api/users/{}", user_id))
        .send()
        .await
        .expect("Failed to execute request");
    let garbage = app
        .get_authenticated("/api/auth/me", "not-a-token")
        .send()
        .await
        .expect("Failed to execute request");

    for response in [missing, garbage] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["data"]["message"], "Could not validate credentials");
    }
}

#[tokio::test]
async fn test_token_expires_after_ttl() {
    let app = TestApp::spawn().await;
    app.create_user("testuser", "test@example.com").await;
    let token = app.token_for("test@example.com").await;

    app.clock
        .advance(chrono::Duration::minutes(29) + chrono::Duration::seconds(59));
    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    app.clock.advance(chrono::Duration::seconds(1));
    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::spawn().await;
    let created = app.create_user("testuser", "test@example.com").await;
    let user_id = created["data"]["id"].as_str().unwrap();
    let token = app.token_for("test@example.com").await;

    let response = app
        .get_authenticated(&format!("/api/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "testuser");
}

#[tokio::test]
async fn test_get_user_not_found_and_bad_id() {
    let app = TestApp::spawn().await;
    app.create_user("testuser", "test@example.com").await;
    let token = app.token_for("test@example.com").await;

    let response = app
        .get_authenticated(
            "/api/users/00000000-0000-0000-0000-000000000000",
            &token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated("/api/users/42", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_users_paginates() {
    let app = TestApp::spawn().await;
    for i in 0..3 {
        app.create_user(&format!("user{}", i), &format!("user{}@example.com", i))
            .await;
    }
    let token = app.token_for("user0@example.com").await;

    let response = app
        .get_authenticated("/api/users", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let response = app
        .get_authenticated("/api/users?skip=1&limit=1", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.unwrap();
    let page = body["data"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["username"], "user1");
}

#[tokio::test]
async fn test_update_user_password_and_names() {
    let app = TestApp::spawn().await;
    let created = app.create_user("testuser", "test@example.com").await;
    let user_id = created["data"]["id"].as_str().unwrap();
    let token = app.token_for("test@example.com").await;

    let response = app
        .patch_authenticated(&format!("/api/users/{}", user_id), &token)
        .json(&json!({
            "first_name": "Ada",
            "password": "newpassword"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["first_name"], "Ada");
    assert_eq!(body["data"]["username"], "testuser");

    let old = app.login("test@example.com", TEST_PASSWORD).await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);
    let new = app.login("test@example.com", "newpassword").await;
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deleted_user_token_is_rejected() {
    let app = TestApp::spawn().await;
    let created = app.create_user("testuser", "test@example.com").await;
    let user_id = created["data"]["id"].as_str().unwrap();
    let token = app.token_for("test@example.com").await;

    let response = app
        .delete_authenticated(&format!("/api/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "User deleted successfully");

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_responses_carry_request_id_and_process_time() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").send().await.expect("Failed to execute request");

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Missing x-request-id")
        .to_str()
        .unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());

    let process_time: f64 = response
        .headers()
        .get("x-process-time")
        .expect("Missing x-process-time")
        .to_str()
        .unwrap()
        .parse()
        .expect("Process time should be a number");
    assert!(process_time >= 0.0);
}

#[tokio::test]
async fn test_incoming_request_id_is_echoed() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .header("x-request-id", "client-trace-42")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "client-trace-42"
    );
}

#[tokio::test]
async fn test_host_allow_list() {
    let app = TestApp::spawn_with_allowed_hosts(&["api.example.com"]).await;

    let response = app.get("/health").send().await.expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "Invalid host header");

    let response = app
        .get("/health")
        .header(header::HOST, "api.example.com")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_users_cannot_modify_other_accounts() {
    let app = TestApp::spawn().await;
    let victim = app.create_user("victim", "victim@example.com").await;
    let victim_id = victim["data"]["id"].as_str().unwrap();
    app.create_user("intruder", "intruder@example.com").await;
    let token = app.token_for("intruder@example.com").await;

    let response = app
        .patch_authenticated(&format!("/api/users/{}", victim_id), &token)
        .json(&json!({ "password": "hijacked" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .delete_authenticated(&format!("/api/users/{}", victim_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let still_works = app.login("victim@example.com", TEST_PASSWORD).await;
    assert_eq!(still_works.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_lowercase_bearer_scheme_is_accepted() {
    let app = TestApp::spawn().await;
    app.create_user("testuser", "test@example.com").await;
    let token = app.token_for("test@example.com").await;

    let response = app
        .get("/api/auth/me")
        .header(header::AUTHORIZATION, format!("bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}
