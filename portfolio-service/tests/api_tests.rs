mod common;

use common::registration_fields;
use common::set_cookie;
use common::TestApp;
use reqwest::header;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("jane@example.com", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = set_cookie(&response, "token").expect("Session cookie missing");

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["message"], "User Registered!");
    assert_eq!(body["data"]["user"]["email"], "jane@example.com");
    assert_eq!(body["data"]["user"]["full_name"], "Jane Doe");
    assert_eq!(body["data"]["user"]["avatar"]["public_id"], "AVATARS/1");
    assert_eq!(body["data"]["user"]["resume"]["public_id"], "RESUMES/2");
    assert!(body["data"]["user"]["password_hash"].is_null());

    let token = body["data"]["token"].as_str().unwrap();
    assert!(cookie.starts_with(&format!("token={};", token)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=None"));

    let stored = app.users.stored("jane@example.com").unwrap();
    let hash = stored.password_hash.unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert!(!hash.contains("pass_word!"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app.register("jane@example.com", "other_password").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_without_resume_uploads_nothing() {
    let app = TestApp::spawn().await;

    let form = registration_fields("jane@example.com", "pass_word!")
        .part("avatar", common::file_part("avatar.png", "image/png"));
    let response = app
        .post("/user/register")
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Avatar and Resume are required.");
    assert_eq!(app.assets.upload_count(), 0);
    assert!(app.users.stored("jane@example.com").is_none());
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.register("not-an-email", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.assets.upload_count(), 0);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app.login("jane@example.com", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response, "token").is_some());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Logged In");
    assert_eq!(body["data"]["user"]["email"], "jane@example.com");

    let token = body["data"]["token"].as_str().unwrap();
    let user_id = body["data"]["user"]["id"].as_str().unwrap();
    assert_eq!(app.sessions.verify(token).unwrap(), user_id);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let wrong_password = app.login("jane@example.com", "wrong_password").await;
    let unknown_email = app.login("nobody@example.com", "pass_word!").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["data"]["message"], "Invalid Email Or Password");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/user/login")
        .json(&json!({ "email": "jane@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_with_bearer_token() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app
        .get_authenticated("/user/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "jane@example.com");
}

#[tokio::test]
async fn test_me_with_cookie() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app
        .get("/user/me")
        .header(header::COOKIE, format!("theme=dark; token={}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cookie_takes_precedence_over_bearer() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app
        .get_authenticated("/user/me", "garbage")
        .header(header::COOKIE, format!("token={}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/user/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 401);
    assert_eq!(
        body["data"]["message"],
        "Please login to access this resource"
    );
}

#[tokio::test]
async fn test_me_with_tampered_token() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_get_token("jane@example.com", "pass_word!")
        .await;
    let tampered = format!("{}x", token);

    let response = app
        .get_authenticated("/user/me", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_expires_cookie() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app
        .get_authenticated("/user/logout", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response, "token").expect("Expired cookie missing");
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Logged Out");

    // Tokens are stateless; a copy kept by the client still works until expiry
    let response = app
        .get_authenticated("/user/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_session_still_expires_cookie() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/user/logout")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response, "token").expect("Expired cookie missing");
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_with_tampered_cookie_still_expires_it() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app
        .get("/user/logout")
        .header(header::COOKIE, format!("token={}x", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response, "token").expect("Expired cookie missing");
    assert!(cookie.starts_with("token=;"));

    let response = app
        .get_authenticated("/user/logout", "stale.or.tampered")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Logged Out");
}

#[tokio::test]
async fn test_update_password_flow() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app
        .put_authenticated("/user/update/password", &token)
        .json(&json!({
            "currentPassword": "pass_word!",
            "newPassword": "new_pass_word",
            "confirmNewPassword": "new_pass_word"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Password Updated!");

    let old = app.login("jane@example.com", "pass_word!").await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = app.login("jane@example.com", "new_pass_word").await;
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_password_wrong_current() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app
        .put_authenticated("/user/update/password", &token)
        .json(&json!({
            "currentPassword": "not_my_password",
            "newPassword": "new_pass_word",
            "confirmNewPassword": "new_pass_word"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Incorrect Current Password");

    let response = app.login("jane@example.com", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_password_requires_session() {
    let app = TestApp::spawn().await;

    let response = app
        .put("/user/update/password")
        .json(&json!({
            "currentPassword": "pass_word!",
            "newPassword": "new_pass_word",
            "confirmNewPassword": "new_pass_word"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile_replaces_avatar() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let form = reqwest::multipart::Form::new()
        .text("fullName", "Jane Q. Doe")
        .part("avatar", common::file_part("new.png", "image/png"));
    let response = app
        .put_authenticated("/user/update/me", &token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["full_name"], "Jane Q. Doe");
    assert_eq!(body["data"]["phone"], "+1 555 0100");
    assert_eq!(body["data"]["avatar"]["public_id"], "AVATARS/3");
    assert_eq!(body["data"]["resume"]["public_id"], "RESUMES/2");
    assert_eq!(app.assets.destroyed(), vec!["AVATARS/1".to_string()]);
}

#[tokio::test]
async fn test_update_profile_blank_link_clears_it() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let form = reqwest::multipart::Form::new().text("githubURL", "");
    let response = app
        .put_authenticated("/user/update/me", &token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["github_url"].is_null());
    assert_eq!(body["data"]["portfolio_url"], "https://jane.dev");
}

#[tokio::test]
async fn test_forgot_and_reset_password_flow() {
    let app = TestApp::spawn().await;
    app.register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app
        .post("/user/password/forgot")
        .json(&json!({ "email": "jane@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Email Sent To jane@example.com Successfully!"
    );

    let sent = app.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "jane@example.com");
    let secret = app.notifier.last_reset_secret().expect("Reset link missing");

    // Only the derived lookup token is stored
    let reset = app.users.stored("jane@example.com").unwrap().reset.unwrap();
    assert_ne!(reset.lookup_token, secret);

    let mismatch = app
        .put(&format!("/user/password/reset/{}", secret))
        .json(&json!({ "password": "new_pass_word", "confirmPassword": "other_word" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);

    let response = app
        .put(&format!("/user/password/reset/{}", secret))
        .json(&json!({ "password": "new_pass_word", "confirmPassword": "new_pass_word" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response, "token").is_some());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Password Reset Successfully!");
    assert!(body["data"]["token"].is_string());
    assert!(app.users.stored("jane@example.com").unwrap().reset.is_none());

    let reused = app
        .put(&format!("/user/password/reset/{}", secret))
        .json(&json!({ "password": "third_pass_word", "confirmPassword": "third_pass_word" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(reused.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = reused.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Reset Password token is invalid or has been expired"
    );

    let response = app.login("jane@example.com", "new_pass_word").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reset_after_expiry_is_rejected() {
    let app = TestApp::spawn().await;
    app.register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app
        .post("/user/password/forgot")
        .json(&json!({ "email": "jane@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let secret = app.notifier.last_reset_secret().expect("Reset link missing");
    app.users.expire_reset("jane@example.com");

    let response = app
        .put(&format!("/user/password/reset/{}", secret))
        .json(&json!({ "password": "new_pass_word", "confirmPassword": "new_pass_word" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Reset Password token is invalid or has been expired"
    );

    let response = app.login("jane@example.com", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_second_forgot_invalidates_first_link() {
    let app = TestApp::spawn().await;
    app.register_and_get_token("jane@example.com", "pass_word!")
        .await;

    for _ in 0..2 {
        let response = app
            .post("/user/password/forgot")
            .json(&json!({ "email": "jane@example.com" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let sent = app.notifier.sent();
    let first_secret = sent[0]
        .body
        .split("/password/reset/")
        .nth(1)
        .unwrap()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>();

    let response = app
        .put(&format!("/user/password/reset/{}", first_secret))
        .json(&json!({ "password": "new_pass_word", "confirmPassword": "new_pass_word" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/user/password/forgot")
        .json(&json!({ "email": "nobody@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_forgot_password_delivery_failure_clears_reset() {
    let app = TestApp::spawn().await;
    app.register_and_get_token("jane@example.com", "pass_word!")
        .await;
    app.notifier.fail_deliveries();

    let response = app
        .post("/user/password/forgot")
        .json(&json!({ "email": "jane@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Internal Server Error");
    assert!(app.users.stored("jane@example.com").unwrap().reset.is_none());
}

#[tokio::test]
async fn test_reset_with_unknown_secret() {
    let app = TestApp::spawn().await;

    let response = app
        .put("/user/password/reset/deadbeef")
        .json(&json!({ "password": "new_pass_word", "confirmPassword": "new_pass_word" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_portfolio_profile_without_owner() {
    let app = TestApp::spawn().await;
    app.register_and_get_token("jane@example.com", "pass_word!")
        .await;

    let response = app
        .get("/user/portfolio/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
