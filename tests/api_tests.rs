mod common;

use chrono::Duration;
use reqwest::StatusCode;
use serde_json::json;

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(resp.text().await.unwrap(), "ok");
}

// ── Registration & Login ────────────────────────────────────────

#[tokio::test]
async fn register_returns_summary_without_hash() {
    let app = common::spawn_app().await;

    let body = app.bootstrap().await;
    assert_eq!(body["email"], "ada@test.com");
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["role"], "user");
    assert!(body["id"].is_string());
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app.register("ADA@test.com", "password123", "Other").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "An account with this email already exists");
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = common::spawn_app().await;

    let (_, status) = app.register("ada@test.com", "short", "Ada").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_valid_credentials() {
    let app = common::spawn_app().await;
    let registered = app.bootstrap().await;

    let (body, status) = app.login("  Ada@Test.com ", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], registered["id"]);
    assert_eq!(body["email"], "ada@test.com");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (wrong_pw, wrong_status) = app.login("ada@test.com", "wrongpassword").await;
    let (unknown, unknown_status) = app.login("nobody@test.com", "password123").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw, unknown);
    assert_eq!(wrong_pw["error"], "Invalid email or password");
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = common::spawn_app().await;

    let (_, status) = app.login("", "password123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, status) = app.login("ada@test.com", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_is_throttled_after_repeated_failures() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    for _ in 0..5 {
        let (_, status) = app.login("ada@test.com", "wrongpassword").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (_, status) = app.login("ada@test.com", "password123").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    // Other accounts are unaffected.
    app.register("grace@test.com", "password123", "Grace").await;
    let (_, status) = app.login("grace@test.com", "password123").await;
    assert_eq!(status, StatusCode::OK);
}

// ── Password reset ──────────────────────────────────────────────

#[tokio::test]
async fn forgot_password_same_answer_for_known_and_unknown() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (known, known_status) = app.forgot_password("ada@test.com").await;
    let (unknown, unknown_status) = app.forgot_password("nobody@test.com").await;

    assert_eq!(known_status, StatusCode::OK);
    assert_eq!(unknown_status, StatusCode::OK);
    assert_eq!(known["success"], true);
    assert_eq!(known["success"], unknown["success"]);
    assert_eq!(known["message"], unknown["message"]);
    assert_eq!(app.notifier.count(), 1);

    #[cfg(not(feature = "dev-reset-token"))]
    {
        assert_eq!(known, unknown);
        assert!(known.get("resetToken").is_none());
    }
}

#[cfg(feature = "dev-reset-token")]
#[tokio::test]
async fn forgot_password_echoes_token_in_dev_builds() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (known, status) = app.forgot_password("ada@test.com").await;
    assert_eq!(status, StatusCode::OK);
    let echoed = known["resetToken"].as_str().unwrap().to_string();
    assert_eq!(Some(echoed.clone()), app.notifier.last_token());

    let (unknown, _) = app.forgot_password("nobody@test.com").await;
    assert!(unknown.get("resetToken").is_none());

    let (_, status) = app.reset_password(&echoed, "brand-new-pass").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn forgot_password_requires_email() {
    let app = common::spawn_app().await;

    let (body, status) = app.forgot_password("   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email is required");
}

#[tokio::test]
async fn forgot_password_throttling_looks_accepted() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    for _ in 0..3 {
        app.forgot_password("ada@test.com").await;
    }
    assert_eq!(app.notifier.count(), 3);

    let (body, status) = app.forgot_password("ada@test.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(app.notifier.count(), 3);
}

#[tokio::test]
async fn reset_link_points_at_reset_page() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    app.forgot_password("ada@test.com").await;

    let url = app.notifier.last_url().unwrap();
    assert!(url.starts_with("http://college.test/reset-password?token="));
    assert_eq!(app.notifier.last_token().unwrap().len(), 64);
}

#[tokio::test]
async fn reset_flow_rotates_password() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    app.forgot_password("ada@test.com").await;
    let token = app.notifier.last_token().unwrap();

    let (body, status) = app.reset_password(&token, "brand-new-pass").await;
    assert_eq!(status, StatusCode::OK, "reset failed: {body}");
    assert_eq!(body["success"], true);

    let (_, status) = app.login("ada@test.com", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (_, status) = app.login("ada@test.com", "brand-new-pass").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reset_token_cannot_be_replayed() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    app.forgot_password("ada@test.com").await;
    let token = app.notifier.last_token().unwrap();

    let (_, status) = app.reset_password(&token, "brand-new-pass").await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app.reset_password(&token, "another-pass").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid or expired reset token");

    let (_, status) = app.login("ada@test.com", "brand-new-pass").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reset_token_expires_after_an_hour() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    app.forgot_password("ada@test.com").await;
    let token = app.notifier.last_token().unwrap();

    app.clock.advance(Duration::minutes(61));

    let (body, status) = app.reset_password(&token, "brand-new-pass").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid or expired reset token");

    let (_, status) = app.login("ada@test.com", "password123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reset_rejects_short_password_and_keeps_token() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    app.forgot_password("ada@test.com").await;
    let token = app.notifier.last_token().unwrap();

    let (body, status) = app.reset_password(&token, "12345").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must be at least 6 characters long");

    let (_, status) = app.reset_password(&token, "123456").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reset_requires_token_and_password() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post_json("/api/v1/auth/reset-password", &json!({ "token": "abc" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Token and new password are required");

    let (body, status) = app.reset_password("not-a-real-token", "password123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid or expired reset token");
}

// ── Colleges ────────────────────────────────────────────────────

#[tokio::test]
async fn colleges_are_seeded_and_sorted() {
    let app = common::spawn_app().await;

    let (body, status) = app.get("/api/v1/colleges").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 6);
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let first = &body[0];
    assert!(first["admissionProcess"]["acceptanceRate"].is_string());
    assert!(first["events"].is_array());
}

#[tokio::test]
async fn colleges_search_is_case_insensitive() {
    let app = common::spawn_app().await;

    let (body, status) = app.get("/api/v1/colleges?search=harv").await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Harvard University");

    let (body, _) = app.get("/api/v1/colleges?search=zzz-no-match").await;
    assert!(body.as_array().unwrap().is_empty());

    let (body, _) = app.get("/api/v1/colleges?search=%20").await;
    assert_eq!(body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn college_lookup_by_id() {
    let app = common::spawn_app().await;
    let first = app.first_college().await;
    let id = first["id"].as_str().unwrap();

    let (body, status) = app.get(&format!("/api/v1/colleges/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], first["name"]);
}

#[tokio::test]
async fn college_lookup_unknown_or_malformed_id_is_404() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .get("/api/v1/colleges/00000000-0000-0000-0000-000000000000")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "College not found");

    let (_, status) = app.get("/api/v1/colleges/not-a-uuid").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Applications ────────────────────────────────────────────────

fn application_body(college_id: &str) -> serde_json::Value {
    json!({
        "collegeId": college_id,
        "userId": "ada@test.com",
        "candidateName": "Ada Lovelace",
        "subject": "Mathematics",
        "candidateEmail": "ada@test.com",
        "candidatePhone": "+1 555 0100",
        "address": "12 St James's Square, London",
        "dateOfBirth": "2006-12-10",
    })
}

#[tokio::test]
async fn application_create_and_list() {
    let app = common::spawn_app().await;
    let college = app.first_college().await;
    let college_id = college["id"].as_str().unwrap();

    let (body, status) = app
        .post_json("/api/v1/applications", &application_body(college_id))
        .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    assert_eq!(body["success"], true);
    let application_id = body["applicationId"].as_str().unwrap().to_string();

    let (body, status) = app.get("/api/v1/users/ada@test.com/applications").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], application_id.as_str());
    assert_eq!(list[0]["collegeName"], college["name"]);
    assert_eq!(list[0]["status"], "pending");
    assert_eq!(list[0]["dateOfBirth"], "2006-12-10");

    let (body, _) = app.get("/api/v1/users/someone-else/applications").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn application_reports_missing_fields() {
    let app = common::spawn_app().await;
    let college = app.first_college().await;

    let mut body = application_body(college["id"].as_str().unwrap());
    body["subject"] = json!("");
    body.as_object_mut().unwrap().remove("address");

    let (resp, status) = app.post_json("/api/v1/applications", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = resp["error"].as_str().unwrap();
    assert!(error.contains("subject"));
    assert!(error.contains("address"));
}

#[tokio::test]
async fn application_rejects_bad_date_and_unknown_college() {
    let app = common::spawn_app().await;
    let college = app.first_college().await;

    let mut body = application_body(college["id"].as_str().unwrap());
    body["dateOfBirth"] = json!("10/12/2006");
    let (_, status) = app.post_json("/api/v1/applications", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = application_body("00000000-0000-0000-0000-000000000000");
    let (_, status) = app.post_json("/api/v1/applications", &body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Reviews ─────────────────────────────────────────────────────

#[tokio::test]
async fn review_create_and_list() {
    let app = common::spawn_app().await;
    let college = app.first_college().await;
    let college_id = college["id"].as_str().unwrap();

    let (body, status) = app
        .post_json(
            "/api/v1/reviews",
            &json!({
                "collegeId": college_id,
                "userId": "ada@test.com",
                "userName": "Ada",
                "userEmail": "ada@test.com",
                "rating": 5,
                "review": "  Wonderful faculty.  ",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    assert!(body["reviewId"].is_string());

    let (body, status) = app.get("/api/v1/reviews").await;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["review"], "Wonderful faculty.");
    assert_eq!(all[0]["collegeName"], college["name"]);

    let (body, status) = app
        .get(&format!("/api/v1/colleges/{college_id}/reviews"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn review_validation() {
    let app = common::spawn_app().await;
    let college = app.first_college().await;
    let college_id = college["id"].as_str().unwrap();

    let base = json!({
        "collegeId": college_id,
        "userId": "ada@test.com",
        "userName": "Ada",
        "userEmail": "ada@test.com",
        "rating": 4,
        "review": "Good.",
    });

    let mut zero = base.clone();
    zero["rating"] = json!(0);
    let (_, status) = app.post_json("/api/v1/reviews", &zero).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut six = base.clone();
    six["rating"] = json!(6);
    let (_, status) = app.post_json("/api/v1/reviews", &six).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut blank = base.clone();
    blank["review"] = json!("   ");
    let (body, status) = app.post_json("/api/v1/reviews", &blank).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please write a review");

    let (body, _) = app.get("/api/v1/reviews").await;
    assert!(body.as_array().unwrap().is_empty());
}
