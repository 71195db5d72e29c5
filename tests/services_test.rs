//! Resource client and service tests against a mocked backend

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;
use wiremock::{
    matchers::{body_json, header, header_exists, method, path, query_param},
    Mock, ResponseTemplate,
};
use ClubPortal::models::leaderboard::LeaderboardPeriod;
use ClubPortal::services::{AdminResource, AuthDecision, EventFilter, Membership, SessionGate};
use ClubPortal::services::events::filter_and_sort;
use ClubPortal::utils::helpers::parse_key_value_pairs;
use ClubPortal::{ApiError, AppContext, ClubPortalError};

#[tokio::test]
async fn test_mutations_carry_csrf_header() {
    let backend = BackendMockServer::new().await;
    Mock::given(method("POST"))
        .and(path("/api/projects/4/join/"))
        .and(header("X-CSRFToken", "tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "Joined project"})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let services = backend.services();
    services
        .client
        .jar()
        .add_cookie_str("csrftoken=tok123; Path=/", services.client.root());

    let detail = services
        .project_service
        .change_membership(4, Membership::Join)
        .await
        .unwrap();
    assert_eq!(detail, "Joined project");
}

#[tokio::test]
async fn test_login_cookies_authenticate_later_requests() {
    let backend = BackendMockServer::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"username": "ada", "password": "secret-pass"})))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("Set-Cookie", "sessionid=s3ss; Path=/; HttpOnly")
                .append_header("Set-Cookie", "csrftoken=c5rf; Path=/")
                .set_body_json(json!({"detail": "Login successful", "user": profile_json(1, "ada")})),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header_exists("cookie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(1, "ada")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let services = backend.services();
    let user = services.auth_service.login("ada", "secret-pass").await.unwrap();
    assert_eq!(user.username, "ada");
    assert_eq!(services.client.csrf_token().as_deref(), Some("c5rf"));

    let decision = SessionGate::new(&services.client).resolve(false).await;
    assert_matches!(decision, AuthDecision::Granted { .. });
}

#[tokio::test]
async fn test_bad_credentials_are_auth_failure() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_json("POST", "auth/login/", 401, json!({"detail": "Invalid credentials"}))
        .await;

    let result = backend.services().auth_service.login("ada", "wrong-pass").await;
    assert_matches!(result, Err(ClubPortalError::AuthFailure(_)));
}

#[tokio::test]
async fn test_events_filtering_uses_backend_list() {
    let backend = BackendMockServer::new().await;
    Mock::given(method("GET"))
        .and(path("/api/events/"))
        .and(query_param("type", "workshop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            event_json(1, "workshop", "2099-02-01T10:00:00Z"),
            event_json(2, "workshop", "2000-02-01T10:00:00Z"),
            event_json(3, "workshop", "2099-01-01T10:00:00Z"),
        ])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let events = backend
        .services()
        .event_service
        .fetch_all_events(Some("workshop".parse().unwrap()))
        .await
        .unwrap();

    let upcoming = ClubPortal::services::events::filter_and_sort_now(&events, EventFilter::Upcoming);
    assert_eq!(upcoming.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 1]);

    let all = filter_and_sort(&events, EventFilter::All, chrono::Utc::now());
    assert_eq!(all.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3, 2]);
}

#[tokio::test]
async fn test_leaderboard_is_ranked_by_points() {
    let backend = BackendMockServer::new().await;
    Mock::given(method("GET"))
        .and(path("/api/leaderboard/"))
        .and(query_param("period", "weekly"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            leaderboard_entry_json(1, "ada", 10),
            leaderboard_entry_json(2, "grace", 50),
            leaderboard_entry_json(3, "linus", 30),
        ])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let entries = backend
        .services()
        .user_service
        .fetch_leaderboard(LeaderboardPeriod::Weekly, Some(3))
        .await
        .unwrap();

    let ranking: Vec<_> = entries.iter().map(|e| (e.username.as_str(), e.rank)).collect();
    assert_eq!(ranking, vec![("grace", Some(1)), ("linus", Some(2)), ("ada", Some(3))]);
}

#[tokio::test]
async fn test_admin_create_rejection_is_operation_failure() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_json("POST", "events/", 400, json!({"event_date": ["This field is required."]}))
        .await;

    let admin = backend.services().admin_service(1);
    let fields = parse_key_value_pairs(&["title=Rust night", "event_type=meetup"]).unwrap();
    let result = admin.create(AdminResource::Events, fields).await;

    assert_matches!(
        result,
        Err(ClubPortalError::OperationFailure { source: ApiError::Status { ref detail, .. }, .. })
            if detail == "event_date: This field is required."
    );
}

#[tokio::test]
async fn test_admin_update_delete_and_verify() {
    let backend = BackendMockServer::new().await;
    Mock::given(method("PATCH"))
        .and(path("/api/projects/2/"))
        .and(body_json(json!({"status": "completed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2, "status": "completed"})))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/8/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend.server)
        .await;
    backend
        .mock_json(
            "POST",
            "tasks/5/verify/",
            200,
            json!({"task": task_json(5, "verified", 25), "points_awarded": 25}),
        )
        .await;

    let admin = backend.services().admin_service(1);

    let fields = parse_key_value_pairs(&["status=completed"]).unwrap();
    let updated = admin.update(AdminResource::Projects, 2, fields).await.unwrap();
    assert_eq!(updated["status"], "completed");

    admin.delete(AdminResource::Users, 8).await.unwrap();

    let verification = admin.verify_task(5).await.unwrap();
    assert_eq!(verification.points_awarded, 25);
    assert_eq!(verification.task.id, 5);
}

#[tokio::test]
async fn test_admin_list_forwards_search() {
    let backend = BackendMockServer::new().await;
    Mock::given(method("GET"))
        .and(path("/api/events/"))
        .and(query_param("search", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([event_json(4, "workshop", "2025-03-01T10:00:00Z")])))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .and(query_param("search", "docs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json(6, "pending", 5)])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let admin = backend.services().admin_service(1);

    let events = admin.list_events(Some("rust")).await.unwrap();
    assert_eq!(events.iter().map(|e| e.id).collect::<Vec<_>>(), vec![4]);

    let tasks = admin.list_tasks(Some("docs")).await.unwrap();
    assert_eq!(tasks[0].id, 6);
}

#[tokio::test]
async fn test_dashboard_fetch() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_json(
            "GET",
            "dashboard/",
            200,
            json!({
                "user": {"id": 1, "name": "Ada", "username": "ada", "points": 40, "batch": 2024, "is_admin": false},
                "active_tasks": [task_json(3, "in_progress", 10)],
                "upcoming_events": [],
                "recent_projects": [],
                "attendance_count": 2
            }),
        )
        .await;

    let dashboard = backend.services().user_service.fetch_dashboard().await.unwrap();
    assert_eq!(dashboard.active_tasks.len(), 1);
    assert_eq!(dashboard.attendance_count, 2);
}

#[tokio::test]
#[serial]
async fn test_saved_session_survives_restart() {
    let backend = BackendMockServer::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("Set-Cookie", "sessionid=s3ss; Path=/")
                .set_body_json(profile_json(1, "ada")),
        )
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header("cookie", "sessionid=s3ss"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(1, "ada")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut settings = backend.settings();
    settings.session.cookie_file = dir.path().join("session.toml").display().to_string();

    let first = AppContext::init(settings.clone()).await.unwrap();
    first.services.auth_service.login("ada", "secret-pass").await.unwrap();
    first.save_session().await.unwrap();

    let second = AppContext::init(settings).await.unwrap();
    let decision = SessionGate::new(second.client()).resolve(false).await;
    assert_matches!(decision, AuthDecision::Granted { ref user, .. } if user.username == "ada");
}
