//! HttpGateway against a local HTTP server: paths, bodies, cookies and
//! how failures surface.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::mock_data::{StoryRecordBuilder, stories_json, user_json};
use common::mock_server::MockServer;
use secrecy::SecretString;
use sprintboard::board::{Board, DragPhase};
use sprintboard::error::SprintboardError;
use sprintboard::gateway::{HttpGateway, SessionGateway, StoryGateway};
use sprintboard::notify::NotificationChannel;
use sprintboard::session::SessionState;
use sprintboard::types::{BackendStatus, BoardColumn, ProjectId, StoryId};

fn gateway(server: &MockServer, session: Option<&str>) -> HttpGateway {
    HttpGateway::new(
        &server.base_url,
        session.map(|s| SecretString::from(s.to_string())),
        None,
    )
    .expect("gateway should build")
}

#[tokio::test]
async fn test_fetch_stories_sends_project_and_cookie() {
    let server = MockServer::start(|_| {
        let body = stories_json(&[
            StoryRecordBuilder::new(1, "Login").status("IN_REVIEW").build(),
            StoryRecordBuilder::new(2, "Logout").status("DONE").build(),
        ]);
        (200, body.to_string())
    })
    .await;

    let records = gateway(&server, Some("abc123"))
        .fetch_stories(ProjectId(42))
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status.as_deref(), Some("IN_REVIEW"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/stories?projectId=42");
    assert_eq!(requests[0].header("cookie"), Some("JSESSIONID=abc123"));
}

#[tokio::test]
async fn test_update_status_puts_backend_code() {
    let server = MockServer::start(|_| (200, String::new())).await;

    gateway(&server, None)
        .update_status(StoryId(7), BackendStatus::Done)
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/api/stories/7/status");
    assert_eq!(requests[0].body, r#"{"status":"DONE"}"#);
    assert!(requests[0].header("cookie").is_none());
}

#[tokio::test]
async fn test_update_status_accepts_any_2xx() {
    let server = MockServer::start(|_| (201, String::new())).await;

    let result = gateway(&server, None)
        .update_status(StoryId(7), BackendStatus::InProgress)
        .await;

    assert!(result.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_slow_accepted_write_still_confirms() {
    let server = MockServer::start(|request| match request.method.as_str() {
        "GET" => (
            200,
            stories_json(&[StoryRecordBuilder::new(3, "Fix login bug")
                .status("IN_PROGRESS")
                .build()])
            .to_string(),
        ),
        _ => (200, String::new()),
    })
    .await;
    server.delay_writes(Duration::from_secs(3));

    let board = Board::new(
        Arc::new(gateway(&server, Some("s"))),
        NotificationChannel::default(),
    );
    board.load_project(ProjectId(1)).await.unwrap();

    let op = board
        .controller()
        .drop_story(StoryId(3), BoardColumn::Done)
        .await;

    assert_eq!(op.phase, DragPhase::Confirmed, "error: {:?}", op.error);
    assert_eq!(
        board.store().get(StoryId(3)).unwrap().status,
        BoardColumn::Done
    );
    assert!(!board.notifications().is_blocked());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_configured_timeout_still_applies() {
    let server = MockServer::start(|_| (200, String::new())).await;
    server.delay_writes(Duration::from_secs(3));

    let gw = HttpGateway::new(&server.base_url, None, Some(Duration::from_millis(500)))
        .expect("gateway should build");
    let result = gw.update_status(StoryId(3), BackendStatus::Done).await;

    assert!(matches!(result, Err(SprintboardError::Http(_))), "got {result:?}");
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let server = MockServer::start(|_| (500, "database unavailable".to_string())).await;

    let err = gateway(&server, None)
        .update_status(StoryId(7), BackendStatus::Done)
        .await
        .unwrap_err();

    match err {
        SprintboardError::Api { status, message } => {
            assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sprint_ready_and_estimate_bodies() {
    let server = MockServer::start(|request| {
        let record = StoryRecordBuilder::new(3, "Cart")
            .sprint_ready(request.path.ends_with("sprint-ready"))
            .points(if request.path.ends_with("estimate") { 8 } else { 0 })
            .build();
        (200, serde_json::to_string(&record).unwrap())
    })
    .await;
    let gw = gateway(&server, None);

    let record = gw.update_sprint_ready(StoryId(3), true).await.unwrap();
    assert_eq!(record.sprint_ready, Some(true));
    let record = gw.update_estimate(StoryId(3), 8).await.unwrap();
    assert_eq!(record.story_points, Some(8));

    let requests = server.requests();
    assert_eq!(requests[0].path, "/api/stories/3/sprint-ready");
    assert_eq!(requests[0].body, r#"{"sprintReady":true}"#);
    assert_eq!(requests[1].path, "/api/stories/3/estimate");
    assert_eq!(requests[1].body, r#"{"storyPoints":8}"#);
}

#[tokio::test]
async fn test_current_user_resolves_session() {
    let server = MockServer::start(|_| (200, user_json("dana", &["PRODUCT_OWNER"]).to_string())).await;

    let session = SessionState::resolve(&gateway(&server, Some("s"))).await.unwrap();

    let user = session.user().expect("should be authenticated");
    assert_eq!(user.username, "dana");
    assert!(session.can_mark_sprint_ready());
    assert!(session.can_move_stories());
}

#[tokio::test]
async fn test_login_redirect_means_no_session() {
    let server = MockServer::start(|_| (302, String::new())).await;

    let user = gateway(&server, Some("expired")).current_user().await.unwrap();
    assert!(user.is_none());

    let session = SessionState::resolve(&gateway(&server, Some("expired")))
        .await
        .unwrap();
    assert_eq!(session, SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_unauthorized_means_no_session() {
    let server = MockServer::start(|_| (401, String::new())).await;
    let user = gateway(&server, None).current_user().await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_list_projects() {
    let server = MockServer::start(|_| {
        (
            200,
            r#"[{"id": 1, "projectKey": "SHOP", "name": "Webshop", "userStoryCount": 12}]"#
                .to_string(),
        )
    })
    .await;

    let projects = gateway(&server, None).list_projects().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].project_key.as_deref(), Some("SHOP"));
    assert_eq!(projects[0].user_story_count, Some(12));
    assert_eq!(server.requests()[0].path, "/api/projects");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_board_rolls_back_when_server_rejects_write() {
    let server = MockServer::start(|request| match request.method.as_str() {
        "GET" => (
            200,
            stories_json(&[StoryRecordBuilder::new(3, "Fix login bug")
                .status("IN_PROGRESS")
                .sprint_ready(true)
                .build()])
            .to_string(),
        ),
        _ => (500, "boom".to_string()),
    })
    .await;

    let board = Board::new(
        Arc::new(gateway(&server, Some("s"))),
        NotificationChannel::default(),
    );
    board.load_project(ProjectId(1)).await.unwrap();
    assert_eq!(
        board.store().get(StoryId(3)).unwrap().status,
        BoardColumn::InProgress
    );

    let op = board
        .controller()
        .drop_story(StoryId(3), BoardColumn::Done)
        .await;

    assert_eq!(op.phase, DragPhase::RolledBack);
    assert_eq!(
        board.store().get(StoryId(3)).unwrap().status,
        BoardColumn::InProgress
    );
    assert!(board.notifications().is_blocked());

    let writes = server.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, "/api/stories/3/status");
    assert_eq!(writes[0].body, r#"{"status":"DONE"}"#);
}
