mod common;

use common::controller;
use httpmock::prelude::*;
use resume_match_client::adapters::terminal::preview_details;
use resume_match_client::core::dispatch::row_controls;
use resume_match_client::domain::elements as el;
use resume_match_client::domain::model::{ListQuery, MatchOrder};
use resume_match_client::{dispatch, HttpMatchApi, MemoryPage, Outcome, UiController, UiEvent};
use serde_json::json;
use std::time::Duration;

fn saved_match(id: i64, score: f64, explanation: &str) -> serde_json::Value {
    json!({
        "id": id,
        "score": score,
        "explanation": explanation,
        "recommendations": ["Quantify achievements", "Mention Kubernetes"],
        "timestamp": "2024-02-10T16:45:00.000123"
    })
}

#[tokio::test]
async fn test_empty_list_scenario() {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/matches")
            .query_param("limit", "50")
            .query_param("order", "score");
        then.status(200).json_body(json!({
            "stats": {"total": 3, "average_score": 57.333},
            "matches": []
        }));
    });

    let controller = controller(&server, true);
    let outcome = dispatch(&controller, UiEvent::LoadMatches).await;

    list_mock.assert();
    assert_eq!(outcome, Outcome::Applied);
    let page = controller.page();
    let stats = page.html(el::STATS_BOX);
    assert!(stats.contains("<div class=\"stat-value\">3</div>"));
    assert!(stats.contains("<div class=\"stat-value\">57.3</div>"));
    let table = page.html(el::MATCHES_TABLE);
    assert!(table.contains("No matches saved yet"));
    assert!(!table.contains("match-row"));
    assert!(row_controls(&table).is_empty());
    assert!(page.is_visible(el::MATCHES_LIST));
}

#[tokio::test]
async fn test_list_rows_and_custom_query() {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/matches")
            .query_param("limit", "5")
            .query_param("order", "timestamp");
        then.status(200).json_body(json!({
            "stats": {"total": 2, "average_score": 66.25},
            "matches": [
                saved_match(4, 80.5, "Great <fit>"),
                saved_match(2, 52.0, "Average")
            ]
        }));
    });

    let api = HttpMatchApi::new(&server.base_url(), Some(Duration::from_secs(5))).unwrap();
    let controller = UiController::new(api, MemoryPage::new(), common::RecordingDialogs::default())
        .with_list_query(ListQuery {
            limit: 5,
            order: MatchOrder::Timestamp,
        })
        .with_timestamp_format("%Y-%m-%d %H:%M");

    assert_eq!(controller.load_matches().await, Outcome::Applied);
    list_mock.assert();

    let table = controller.page().html(el::MATCHES_TABLE);
    assert_eq!(table.matches("class=\"match-row\"").count(), 2);
    assert!(table.contains("Score: 81/100"));
    assert!(table.contains("Score: 52/100"));
    assert!(table.contains("Great &lt;fit&gt;"));
    assert!(table.contains("2024-02-10 16:45"));
    assert_eq!(
        row_controls(&table),
        vec![
            UiEvent::ViewMatch(4),
            UiEvent::DeleteMatch(4),
            UiEvent::ViewMatch(2),
            UiEvent::DeleteMatch(2),
        ]
    );
}

#[tokio::test]
async fn test_list_failure_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/matches");
        then.status(500).json_body(json!({"error": "database is locked"}));
    });

    let controller = controller(&server, true);
    assert_eq!(controller.load_matches().await, Outcome::Failed);
    assert_eq!(
        controller.dialogs().alerts(),
        vec!["Error loading matches: Failed to load matches"]
    );
    assert!(!controller.page().is_visible(el::MATCHES_LIST));
}

#[tokio::test]
async fn test_list_unreachable_server_reports_error_text() {
    // 取得一個已關閉的埠
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let api = HttpMatchApi::new(&format!("http://127.0.0.1:{port}"), None).unwrap();
    let controller = UiController::new(api, MemoryPage::new(), common::RecordingDialogs::default());

    assert_eq!(controller.load_matches().await, Outcome::Failed);
    let alerts = controller.dialogs().alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].starts_with("Error loading matches: HTTP request failed"));
}

#[tokio::test]
async fn test_view_match_shows_detail_dialog() {
    let server = MockServer::start();
    let detail_mock = server.mock(|when, then| {
        when.method(GET).path("/api/match/4");
        then.status(200).json_body(json!({
            "id": 4,
            "score": 80.5,
            "explanation": "Great fit",
            "recommendations": ["Quantify achievements"],
            "timestamp": "2024-02-10T16:45:00",
            "resume_preview": "Jane Doe",
            "jd_preview": "Backend engineer"
        }));
    });

    let controller = controller(&server, true);
    assert_eq!(dispatch(&controller, UiEvent::ViewMatch(4)).await, Outcome::Applied);

    detail_mock.assert();
    assert_eq!(
        controller.dialogs().alerts(),
        vec!["Score: 81/100\n\nExplanation:\nGreat fit\n\nRecommendations:\n• Quantify achievements"]
    );
    let detail = controller.latest().detail.unwrap();
    assert_eq!(
        preview_details(&detail),
        "Resume Preview: Jane Doe...\nJD Preview: Backend engineer..."
    );
}

#[tokio::test]
async fn test_view_match_without_recommendations() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/match/9");
        then.status(200).json_body(json!({
            "id": 9,
            "score": 20,
            "explanation": "Different field",
            "recommendations": [],
            "timestamp": "2024-02-10T16:45:00"
        }));
    });

    let controller = controller(&server, true);
    controller.view_match(9).await;
    let alerts = controller.dialogs().alerts();
    assert!(alerts[0].ends_with("Recommendations:\nNone"));
}

#[tokio::test]
async fn test_view_missing_match() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/match/77");
        then.status(404).json_body(json!({"error": "Match not found"}));
    });

    let controller = controller(&server, true);
    assert_eq!(controller.view_match(77).await, Outcome::Failed);
    assert_eq!(controller.dialogs().alerts(), vec!["Error loading match details"]);
}

#[tokio::test]
async fn test_stale_view_response_is_discarded() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/match/1");
        then.status(200)
            .delay(Duration::from_millis(400))
            .json_body(saved_match(1, 30.0, "slow answer"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/match/2");
        then.status(200).json_body(saved_match(2, 90.0, "fast answer"));
    });

    let controller = controller(&server, true);
    let (slow, fast) = tokio::join!(controller.view_match(1), controller.view_match(2));

    assert_eq!(slow, Outcome::Stale);
    assert_eq!(fast, Outcome::Applied);
    let alerts = controller.dialogs().alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("fast answer"));
}

#[tokio::test]
async fn test_delete_from_row_control_reloads_list() {
    let server = MockServer::start();
    let mut list_mock = server.mock(|when, then| {
        when.method(GET).path("/api/matches");
        then.status(200).json_body(json!({
            "stats": {"total": 1, "average_score": 80.5},
            "matches": [saved_match(4, 80.5, "Great fit")]
        }));
    });
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/match/4");
        then.status(200).json_body(json!({"success": true}));
    });

    let controller = controller(&server, true);
    controller.load_matches().await;
    let table = controller.page().html(el::MATCHES_TABLE);
    let delete = row_controls(&table)
        .into_iter()
        .find(|event| matches!(event, UiEvent::DeleteMatch(_)))
        .unwrap();

    list_mock.assert_hits(1);
    list_mock.delete();
    let reload_mock = server.mock(|when, then| {
        when.method(GET).path("/api/matches");
        then.status(200).json_body(json!({
            "stats": {"total": 0, "average_score": 0.0},
            "matches": []
        }));
    });

    assert_eq!(dispatch(&controller, delete).await, Outcome::Applied);

    delete_mock.assert();
    reload_mock.assert();
    assert_eq!(controller.dialogs().confirms(), vec!["Delete this match?"]);
    assert!(controller
        .page()
        .html(el::MATCHES_TABLE)
        .contains("No matches saved yet"));
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/match/4");
        then.status(200);
    });

    let controller = controller(&server, false);
    assert_eq!(controller.delete_match(4).await, Outcome::Cancelled);
    assert_eq!(delete_mock.hits(), 0);
    assert!(controller.dialogs().alerts().is_empty());
}

#[tokio::test]
async fn test_failed_delete_does_not_reload() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/api/match/4");
        then.status(404).json_body(json!({"error": "Match not found"}));
    });
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/api/matches");
        then.status(200);
    });

    let controller = controller(&server, true);
    assert_eq!(controller.delete_match(4).await, Outcome::Failed);
    assert_eq!(controller.dialogs().alerts(), vec!["Error deleting match"]);
    assert_eq!(list_mock.hits(), 0);
}
