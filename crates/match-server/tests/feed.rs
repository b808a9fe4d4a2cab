//! End-to-end test of the websocket feed over a real socket.

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use futures_util::{Stream, StreamExt};
use match_server::db::init_db;
use match_server::notify::BroadcastNotifier;
use match_server::repo::MatchRepo;
use match_server::ws::create_broadcast;
use match_server::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;
use tower::ServiceExt;

async fn next_json<S>(stream: &mut S) -> Value
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("Timed out waiting for feed message")
            .expect("Feed closed")
            .expect("Feed error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

#[tokio::test]
async fn test_feed_welcomes_and_broadcasts_created_matches() {
    let db = init_db(":memory:").expect("Failed to init test db");
    let feed = create_broadcast(16);
    let state = AppState::new(Arc::new(MatchRepo::new(db)))
        .with_notifier(Arc::new(BroadcastNotifier::new(feed.clone())));
    let app = build_router(state, Some(feed));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_app = app.clone();
    let server = tokio::spawn(async move { axum::serve(listener, server_app).await });

    let (mut socket, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("Failed to connect to feed");

    let welcome = next_json(&mut socket).await;
    assert_eq!(welcome["type"], "welcome");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/matches")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"startTime":"2099-01-01T00:00:00Z","endTime":"2099-01-01T02:00:00Z"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let event = next_json(&mut socket).await;
    assert_eq!(event["type"], "match_created");
    assert_eq!(event["data"]["id"], 1);
    assert_eq!(event["data"]["status"], "scheduled");

    server.abort();
}
