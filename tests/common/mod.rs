#![allow(dead_code)]

//! In-process stand-in for the recommendation service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedReceiver;

use movierec_client::{App, Event};

/// Requests the stub has seen, in arrival order
#[derive(Clone, Default)]
pub struct Recorded {
    pub searches: Arc<Mutex<Vec<String>>>,
    pub recommends: Arc<Mutex<Vec<Value>>>,
    pub request_ids: Arc<Mutex<Vec<String>>>,
}

impl Recorded {
    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn recommends(&self) -> Vec<Value> {
        self.recommends.lock().unwrap().clone()
    }

    pub fn request_ids(&self) -> Vec<String> {
        self.request_ids.lock().unwrap().clone()
    }

    fn record_request_id(&self, headers: &HeaderMap) {
        if let Some(id) = headers.get("x-request-id").and_then(|h| h.to_str().ok()) {
            self.request_ids.lock().unwrap().push(id.to_string());
        }
    }
}

fn catalogue() -> Vec<(i64, &'static str, f64)> {
    vec![
        (27205, "Inception", 8.8),
        (157336, "Interstellar", 8.6),
        (155, "The Dark Knight", 9.0),
    ]
}

async fn health(State(recorded): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    recorded.record_request_id(&headers);
    Json(json!({ "status": "healthy", "total_movies": catalogue().len() }))
}

async fn search(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    recorded.record_request_id(&headers);
    let query = params.get("q").cloned().unwrap_or_default();
    recorded.searches.lock().unwrap().push(query.clone());

    if query.chars().count() < 2 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Search query must be at least 2 characters"
            })),
        );
    }

    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(10);
    let needle = query.to_lowercase();
    let results: Vec<Value> = catalogue()
        .into_iter()
        .filter(|(_, title, _)| title.to_lowercase().contains(&needle))
        .take(limit)
        .map(|(id, title, rating)| json!({ "id": id, "title": title, "rating": rating }))
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "query": query,
            "count": results.len(),
            "results": results
        })),
    )
}

async fn recommend(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    recorded.record_request_id(&headers);
    recorded.recommends.lock().unwrap().push(body.clone());
    let title = body["title"].as_str().unwrap_or_default().to_string();

    match title.as_str() {
        "Inception" => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "movie": title,
                "count": 2,
                "recommendations": [
                    {"id": 157336, "title": "Interstellar", "similarity_score": 0.92, "rating": 8.6, "vote_count": 32145},
                    {"id": 155, "title": "The Dark Knight", "similarity_score": 0.81, "rating": 9.0, "vote_count": null}
                ]
            })),
        ),
        "Slow Movie" => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "recommendations": [{"id": 155, "title": "The Dark Knight", "similarity_score": 0.5}]
                })),
            )
        }
        "Declined Movie" => (
            StatusCode::OK,
            Json(json!({ "success": false, "error": "Similarity data unavailable for this movie" })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": format!("Movie \"{}\" not found in database", title)
            })),
        ),
    }
}

/// Starts the stub on an ephemeral port and returns its API base URL
pub async fn spawn_stub() -> (String, Recorded) {
    let recorded = Recorded::default();
    let router = Router::new()
        .route("/api/health", get(health))
        .route("/api/search", get(search))
        .route("/api/recommend", post(recommend))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}/api", addr), recorded)
}

/// Base URL of a port nothing is listening on
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

/// Handles events until `done` holds, failing after five seconds
pub async fn drive_until(
    app: &mut App,
    events: &mut UnboundedReceiver<Event>,
    done: impl Fn(&App) -> bool,
) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !done(&*app) {
            app.step(events).await.expect("event channel closed");
        }
    })
    .await
    .expect("timed out waiting for app state");
}
