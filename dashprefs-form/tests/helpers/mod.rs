//! Mock dashboard server for integration tests
//!
//! Serves the preferences and search endpoints from in-memory data on
//! `127.0.0.1:0` and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use dashprefs_form::PageReload;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

/// One request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct MockData {
    preferences: HashMap<String, Value>,
    dashboards: Vec<(Value, bool)>,
    requests: Vec<RecordedRequest>,
    fail_puts: bool,
    malformed_search: bool,
    required_token: Option<String>,
}

/// Shared mock server state, configured builder-style before start
#[derive(Clone, Default)]
pub struct MockState {
    inner: Arc<Mutex<MockData>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored preferences for a resource URI such as `user` or `teams/4`
    pub fn with_preferences(self, resource_uri: &str, preferences: Value) -> Self {
        self.inner
            .lock()
            .unwrap()
            .preferences
            .insert(resource_uri.to_string(), preferences);
        self
    }

    pub fn with_dashboard(self, id: i64, title: &str, starred: bool) -> Self {
        let hit = json!({
            "id": id,
            "uid": format!("uid-{}", id),
            "title": title,
            "uri": format!("db/{}", title.to_lowercase().replace(' ', "-")),
            "url": format!("/d/uid-{}", id),
            "type": "dash-db",
            "tags": [],
            "isStarred": starred,
            "folderId": 0
        });
        self.inner.lock().unwrap().dashboards.push((hit, starred));
        self
    }

    pub fn failing_puts(self) -> Self {
        self.inner.lock().unwrap().fail_puts = true;
        self
    }

    pub fn malformed_search(self) -> Self {
        self.inner.lock().unwrap().malformed_search = true;
        self
    }

    pub fn require_token(self, token: &str) -> Self {
        self.inner.lock().unwrap().required_token = Some(token.to_string());
        self
    }

    fn record(&self, method: &'static str, path: String, query: Option<String>, body: Option<Value>, headers: &HeaderMap) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        self.inner.lock().unwrap().requests.push(RecordedRequest {
            method,
            path,
            query,
            body,
            authorization,
        });
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let data = self.inner.lock().unwrap();
        match &data.required_token {
            None => true,
            Some(token) => headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(|v| v == format!("Bearer {}", token))
                .unwrap_or(false),
        }
    }
}

/// Running mock server; aborted on drop
pub struct MockDashboardServer {
    pub base_url: String,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockDashboardServer {
    pub async fn start(state: MockState) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind mock server");
        let addr = listener.local_addr().expect("Should have local address");

        let app = Router::new()
            .route("/api/search", get(search))
            .route("/api/teams/:id/preferences", get(get_team_preferences).put(put_team_preferences))
            .route("/api/:scope/preferences", get(get_preferences).put(put_preferences))
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.inner.lock().unwrap().requests.clone()
    }

    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.method == method).collect()
    }

    /// Current stored preferences for a resource URI
    pub fn stored_preferences(&self, resource_uri: &str) -> Option<Value> {
        self.state.inner.lock().unwrap().preferences.get(resource_uri).cloned()
    }
}

impl Drop for MockDashboardServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Reload hook counting how often the form asked for a reload
#[derive(Default)]
pub struct RecordingReload {
    count: AtomicUsize,
}

impl RecordingReload {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageReload for RecordingReload {
    async fn reload(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn search(State(state): State<MockState>, RawQuery(query): RawQuery, headers: HeaderMap) -> Response {
    state.record("GET", "/api/search".to_string(), query.clone(), None, &headers);
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut starred_only = false;
    let mut ids: Vec<i64> = Vec::new();
    for pair in query.as_deref().unwrap_or("").split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "starred" => starred_only = value == "true",
            "dashboardIds" => ids.extend(value.parse::<i64>().ok()),
            _ => {}
        }
    }

    let data = state.inner.lock().unwrap();
    if data.malformed_search {
        return (StatusCode::OK, "[{\"id\": ").into_response();
    }

    let hits: Vec<Value> = data
        .dashboards
        .iter()
        .filter(|(_, starred)| !starred_only || *starred)
        .filter(|(hit, _)| ids.is_empty() || ids.contains(&hit["id"].as_i64().unwrap_or(0)))
        .map(|(hit, _)| hit.clone())
        .collect();

    Json(hits).into_response()
}

fn read_preferences(state: &MockState, resource_uri: String, headers: &HeaderMap) -> Response {
    state.record("GET", format!("/api/{}/preferences", resource_uri), None, None, headers);
    if !state.authorized(headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.inner.lock().unwrap().preferences.get(&resource_uri) {
        Some(prefs) => Json(prefs.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response(),
    }
}

fn write_preferences(state: &MockState, resource_uri: String, body: Value, headers: &HeaderMap) -> Response {
    state.record("PUT", format!("/api/{}/preferences", resource_uri), None, Some(body.clone()), headers);
    if !state.authorized(headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut data = state.inner.lock().unwrap();
    if data.fail_puts {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save preferences").into_response();
    }
    data.preferences.insert(resource_uri, body);
    Json(json!({ "message": "Preferences updated" })).into_response()
}

async fn get_preferences(State(state): State<MockState>, Path(scope): Path<String>, headers: HeaderMap) -> Response {
    read_preferences(&state, scope, &headers)
}

async fn get_team_preferences(State(state): State<MockState>, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    read_preferences(&state, format!("teams/{}", id), &headers)
}

async fn put_preferences(
    State(state): State<MockState>,
    Path(scope): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    write_preferences(&state, scope, body, &headers)
}

async fn put_team_preferences(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    write_preferences(&state, format!("teams/{}", id), body, &headers)
}
