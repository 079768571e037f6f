//! Programmable mock of the balancer's modification API.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::get, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use url::Url;

use balancer_console::client::HttpBackendApi;

#[derive(Default)]
struct MockState {
    backends: Vec<Value>,
    list_override: Option<(u16, String)>,
    gets: usize,
    request_ids: Vec<String>,
    puts: Vec<String>,
    deletes: Vec<String>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockBalancer {
    pub addr: SocketAddr,
    state: Shared,
}

impl MockBalancer {
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn api(&self) -> HttpBackendApi {
        HttpBackendApi::new(&self.base_url(), Duration::from_secs(2)).unwrap()
    }

    pub fn set_backends(&self, backends: Vec<Value>) {
        self.state.lock().unwrap().backends = backends;
    }

    /// Answer every GET with this status and raw body.
    pub fn respond_with(&self, status: u16, body: &str) {
        self.state.lock().unwrap().list_override = Some((status, body.to_string()));
    }

    pub fn gets(&self) -> usize {
        self.state.lock().unwrap().gets
    }

    pub fn request_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().request_ids.clone()
    }

    pub fn puts(&self) -> Vec<String> {
        self.state.lock().unwrap().puts.clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.state.lock().unwrap().deletes.clone()
    }
}

fn record_request_id(state: &mut MockState, headers: &HeaderMap) {
    if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        state.request_ids.push(id.to_string());
    }
}

fn same_backend(a: &Value, b: &Value) -> bool {
    a["host"] == b["host"] && a["port"].to_string().trim_matches('"') == b["port"].to_string().trim_matches('"')
}

async fn list(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, String) {
    let mut state = state.lock().unwrap();
    state.gets += 1;
    record_request_id(&mut state, &headers);

    if let Some((status, body)) = state.list_override.clone() {
        return (StatusCode::from_u16(status).unwrap(), body);
    }
    if state.backends.is_empty() {
        return (StatusCode::OK, String::new());
    }
    (StatusCode::OK, Value::Array(state.backends.clone()).to_string())
}

async fn add(State(state): State<Shared>, headers: HeaderMap, body: String) -> StatusCode {
    let mut state = state.lock().unwrap();
    record_request_id(&mut state, &headers);
    state.puts.push(body.clone());

    let Ok(mut info) = serde_json::from_str::<Value>(&body) else {
        return StatusCode::BAD_REQUEST;
    };
    if !state.backends.iter().any(|b| same_backend(b, &info)) {
        info["alive"] = Value::Bool(true);
        state.backends.push(info);
    }
    StatusCode::OK
}

async fn remove(State(state): State<Shared>, headers: HeaderMap, body: String) -> StatusCode {
    let mut state = state.lock().unwrap();
    record_request_id(&mut state, &headers);
    state.deletes.push(body.clone());

    let Ok(info) = serde_json::from_str::<Value>(&body) else {
        return StatusCode::BAD_REQUEST;
    };
    state.backends.retain(|b| !same_backend(b, &info));
    StatusCode::OK
}

/// Start a mock on an ephemeral port.
pub async fn start_mock_balancer(backends: Vec<Value>) -> MockBalancer {
    let state: Shared = Arc::new(Mutex::new(MockState {
        backends,
        ..MockState::default()
    }));

    let app = Router::new()
        .route("/backends", get(list).put(add).delete(remove))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBalancer { addr, state }
}

/// An address nothing listens on.
pub async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
