//! Stand-in for the balancer's modification API.
//!
//! Serves `GET/PUT/DELETE /backends` on 127.0.0.1:8081, encoding ports as
//! strings the way the balancer does. Run it, then `cargo run` in another
//! terminal.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BackendInfo {
    host: String,
    port: u16,
}

type Backends = Arc<Mutex<Vec<(String, u16, bool)>>>;

async fn list(State(backends): State<Backends>) -> (StatusCode, String) {
    let backends = backends.lock().unwrap();
    if backends.is_empty() {
        return (StatusCode::OK, String::new());
    }
    let body: Vec<Value> = backends
        .iter()
        .map(|(host, port, alive)| json!({"host": host, "port": port.to_string(), "alive": alive}))
        .collect();
    (StatusCode::OK, Value::Array(body).to_string())
}

async fn add(State(backends): State<Backends>, Json(info): Json<BackendInfo>) -> StatusCode {
    let mut backends = backends.lock().unwrap();
    if !backends.iter().any(|(h, p, _)| *h == info.host && *p == info.port) {
        println!("add {}:{}", info.host, info.port);
        backends.push((info.host, info.port, true));
    }
    StatusCode::OK
}

async fn remove(State(backends): State<Backends>, Json(info): Json<BackendInfo>) -> StatusCode {
    println!("remove {}:{}", info.host, info.port);
    backends
        .lock()
        .unwrap()
        .retain(|(h, p, _)| !(*h == info.host && *p == info.port));
    StatusCode::OK
}

#[tokio::main]
async fn main() {
    let backends: Backends = Arc::new(Mutex::new(vec![
        ("127.0.0.1".to_string(), 3000, true),
        ("127.0.0.1".to_string(), 3001, false),
    ]));

    let app = Router::new()
        .route("/backends", get(list).put(add).delete(remove))
        .with_state(backends);

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Mock modification API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
