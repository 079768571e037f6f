//! End-to-end console behaviour against a mock modification API.

use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;

use balancer_console::client::HttpBackendApi;
use balancer_console::console::spawn_line_reader;
use balancer_console::model::BackendKey;
use balancer_console::poller::SessionState;
use balancer_console::render::MemorySurface;
use balancer_console::{Console, Shutdown};

mod common;

const INTERVAL: Duration = Duration::from_millis(100);

fn console(api: HttpBackendApi) -> (Console<HttpBackendApi>, MemorySurface) {
    let surface = MemorySurface::new();
    let console = Console::new(api, Box::new(surface.clone()), INTERVAL);
    (console, surface)
}

/// Run the console loop on `input` for `duration`, then hand it back.
async fn run_for(console: &mut Console<HttpBackendApi>, input: &'static [u8], duration: Duration) {
    let shutdown = Shutdown::new();
    console.start();
    let _ = timeout(duration, console.run(spawn_line_reader(input), shutdown.signal())).await;
}

#[tokio::test]
async fn test_single_backend_renders_one_row() {
    let mock = common::start_mock_balancer(vec![json!({"host": "10.0.0.1", "port": 8080, "alive": true})]).await;
    let (mut console, surface) = console(mock.api());

    run_for(&mut console, b"", Duration::from_millis(350)).await;

    let table = surface.current_table().expect("a table was shown");
    assert_eq!(table.len(), 1);
    let row = &table.rows()[0];
    assert_eq!(row.host, "10.0.0.1");
    assert_eq!(row.port, 8080);
    assert_eq!(row.status.label(), "ALIVE");
    assert_eq!(row.delete.target(), &BackendKey::new("10.0.0.1", 8080));

    assert!(mock.gets() >= 2, "polling continued (got {} reads)", mock.gets());
    assert!(surface.alerts().is_empty());
}

#[tokio::test]
async fn test_balancer_string_ports_render() {
    let mock = common::start_mock_balancer(vec![
        json!({"host": "127.0.0.1", "port": "3000", "alive": true}),
        json!({"host": "127.0.0.1", "port": "3001", "alive": false}),
    ])
    .await;
    let (mut console, surface) = console(mock.api());

    run_for(&mut console, b"", Duration::from_millis(200)).await;

    let table = surface.current_table().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1].port, 3001);
    assert_eq!(table.rows()[1].status.label(), "DEAD");
}

#[tokio::test]
async fn test_unreachable_server_halts_polling() {
    let addr = common::closed_address().await;
    let base = url::Url::parse(&format!("http://{}", addr)).unwrap();
    let api = HttpBackendApi::new(&base, Duration::from_secs(2)).unwrap();
    let (mut console, surface) = console(api);

    run_for(&mut console, b"", Duration::from_millis(600)).await;

    assert_eq!(
        surface.alerts(),
        vec!["Fetching update failed: Request error.\n\nFetching stopped.".to_string()]
    );
    assert_eq!(console.session().state(), SessionState::Failed);
    assert_eq!(console.session().fetches(), 1);
}

#[tokio::test]
async fn test_invalid_json_halts_polling() {
    let mock = common::start_mock_balancer(vec![]).await;
    mock.respond_with(200, "{");
    let (mut console, surface) = console(mock.api());

    run_for(&mut console, b"", Duration::from_millis(500)).await;

    let alerts = surface.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("Invalid json data."));
    assert_eq!(mock.gets(), 1);
    assert_eq!(surface.current_table().map(|t| t.len()), Some(0));
}

#[tokio::test]
async fn test_server_error_halts_polling() {
    let mock = common::start_mock_balancer(vec![]).await;
    mock.respond_with(500, "internal error");
    let (mut console, surface) = console(mock.api());

    run_for(&mut console, b"", Duration::from_millis(400)).await;

    assert_eq!(surface.alerts().len(), 1);
    assert!(surface.alerts()[0].contains("Unexpected response status 500."));
    assert_eq!(mock.gets(), 1);
}

#[tokio::test]
async fn test_malformed_record_shows_empty_table() {
    let mock = common::start_mock_balancer(vec![
        json!({"host": "10.0.0.1", "port": 8080, "alive": true}),
        json!({"host": "10.0.0.2", "port": 8081}),
    ])
    .await;
    let (mut console, surface) = console(mock.api());

    run_for(&mut console, b"", Duration::from_millis(400)).await;

    assert_eq!(surface.current_table().map(|t| t.len()), Some(0));
    assert!(surface.alerts()[0].contains("Invalid backend data."));
    assert_eq!(mock.gets(), 1);
}

#[tokio::test]
async fn test_add_form_sends_put_and_resyncs() {
    let mock = common::start_mock_balancer(vec![json!({"host": "10.0.0.1", "port": 8080, "alive": true})]).await;
    let (mut console, surface) = console(mock.api());

    run_for(&mut console, b"add 10.0.0.2 9090\n", Duration::from_millis(400)).await;

    assert_eq!(mock.puts(), vec![r#"{"host":"10.0.0.2","port":9090}"#.to_string()]);
    assert!(console.form().is_empty());
    assert!(console.session().restarts() >= 2);

    let table = surface.current_table().unwrap();
    let hosts: Vec<&str> = table.rows().iter().map(|r| r.host.as_str()).collect();
    assert_eq!(hosts, vec!["10.0.0.1", "10.0.0.2"]);
}

#[tokio::test]
async fn test_delete_sends_body_and_resyncs() {
    let mock = common::start_mock_balancer(vec![json!({"host": "10.0.0.1", "port": 8080, "alive": true})]).await;
    let (mut console, surface) = console(mock.api());

    run_for(&mut console, b"del 10.0.0.1 8080\n", Duration::from_millis(400)).await;

    assert_eq!(mock.deletes(), vec![r#"{"host":"10.0.0.1","port":8080}"#.to_string()]);
    assert_eq!(console.session().restarts(), 2);
    assert_eq!(surface.current_table().map(|t| t.len()), Some(0));
    assert!(surface.alerts().is_empty());
}

#[tokio::test]
async fn test_hidden_console_stops_reading() {
    let mock = common::start_mock_balancer(vec![]).await;
    let (mut console, _surface) = console(mock.api());

    run_for(&mut console, b"hide\n", Duration::from_millis(450)).await;

    // Only the initial load; every tick was skipped.
    assert_eq!(mock.gets(), 1);
    assert_eq!(console.session().state(), SessionState::Running);
}

#[tokio::test]
async fn test_requests_carry_request_ids() {
    let mock = common::start_mock_balancer(vec![]).await;
    let (mut console, _surface) = console(mock.api());

    run_for(&mut console, b"", Duration::from_millis(250)).await;

    let ids = mock.request_ids();
    assert_eq!(ids.len(), mock.gets());
    assert!(ids.iter().all(|id| id.len() == 36));
}
