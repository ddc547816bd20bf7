//! End-to-end tests: periodic emitter + HTTP API + lifecycle over a
//! real socket.

use std::sync::Arc;
use std::time::Duration;

use ticklog::config::ListenerConfig;
use ticklog::emitter::{FixedGenerator, PeriodicEmitter};
use ticklog::http;
use ticklog::lifecycle::{Orchestrator, ShutdownReport};
use ticklog::store::{LogStorage, MemoryStore};
use ticklog::Shutdown;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

async fn start_service(
    port: u16,
    interval_ms: u64,
) -> (
    Arc<MemoryStore>,
    Shutdown,
    tokio::task::JoinHandle<Result<(), ShutdownReport>>,
) {
    let store = Arc::new(MemoryStore::new());

    let mut orchestrator = Orchestrator::new(Duration::from_secs(5), Duration::from_secs(5));
    let emitter = PeriodicEmitter::new(
        Duration::from_millis(interval_ms),
        store.clone(),
        Arc::new(FixedGenerator::new("abc123")),
    );
    orchestrator.spawn_worker("emitter", |shutdown| emitter.run(shutdown));

    let listener_config = ListenerConfig {
        bind_address: format!("127.0.0.1:{port}"),
        request_timeout_secs: 5,
    };
    let store_dyn: Arc<dyn LogStorage> = store.clone();
    let app = http::build_router(&listener_config, store_dyn);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .unwrap();
    let shutdown = orchestrator.shutdown_handle();
    let handle = tokio::spawn(orchestrator.run(listener, app));

    (store, shutdown, handle)
}

#[tokio::test]
async fn logs_and_status_endpoints() {
    let port = 28391;
    let (_store, shutdown, handle) = start_service(port, 100).await;

    tokio::time::sleep(Duration::from_millis(350)).await;
    let client = client();

    let body: serde_json::Value = client
        .get(format!("http://127.0.0.1:{port}/logs"))
        .send()
        .await
        .expect("service unreachable")
        .json()
        .await
        .unwrap();
    let logs = body["logs"].as_array().unwrap();
    assert!(logs.len() >= 2, "immediate emission plus at least one tick");
    for entry in logs {
        assert_eq!(entry["value"], "abc123");
        let ts = entry["timestamp"].as_str().unwrap();
        chrono::DateTime::parse_from_rfc3339(ts).expect("timestamp must be RFC 3339");
    }

    let body: serde_json::Value = client
        .get(format!("http://127.0.0.1:{port}/status?n=1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["logs"].as_array().unwrap().len(), 1);

    // Default window is 10 entries.
    let body: serde_json::Value = client
        .get(format!("http://127.0.0.1:{port}/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["logs"].as_array().unwrap().len() <= 10);

    let res = client
        .get(format!("http://127.0.0.1:{port}/healthz"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
    handle.await.unwrap().expect("clean shutdown");
}

#[tokio::test]
async fn invalid_n_is_a_client_error() {
    let port = 28392;
    let (_store, shutdown, handle) = start_service(port, 1000).await;

    tokio::time::sleep(Duration::from_millis(200)).await;
    let client = client();

    let res = client
        .get(format!("http://127.0.0.1:{port}/status?n=abc"))
        .send()
        .await
        .expect("service must survive bad input");
    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("invalid query parameter 'n'"));

    // Negative n yields an empty window, not an error.
    let res = client
        .get(format!("http://127.0.0.1:{port}/status?n=-5"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["logs"].as_array().unwrap().is_empty());

    shutdown.trigger();
    handle.await.unwrap().expect("clean shutdown");
}

#[tokio::test]
async fn shutdown_stops_emitter_and_listener() {
    let port = 28393;
    let (store, shutdown, handle) = start_service(port, 100).await;

    tokio::time::sleep(Duration::from_millis(250)).await;
    shutdown.trigger();

    tokio::time::timeout(Duration::from_secs(3), handle)
        .await
        .expect("shutdown must finish within its deadlines")
        .unwrap()
        .expect("clean shutdown");

    // No further emissions once stopped.
    let count = store.get_all().len();
    assert!((2..=4).contains(&count), "got {count} entries");
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(store.get_all().len(), count);

    // Listener is gone; new connections are refused.
    let res = client()
        .get(format!("http://127.0.0.1:{port}/healthz"))
        .send()
        .await;
    assert!(res.is_err());
}
