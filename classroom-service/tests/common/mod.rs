use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use classroom_service::config::{AnthropicConfig, ClassroomConfig, SheetStoreConfig};
use classroom_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// Spawn the service against the given upstream URLs. `None` leaves the
    /// sheet store unconfigured.
    pub async fn spawn(anthropic_url: &str, sheet_store_url: Option<String>) -> Self {
        let config = ClassroomConfig {
            common: CoreConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            anthropic: AnthropicConfig {
                api_key: Secret::new("test-api-key".to_string()),
                api_version: "2023-06-01".to_string(),
                model: "claude-3-5-sonnet".to_string(),
                base_url: anthropic_url.to_string(),
            },
            sheet_store: SheetStoreConfig {
                api_url: sheet_store_url,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address }
    }
}

/// Stub upstream server answering every request with a fixed status and
/// JSON body, counting how often it was hit.
pub struct StubUpstream {
    pub uri: String,
    hits: Arc<AtomicUsize>,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: serde_json::Value,
    hits: Arc<AtomicUsize>,
}

async fn respond(State(state): State<StubState>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (state.status, axum::Json(state.body.clone()))
}

impl StubUpstream {
    pub async fn spawn(status: StatusCode, body: serde_json::Value) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));

        let router = Router::new().fallback(respond).with_state(StubState {
            status,
            body,
            hits: Arc::clone(&hits),
        });

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub upstream");
        let addr = listener.local_addr().expect("Failed to read stub address");

        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        StubUpstream {
            uri: format!("http://{}", addr),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}
