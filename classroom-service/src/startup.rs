use crate::config::ClassroomConfig;
use crate::handlers;
use crate::services::providers::anthropic::AnthropicTextProvider;
use crate::services::providers::TextProvider;
use crate::services::SheetStoreClient;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: ClassroomConfig,
    pub text_provider: Arc<dyn TextProvider>,
    pub sheet_store: Option<SheetStoreClient>,
}

impl AppState {
    /// The store URL is optional at startup; routes that need it fail with a
    /// configuration error before any network attempt.
    pub fn sheet_store(&self) -> Result<&SheetStoreClient, AppError> {
        self.sheet_store.as_ref().ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("SHEET_STORE_API_URL is missing"))
        })
    }
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: ClassroomConfig) -> Result<Self, AppError> {
        let text_provider: Arc<dyn TextProvider> =
            Arc::new(AnthropicTextProvider::new(config.anthropic.clone()));

        tracing::info!(
            model = %config.anthropic.model,
            "Initialized Anthropic text provider"
        );

        let sheet_store = config
            .sheet_store
            .api_url
            .as_deref()
            .map(SheetStoreClient::new);
        if sheet_store.is_none() {
            tracing::warn!(
                "SHEET_STORE_API_URL not set; submission and dashboard routes will refuse requests"
            );
        }

        let state = AppState {
            config: config.clone(),
            text_provider,
            sheet_store,
        };

        // Every route answers cross-origin callers; the dashboard and the
        // student client are served from a different origin.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route(
                "/api/analyze",
                post(handlers::analyze)
                    .options(handlers::cors_preflight)
                    .fallback(handlers::method_not_allowed),
            )
            .route(
                "/api/submissions",
                post(handlers::submit_submission).fallback(handlers::submit_method_not_allowed),
            )
            .route(
                "/api/dashboard",
                get(handlers::dashboard).fallback(handlers::method_not_allowed),
            )
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let listener = TcpListener::bind((config.common.host.as_str(), config.common.port))
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to bind TCP listener to {}:{}: {}",
                    config.common.host,
                    config.common.port,
                    e
                );
                AppError::from(e)
            })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
