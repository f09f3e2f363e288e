//! Router, handlers, and error mapping for the navigation service.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use pdfnav::{GroundingPayload, NavOptions, SynthesisParams, TargetSpec, TocItem};

/// Fixed ceiling for the source document download.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Server configuration assembled from the command line.
pub struct ServerConfig {
    pub listen_addr: String,
    pub body_limit_kb: usize,
}

#[derive(Clone)]
struct AppState {
    http: reqwest::Client,
}

// --- Error Handling ---

pub enum AppError {
    BadRequest(String),
    UpstreamFetch(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::BadRequest(s) => (StatusCode::BAD_REQUEST, s),
            AppError::UpstreamFetch(s) => {
                tracing::warn!(target: "pdfnav-server", "upstream fetch failed: {}", s);
                (StatusCode::BAD_GATEWAY, s)
            }
            AppError::Internal(e) => {
                tracing::error!(target: "pdfnav-server", "Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

impl From<pdfnav::Error> for AppError {
    fn from(err: pdfnav::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

// --- Request Types ---

#[derive(Debug, Deserialize)]
struct AddNavigationRequest {
    pdf_url: Option<String>,
    toc_items: Option<Vec<TocItem>>,
    grounding_data: Option<GroundingPayload>,
    start_y: Option<f64>,
    spacing: Option<f64>,
    #[serde(default)]
    show_borders: bool,
}

/// Target-spec precedence: explicit list, then grounding payload, then
/// an auto-generated grid.
fn build_target_spec(req: &AddNavigationRequest) -> TargetSpec {
    if let Some(items) = &req.toc_items {
        return TargetSpec::Explicit(items.clone());
    }
    if let Some(payload) = &req.grounding_data {
        return TargetSpec::Grounding(payload.clone());
    }
    let defaults = SynthesisParams::default();
    TargetSpec::Synthesized(SynthesisParams {
        start_y: req.start_y.unwrap_or(defaults.start_y),
        spacing: req.spacing.unwrap_or(defaults.spacing),
    })
}

// --- Handlers ---

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "online",
        "service": "pdfnav TOC Navigation API",
        "version": env!("CARGO_PKG_VERSION"),
        "usage": "POST to /add-navigation with pdf_url and toc_items",
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn add_navigation_handler(
    State(state): State<AppState>,
    Json(req): Json<AddNavigationRequest>,
) -> Result<Response, AppError> {
    let url = req
        .pdf_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("pdf_url is required".to_string()))?
        .to_string();

    tracing::info!(target: "pdfnav-server", %url, "processing document");
    let bytes = fetch_source(&state.http, &url).await?;

    let spec = build_target_spec(&req);
    let options = NavOptions::new().with_borders(req.show_borders);

    // The pipeline is CPU-bound; keep the runtime responsive.
    let result =
        tokio::task::spawn_blocking(move || pdfnav::add_navigation(&bytes, &spec, &options))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))??;

    tracing::info!(
        target: "pdfnav-server",
        links = result.links_added,
        requested = result.targets_requested,
        pages = result.page_count,
        "navigation links added"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"document_with_navigation.pdf\"",
            ),
        ],
        result.bytes,
    )
        .into_response())
}

async fn fetch_source(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, AppError> {
    let response = client
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .map_err(|e| AppError::UpstreamFetch(format!("failed to fetch {}: {}", url, e)))?
        .error_for_status()
        .map_err(|e| AppError::UpstreamFetch(format!("source returned error status: {}", e)))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::UpstreamFetch(format!("failed to read source body: {}", e)))?;

    tracing::info!(target: "pdfnav-server", len = bytes.len(), "downloaded source document");
    Ok(bytes.to_vec())
}

// --- Server ---

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let state = AppState {
        http: reqwest::Client::new(),
    };

    let app = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/add-navigation", post(add_navigation_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.body_limit_kb * 1024));

    let addr: SocketAddr = config.listen_addr.parse()?;
    tracing::info!(target: "pdfnav-server", "listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!(target: "pdfnav-server", "shutting down gracefully");
}
