//! HTTP gateway for Lectern.
//!
//! A single endpoint at `/`:
//! - `GET` returns the available transcript filenames as JSON (for the
//!   client-side selection UI);
//! - `OPTIONS` answers CORS preflight with no body;
//! - `POST` takes the JSON ask body and returns the composed answer as
//!   `text/plain`, survey comment included;
//! - any other verb is 405.
//!
//! All pipeline failures convert here to a short plain-text message with the
//! right status — never a stack trace or a raw upstream body.
//!
//! Built on Axum.

use axum::{
    Router,
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use lectern_assistant::Assistant;
use lectern_core::error::{Error, RequestError};
use lectern_core::request::AskRequest;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub assistant: Assistant,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with the single course-assistant endpoint.
///
/// The CORS policy is deliberately open: the caller is a static course page
/// that may be served from any origin, and there is no caller authentication.
pub fn build_router(state: SharedState) -> Router {
    // OPTIONS never reaches the route: the CORS layer answers preflight
    // itself with an empty body and the allow-* headers.
    Router::new()
        .route("/", get(transcripts_handler).post(answer_handler))
        .layer(cors_layer())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Start the gateway HTTP server with the real generation client and survey
/// sink wired in.
pub async fn start(config: lectern_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let client = lectern_providers::build_from_config(&config)?;
    let sink = lectern_telemetry::build_from_config(&config)?;
    let assistant = Assistant::new(config, client, sink);

    let app = build_router(Arc::new(GatewayState { assistant }));

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

async fn transcripts_handler(State(state): State<SharedState>) -> Response {
    match state.assistant.available_transcripts().await {
        Ok(names) => Json(names).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn answer_handler(State(state): State<SharedState>, body: String) -> Response {
    // Parse by hand so a malformed body maps to our client-error text
    // instead of the framework's default rejection.
    let request: AskRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(_) => return error_response(&RequestError::MalformedBody.into()),
    };

    match state.assistant.answer(&request).await {
        Ok(response) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            response.full_text(),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

// --- Error mapping ---

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Request(_) => StatusCode::BAD_REQUEST,
        Error::Transcript(_) => StatusCode::NOT_FOUND,
        Error::Materials(_) | Error::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        Error::Generation(_) => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(err: &Error) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        error!(%err, status = status.as_u16(), "Request failed");
    } else {
        warn!(%err, status = status.as_u16(), "Request rejected");
    }
    (status, err.to_string()).into_response()
}
