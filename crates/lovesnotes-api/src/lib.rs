//! # lovesnotes-api
//!
//! HTTP API for LovesNotes: note CRUD plus text generation.
//!
//! Every route is served at the root and again under `/api`.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lovesnotes_api::{router, AppState, ServerConfig};
//! use lovesnotes_db::InMemoryNoteRepository;
//! use lovesnotes_inference::GeminiBackend;
//!
//! let state = AppState::new(
//!     Arc::new(InMemoryNoteRepository::new()),
//!     Arc::new(GeminiBackend::from_env()?),
//! );
//! let app = router(state, &ServerConfig::from_env()?);
//! ```

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request};
use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa::OpenApi;
use uuid::Uuid;

use lovesnotes_core::{GenerationBackend, NoteRepository};

pub use config::{parse_allowed_origins, NoteStoreKind, ServerConfig};
pub use error::{
    ApiError, MessageResponse, DELETE_NOTE_NOT_FOUND, GENERATION_FAILED, NOTE_NOT_FOUND,
};

// =============================================================================
// STATE
// =============================================================================

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
    pub generator: Arc<dyn GenerationBackend>,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteRepository>, generator: Arc<dyn GenerationBackend>) -> Self {
        Self { notes, generator }
    }
}

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// OPENAPI
// =============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LovesNotes API",
        description = "Personal notes with AI-assisted drafting"
    ),
    paths(
        handlers::notes::create_note,
        handlers::notes::list_notes,
        handlers::notes::update_note,
        handlers::notes::delete_note,
        handlers::generate::generate_text,
        handlers::health_check,
    ),
    components(schemas(
        lovesnotes_core::Note,
        lovesnotes_core::NoteInput,
        lovesnotes_core::NoteUpdate,
        lovesnotes_core::GenerateRequest,
        lovesnotes_core::GenerateResponse,
        MessageResponse,
    )),
    tags(
        (name = "Notes", description = "Note CRUD operations"),
        (name = "Generation", description = "AI text generation"),
        (name = "System", description = "Health checks and API description")
    )
)]
pub struct ApiDoc;

// =============================================================================
// ROUTER
// =============================================================================

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notes",
            post(handlers::notes::create_note).get(handlers::notes::list_notes),
        )
        .route(
            "/notes/:id",
            put(handlers::notes::update_note).delete(handlers::notes::delete_note),
        )
        .route("/generate", post(handlers::generate::generate_text))
}

fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Span for one HTTP request, tagged with the id set by [`MakeRequestUuidV7`].
fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Build the application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(api_routes())
        .nest("/api", api_routes())
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(handlers::openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(cors_layer(config.cors_origins()))
        .layer(RequestBodyLimitLayer::new(config::MAX_BODY_BYTES))
        .with_state(state)
}
