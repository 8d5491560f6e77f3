//! HTTP front of the article generator.
//!
//! ## Routes
//!
//! - `OPTIONS *` - CORS preflight, answered by the CORS layer
//! - `POST /api/article` - Generate an article
//! - `POST /api/{project}/article` - Same, namespaced by project
//! - `GET /health` - Health check (JSON)
//! - anything else - 404 plain text

use std::sync::Arc;

use ai4s_core::{Error, Result};
use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::ServiceConfig;
pub use state::AppState;

/// Methods and headers advertised on every response, preflight or not.
const ALLOWED_METHODS: &str = "POST,OPTIONS";
const ALLOWED_HEADERS: &str = "content-type,authorization";

pub fn create_app(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.config.cors_origin)?;

    let router = Router::new()
        .route("/api/article", post(handlers::generate_article))
        .route("/api/:project/article", post(handlers::generate_project_article))
        .route("/health", get(handlers::health_check))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }))
                .layer(cors)
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(ALLOWED_METHODS),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOWED_HEADERS),
                )),
        );

    Ok(router)
}

/// CORS policy for `origin`, where `*` allows any origin.
fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        let value = HeaderValue::from_str(origin)
            .map_err(|_| Error::Validation(format!("invalid CORS origin: {origin:?}")))?;
        AllowOrigin::exact(value)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Bind `config.bind_addr` and serve until the process is stopped.
pub async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let app = create_app(AppState::from_config(config)?)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting article service");

    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use ai4s_core::{ArticleRequest, ArticleResponse, Error, Result};
    pub use crate::{create_app, serve, AppState, ServiceConfig};
}
