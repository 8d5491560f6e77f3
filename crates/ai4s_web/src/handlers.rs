use std::sync::Arc;

use ai4s_core::{ArticleRequest, ArticleResponse};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, INVALID_JSON_MESSAGE};
use crate::AppState;

/// Incoming body; fields are optional so that missing ones produce the
/// fixed validation message rather than a deserializer error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateArticleBody {
    topic: Option<String>,
    creator_name: Option<String>,
    previous_blog: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

pub async fn generate_article(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ArticleResponse>, ApiError> {
    generate(&state, None, &body).await
}

/// Same as [`generate_article`] under `/api/{project}/article`.
pub async fn generate_project_article(
    State(state): State<Arc<AppState>>,
    Path(project): Path<String>,
    body: Bytes,
) -> Result<Json<ArticleResponse>, ApiError> {
    generate(&state, Some(&project), &body).await
}

async fn generate(state: &AppState, project: Option<&str>, body: &[u8]) -> Result<Json<ArticleResponse>, ApiError> {
    let payload: GenerateArticleBody = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting unparseable body");
        ApiError::BadRequest(INVALID_JSON_MESSAGE.to_string())
    })?;

    let request = ArticleRequest::new(
        payload.topic.unwrap_or_default(),
        payload.creator_name.unwrap_or_default(),
        payload.previous_blog,
    )?;

    tracing::info!(
        project = project.unwrap_or("default"),
        topic = request.topic(),
        has_previous_blog = request.previous_blog().is_some(),
        "generating article"
    );

    let response = state.generator.generate(&request).await?;
    Ok(Json(response))
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "ai4s",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [("content-type", "text/plain; charset=utf-8")],
        "Not Found",
    )
}
