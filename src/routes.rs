use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{error::ApiError, models::WallpaperRequest, prompt, stability::ImageBackend};

#[derive(Clone)]
pub struct AppState {
    pub api_key: Option<String>,
    pub backend: Arc<dyn ImageBackend>,
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/wallpaper", post(generate_wallpaper).options(preflight))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE]),
        )
}

/// Validates the selection, composes the prompt, and proxies one generation
/// call. Every path out of here emits exactly one terminal response.
pub async fn generate_wallpaper(
    State(state): State<AppState>,
    payload: Result<Json<WallpaperRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::MalformedBody(e.body_text()))?;

    let full_prompt = prompt::compose_prompt(&body.theme, &body.style)?;

    // Credential is checked per request so a misconfigured server answers
    // with a distinct error instead of dialing out with an empty key.
    let api_key = state.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;

    tracing::info!(theme = %body.theme, style = %body.style, prompt = %full_prompt, "🚀 Generating wallpaper");

    let image = state.backend.generate(api_key, &full_prompt).await?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("image/jpeg"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(image.len()));
    // Every generation is unique; never let intermediaries reuse one.
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    Ok((StatusCode::OK, headers, image).into_response())
}

/// Static answer for CORS preflight. No body, permissive headers only.
pub async fn preflight() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    (StatusCode::OK, headers).into_response()
}
