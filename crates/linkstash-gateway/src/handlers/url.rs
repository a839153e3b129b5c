use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkstash_core::ShortCode;
use tracing::debug;

/// `POST /shorten`: 201 for a new mapping, 200 if the URL was already known.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected shorten request body");
        AppError::BadRequest("invalid request body".to_string())
    })?;

    // stored exactly as sent; whitespace only counts toward emptiness
    if request.url.trim().is_empty() {
        return Err(AppError::BadRequest("url cannot be empty".to_string()));
    }

    let outcome = state.store().save(&request.url).await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let body = ShortenResponse {
        short_url: state.short_url(&outcome.code),
    };
    Ok((status, Json(body)).into_response())
}

/// `GET /redirect/{code}`: 302 to the original URL.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let code = ShortCode::new_unchecked(code);

    match state.store().get(&code).await? {
        Some(original_url) => {
            debug!(code = %code, url = %original_url, "redirecting");
            Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]).into_response())
        }
        None => Err(AppError::NotFound),
    }
}
