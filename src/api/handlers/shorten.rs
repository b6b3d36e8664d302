//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for one long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "long_url": "https://example.com",
///   "code": "ungWv48Bz",
///   "short_url": "http://localhost:3000/ungWv48Bz"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the URL is missing or not an absolute HTTP(S) URL
/// - 409 Conflict if the URL has already been shortened or the code is taken
/// - 500 Internal Server Error on storage or entropy failures
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let mapping = state.url_service.shorten_url(&payload.url).await?;
    let short_url = state
        .url_service
        .short_url(&state.base_url, &mapping.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            long_url: mapping.long_url,
            code: mapping.short_code,
            short_url,
        }),
    ))
}
