//! Conversion handlers: POST /convert and its preflight.

use crate::api::AppState;
use crate::error::ToHttpStatus;
use crate::request::RawConversionRequest;
use crate::types::ConversionReply;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// POST /convert - Convert a YouTube time range into a GIF
///
/// The body is parsed by hand rather than through the `Json` extractor so
/// malformed input gets the same reply shape as every other failure.
#[utoipa::path(
    post,
    path = "/convert",
    tag = "convert",
    request_body = RawConversionRequest,
    responses(
        (status = 200, description = "Clip produced", body = ConversionReply),
        (status = 400, description = "Invalid body, URL or time range", body = ConversionReply),
        (status = 502, description = "Download, trim, palette or encode failed", body = ConversionReply),
        (status = 503, description = "Required external tool is missing", body = ConversionReply),
        (status = 500, description = "Internal server error", body = ConversionReply)
    )
)]
pub async fn convert(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match RawConversionRequest::from_json(&body)
        .and_then(|raw| raw.validate(state.pipeline.max_duration_secs()))
    {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(code = e.error_code(), error = %e, "rejected conversion request");
            return e.into_response();
        }
    };

    match state.pipeline.convert(&request).await {
        Ok(output) => Json(ConversionReply::success(&output)).into_response(),
        Err(e) => {
            tracing::warn!(
                code = e.error_code(),
                video_id = %request.video_id,
                error = %e,
                "conversion failed"
            );
            e.into_response()
        }
    }
}

/// OPTIONS /convert - CORS preflight
///
/// Always succeeds with an empty body. When CORS is enabled the CORS layer
/// answers real preflights before they reach this handler.
#[utoipa::path(
    options,
    path = "/convert",
    tag = "convert",
    responses(
        (status = 200, description = "Preflight accepted")
    )
)]
pub async fn convert_preflight() -> StatusCode {
    StatusCode::OK
}
