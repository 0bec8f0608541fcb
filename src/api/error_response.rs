//! HTTP error response handling for the API
//!
//! Every error leaves the service as a [`ConversionReply`] failure body with
//! the status code chosen by [`ToHttpStatus`]. Successful replies are sent
//! by the handler as plain `Json` with 200.

use crate::error::{Error, ToHttpStatus};
use crate::types::ConversionReply;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status_code, Json(ConversionReply::failure(self.to_string()))).into_response()
    }
}
