//! OpenAPI documentation and schema generation
//!
//! Served at `/openapi.json` and, when enabled, browsable at `/swagger-ui`.

use utoipa::OpenApi;

/// OpenAPI documentation for the yt2gif REST API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "yt2gif REST API",
        version = "0.1.0",
        description = "Turn a YouTube time range into an animated GIF",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::routes::convert,
        crate::api::routes::convert_preflight,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(
        schemas(
            crate::request::RawConversionRequest,
            crate::types::ConversionReply,
        )
    ),
    tags(
        (name = "convert", description = "Clip conversion"),
        (name = "system", description = "Health and API documentation")
    )
)]
pub struct ApiDoc;
