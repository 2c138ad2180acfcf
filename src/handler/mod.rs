//! HTTP boundary for the serverless functions in `api/`.
//!
//! The `api/*.rs` binaries stay thin: they build configuration and hand the
//! request to these functions, which own method dispatch, CORS, body
//! decoding and the mapping from `GatewayError` to status codes.

pub mod cors;

use serde_json::json;
use vercel_runtime::{Body, Error, Request, Response, StatusCode};

use crate::classifier::Classifier;
use crate::error::GatewayError;
use crate::gateway::ClassificationGateway;
use crate::models::ClassificationRequest;

pub use cors::CorsPolicy;

/// POST /api/analyze — classify the `text` field of a JSON body.
///
/// `OPTIONS` answers the browser preflight with 204; other methods get 405.
pub async fn handle_analyze<C: Classifier>(
    req: Request,
    gateway: &ClassificationGateway<C>,
    cors: &CorsPolicy,
) -> Result<Response<Body>, Error> {
    let origin = request_origin(&req);
    let cors_headers = cors.headers(origin.as_deref());

    if *req.method() == http::Method::OPTIONS {
        return respond(StatusCode::NO_CONTENT, &cors_headers, Body::Empty);
    }

    if *req.method() != http::Method::POST {
        tracing::warn!(method = %req.method(), "rejecting non-POST request");
        return json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            &cors_headers,
            &json!({ "error": "Method Not Allowed" }),
        );
    }

    let request: ClassificationRequest = match serde_json::from_slice(body_bytes(req.body())) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, "invalid JSON body");
            return json_response(
                StatusCode::BAD_REQUEST,
                &cors_headers,
                &json!({ "error": "Invalid JSON body." }),
            );
        }
    };

    match gateway.classify(&request).await {
        Ok(result) => json_response(StatusCode::OK, &cors_headers, &serde_json::to_value(&result)?),
        Err(err) => error_response(&err, &cors_headers),
    }
}

/// Answer for a request that could not be served because configuration
/// failed to load. Preflight still succeeds so browsers see the real error.
pub fn config_failure(
    req: &Request,
    err: &GatewayError,
    cors: &CorsPolicy,
) -> Result<Response<Body>, Error> {
    let origin = request_origin(req);
    let cors_headers = cors.headers(origin.as_deref());

    if *req.method() == http::Method::OPTIONS {
        return respond(StatusCode::NO_CONTENT, &cors_headers, Body::Empty);
    }
    error_response(err, &cors_headers)
}

/// Log the full error server-side and return only the public message.
fn error_response(
    err: &GatewayError,
    cors_headers: &[(&'static str, String)],
) -> Result<Response<Body>, Error> {
    match err {
        GatewayError::Validation(_) => tracing::warn!(error = %err, "rejected request"),
        GatewayError::Format { reason, raw } => {
            tracing::error!(reason = %reason, raw = %raw, "could not interpret classifier output")
        }
        GatewayError::Upstream(_) | GatewayError::Config(_) => {
            tracing::error!(error = %err, "classification failed")
        }
    }

    json_response(
        err.status_code(),
        cors_headers,
        &json!({ "error": err.public_message() }),
    )
}

fn json_response(
    status: StatusCode,
    cors_headers: &[(&'static str, String)],
    payload: &serde_json::Value,
) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", "application/json");
    for (name, value) in cors_headers {
        builder = builder.header(*name, value.as_str());
    }
    Ok(builder.body(Body::Text(payload.to_string()))?)
}

fn respond(
    status: StatusCode,
    cors_headers: &[(&'static str, String)],
    body: Body,
) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder().status(status);
    for (name, value) in cors_headers {
        builder = builder.header(*name, value.as_str());
    }
    Ok(builder.body(body)?)
}

fn request_origin(req: &Request) -> Option<String> {
    req.headers()
        .get(http::header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn body_bytes(body: &Body) -> &[u8] {
    match body {
        Body::Empty => &[],
        Body::Text(text) => text.as_bytes(),
        Body::Binary(bytes) => bytes.as_slice(),
    }
}
