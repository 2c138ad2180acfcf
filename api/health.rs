use serde_json::json;
use text_risk_classifier::config::model_from_env;
use text_risk_classifier::version;
use vercel_runtime::{run, Body, Error, Request, Response, StatusCode};

#[tokio::main]
async fn main() -> Result<(), Error> {
    run(handler).await
}

/// GET /api/health — Liveness check. Does not need the API key.
pub async fn handler(_req: Request) -> Result<Response<Body>, Error> {
    let model = model_from_env();
    let payload = json!({
        "status": "ok",
        "version": version(),
        "model": model,
    });

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Body::Text(payload.to_string()))?)
}
