use text_risk_classifier::config::DEFAULT_ALLOWED_ORIGINS;
use text_risk_classifier::handler::{config_failure, handle_analyze, CorsPolicy};
use text_risk_classifier::{logging, ClassificationGateway, GatewayConfig, GeminiClassifier};
use vercel_runtime::{run, Body, Error, Request, Response};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    run(handler).await
}

/// POST /api/analyze — Classify a piece of text as Scam / Online Gambling / Hoax / Safe.
///
/// Configuration is read per invocation so a missing key surfaces as a
/// 500 for the caller rather than a crashed cold start.
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            let cors = CorsPolicy::new(DEFAULT_ALLOWED_ORIGINS);
            return config_failure(&req, &err, &cors);
        }
    };

    let cors = CorsPolicy::new(config.allowed_origins.iter().cloned());
    let gateway = ClassificationGateway::new(GeminiClassifier::new(&config), config.normalization);

    handle_analyze(req, &gateway, &cors).await
}
