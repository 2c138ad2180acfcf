//! CLI tool to run a classification locally, without deploying.
//!
//! Reads text from the arguments (or stdin when none are given), calls the
//! same gateway the `analyze` function uses and prints the normalized JSON.
//!
//! ```text
//! GEMINI_API_KEY=... classify "Selamat! Anda memenangkan undian, klik link ini"
//! echo "Win a free iPhone now" | classify --strict
//! ```

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use text_risk_classifier::{
    logging, ClassificationGateway, ClassificationRequest, GatewayConfig, GeminiClassifier,
    NormalizationMode,
};

#[derive(Parser, Debug)]
#[command(name = "classify", version, about = "Classify text as Scam / Online Gambling / Hoax / Safe")]
struct Cli {
    /// Text to classify. Read from stdin when omitted.
    text: Vec<String>,

    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Model identifier (overrides GEMINI_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Reject out-of-domain values instead of falling back to Unknown / N/A.
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let text = if cli.text.is_empty() {
        let mut buffer = String::new();
        if let Err(err) = std::io::stdin().read_to_string(&mut buffer) {
            eprintln!("Failed to read stdin: {err}");
            return ExitCode::FAILURE;
        }
        buffer
    } else {
        cli.text.join(" ")
    };

    let api_key = cli.api_key;
    let mut config = match GatewayConfig::from_lookup(|key| match key {
        "GEMINI_API_KEY" => Some(api_key.clone()),
        other => std::env::var(other).ok(),
    }) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if cli.strict {
        config = config.with_normalization(NormalizationMode::Strict);
    }

    let gateway = ClassificationGateway::new(GeminiClassifier::new(&config), config.normalization);

    match gateway.classify(&ClassificationRequest::new(text)).await {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Failed to serialize result: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            if let text_risk_classifier::GatewayError::Format { raw, .. } = &err {
                eprintln!("Raw completion:\n{raw}");
            }
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
