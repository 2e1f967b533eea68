/// Prompt-Only Demo
///
/// Runs a text-only analysis submission, no image attached.
///
/// Usage:
///   cargo run --example prompt_only -- "What is the airspeed of an unladen swallow?"
use std::sync::Arc;
use visionlab::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let gateway = Arc::new(GeminiGateway::new());
    let mut session = AnalysisSession::with_config(
        gateway,
        AnalysisConfig {
            temperature: Some(0.7),
            max_output_tokens: Some(1024),
        },
    );
    session.set_prompt(prompt);

    if !session.can_submit() {
        eprintln!("usage: prompt_only <prompt>");
        std::process::exit(1);
    }

    match session.submit().await?.clone() {
        RequestState::Succeeded(result) => println!("{}", result.text),
        RequestState::Failed(message) => {
            eprintln!("Analysis failed: {}", message);
            std::process::exit(1);
        }
        _ => unreachable!("submit settles into a terminal state"),
    }

    Ok(())
}
