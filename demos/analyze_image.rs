/// Image Analysis Demo
///
/// Selects an image, attaches a prompt, and runs one analysis submission
/// against the Gemini API.
///
/// Usage:
///   cargo run --example analyze_image -- <image-path> [prompt...]
///
/// Requirements:
///   - GEMINI_API_KEY set in the environment (or a .env file)
use anyhow::Context;
use std::sync::Arc;
use visionlab::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let image_path = args.next().context("usage: analyze_image <image-path> [prompt...]")?;
    let prompt = args.collect::<Vec<_>>().join(" ");

    let gateway = Arc::new(GeminiGateway::new());
    let mut session = AnalysisSession::new(gateway);

    if prompt.is_empty() {
        session.set_prompt("Describe what you see in this image.");
    } else {
        session.set_prompt(prompt);
    }
    session.select_image(&image_path).await?;

    if let Some(image) = session.image() {
        println!("Selected {} ({}, {} bytes)", image_path, image.media_type, image.byte_len());
        if let Some(preview) = image.preview.resolve() {
            println!("Preview copy: {}", preview.display());
        }
    }

    println!("Analyzing...");
    println!();

    match session.submit().await?.clone() {
        RequestState::Succeeded(result) => {
            println!("{}", result.text);
            println!();
            println!("Completed at {}", result.produced_at.format("%H:%M:%S"));
        }
        RequestState::Failed(message) => {
            eprintln!("Analysis failed: {}", message);
            eprintln!();
            eprintln!("Make sure GEMINI_API_KEY is set and valid.");
            std::process::exit(1);
        }
        _ => unreachable!("submit settles into a terminal state"),
    }

    Ok(())
}
