//! Ask a Gemini-backed agent one question.
//!
//! Set `Google_Api` to a Gemini API key and run:
//!   RUST_LOG=conduit=debug cargo run -p conduit-runner --example basic

use conduit_backend_openai::{GEMINI_BASE_URL, OpenAiCompat};
use conduit_core::{AdapterConfig, ChatAdapter};
use conduit_guardrail::non_empty;
use conduit_runner::{Agent, InvocationRunner};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let backend = OpenAiCompat::from_env("Google_Api")?.base_url(GEMINI_BASE_URL);
    let adapter = ChatAdapter::new(backend, AdapterConfig::new("gemini-1.5-flash"))?;
    let agent = Agent::builder("Test Agent")
        .instructions(
            "You are a test agent. If you are unsure of the answer, just say 'I don't know'.",
        )
        .adapter(adapter)
        .build()?;

    let answer = InvocationRunner::new()
        .run(&agent, "What is the capital of France?", &[non_empty()])
        .await?;
    println!("{answer}");

    Ok(())
}
