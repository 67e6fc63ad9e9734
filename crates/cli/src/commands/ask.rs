//! `lectern ask` — Answer a single question from the terminal.

use lectern_config::AppConfig;
use lectern_core::request::AskRequest;

pub async fn run(mode: String, question: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let assistant = super::build_assistant(config)?;

    let request = AskRequest {
        mode: Some(mode),
        question: Some(question),
        transcript: None,
    };

    let response = assistant.answer(&request).await?;
    println!("{}", response.text);
    tracing::debug!(survey = %response.survey, "Exchange recorded");

    Ok(())
}
