//! `lectern quiz` — Generate a practice quiz from a lecture file.

use lectern_config::AppConfig;
use lectern_core::request::AskRequest;

pub async fn run(transcript: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let assistant = super::build_assistant(config)?;

    let request = AskRequest {
        transcript: Some(transcript),
        ..AskRequest::default()
    };

    let response = assistant.answer(&request).await?;
    println!("{}", response.text);
    tracing::debug!(survey = %response.survey, "Exchange recorded");

    Ok(())
}
