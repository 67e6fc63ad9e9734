pub mod ask;
pub mod doctor;
pub mod quiz;
pub mod serve;
pub mod transcripts;

use lectern_assistant::Assistant;
use lectern_config::AppConfig;

/// Wire the real generation client and survey sink into an assistant.
pub fn build_assistant(config: AppConfig) -> Result<Assistant, Box<dyn std::error::Error>> {
    let client = lectern_providers::build_from_config(&config)?;
    let sink = lectern_telemetry::build_from_config(&config)?;
    Ok(Assistant::new(config, client, sink))
}
