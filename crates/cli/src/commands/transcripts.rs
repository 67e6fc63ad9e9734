//! `lectern transcripts` — List available lecture files.

use lectern_config::AppConfig;
use lectern_content::transcripts::list_transcripts;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let names = list_transcripts(&config.materials.transcripts_path()).await?;
    if names.is_empty() {
        println!("No lecture files found in {}", config.materials.transcripts_path().display());
        return Ok(());
    }

    for name in names {
        println!("{name}");
    }

    Ok(())
}
