//! Configuration loading and validation for Lectern.
//!
//! Loads configuration from an optional `config.toml` in the working
//! directory (the service is deployed next to its course materials) with
//! environment variable overrides for secrets and links. The result is an
//! immutable [`AppConfig`] value constructed once at process start and passed
//! into every component — pipeline code never reads the environment.

use lectern_core::GenerationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key. Absent key is not a load failure — requests fail with
    /// a configuration error instead, so `doctor` and `transcripts` still run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Generation model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Course web page referenced in the response disclaimer.
    #[serde(default)]
    pub syllabus_link: String,

    /// Course material locations.
    #[serde(default)]
    pub materials: MaterialsConfig,

    /// HTTP gateway binding.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Generation call parameters and timeouts.
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Practice-quiz shape.
    #[serde(default)]
    pub quiz: QuizConfig,

    /// Survey telemetry credentials. `None` unless all three values are
    /// present — the sink is all-or-nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey: Option<SurveyConfig>,
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("syllabus_link", &self.syllabus_link)
            .field("materials", &self.materials)
            .field("gateway", &self.gateway)
            .field("generation", &self.generation)
            .field("quiz", &self.quiz)
            .field("survey", &self.survey)
            .finish()
    }
}

/// Where the course materials live, relative to `root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialsConfig {
    /// Base directory for all course material paths.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_syllabus_file")]
    pub syllabus_file: String,

    #[serde(default = "default_essay_file")]
    pub essay_file: String,

    #[serde(default = "default_midterm_dir")]
    pub midterm_dir: String,

    #[serde(default = "default_final_dir")]
    pub final_dir: String,

    #[serde(default = "default_transcripts_dir")]
    pub transcripts_dir: String,

    /// Bound on direct file entries aggregated from one directory.
    #[serde(default = "default_max_files_per_dir")]
    pub max_files_per_dir: usize,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_syllabus_file() -> String {
    "syllabus.md".into()
}
fn default_essay_file() -> String {
    "essay.md".into()
}
fn default_midterm_dir() -> String {
    "midterm-materials".into()
}
fn default_final_dir() -> String {
    "final-materials".into()
}
fn default_transcripts_dir() -> String {
    "transcripts".into()
}
fn default_max_files_per_dir() -> usize {
    256
}

impl Default for MaterialsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            syllabus_file: default_syllabus_file(),
            essay_file: default_essay_file(),
            midterm_dir: default_midterm_dir(),
            final_dir: default_final_dir(),
            transcripts_dir: default_transcripts_dir(),
            max_files_per_dir: default_max_files_per_dir(),
        }
    }
}

impl MaterialsConfig {
    pub fn syllabus_path(&self) -> PathBuf {
        self.root.join(&self.syllabus_file)
    }

    pub fn essay_path(&self) -> PathBuf {
        self.root.join(&self.essay_file)
    }

    pub fn midterm_path(&self) -> PathBuf {
        self.root.join(&self.midterm_dir)
    }

    pub fn final_path(&self) -> PathBuf {
        self.root.join(&self.final_dir)
    }

    pub fn transcripts_path(&self) -> PathBuf {
        self.root.join(&self.transcripts_dir)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8917
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Timeout on the generation call. The upstream design had none; a
    /// bounded wait is a deliberate deviation.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Timeout on the survey telemetry call.
    #[serde(default = "default_survey_timeout_secs")]
    pub survey_timeout_secs: u64,
}

fn default_temperature() -> f32 {
    0.2
}
fn default_max_output_tokens() -> u32 {
    10_000
}
fn default_timeout_secs() -> u64 {
    120
}
fn default_survey_timeout_secs() -> u64 {
    10
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
            survey_timeout_secs: default_survey_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// How many multiple-choice questions each quiz carries.
    #[serde(default = "default_question_count")]
    pub question_count: u32,

    /// How the prompt refers to the course instructor.
    #[serde(default = "default_instructor_name")]
    pub instructor_name: String,
}

fn default_question_count() -> u32 {
    5
}
fn default_instructor_name() -> String {
    "the instructor".into()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            instructor_name: default_instructor_name(),
        }
    }
}

/// Survey telemetry credentials. Resolved once: either all three values are
/// present and the sink is live, or the sink is a no-op.
#[derive(Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    pub api_token: String,
    pub survey_id: String,
    pub datacenter: String,
}

impl std::fmt::Debug for SurveyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurveyConfig")
            .field("api_token", &"[REDACTED]")
            .field("survey_id", &self.survey_id)
            .field("datacenter", &self.datacenter)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration: `./config.toml` if present, then environment
    /// variable overrides:
    /// - `GEMINI_API_KEY`
    /// - `GEMINI_MODEL`
    /// - `SYLLABUS_LINK`
    /// - `QUALTRICS_API_TOKEN` + `QUALTRICS_SURVEY_ID` + `QUALTRICS_DATACENTER`
    ///   (all three, or the survey sink stays off)
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(Path::new("config.toml"))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path, without environment
    /// overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.model = model;
        }
        if let Ok(link) = std::env::var("SYLLABUS_LINK") {
            self.syllabus_link = link;
        }

        if let (Ok(api_token), Ok(survey_id), Ok(datacenter)) = (
            std::env::var("QUALTRICS_API_TOKEN"),
            std::env::var("QUALTRICS_SURVEY_ID"),
            std::env::var("QUALTRICS_DATACENTER"),
        ) {
            self.survey = Some(SurveyConfig {
                api_token,
                survey_id,
                datacenter,
            });
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.temperature < 0.0 || self.generation.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "generation.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.quiz.question_count == 0 {
            return Err(ConfigError::ValidationError(
                "quiz.question_count must be at least 1".into(),
            ));
        }

        if self.materials.max_files_per_dir == 0 {
            return Err(ConfigError::ValidationError(
                "materials.max_files_per_dir must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Check if the generation API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The fixed generation parameters for this deployment.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            model: self.model.clone(),
            temperature: self.generation.temperature,
            max_output_tokens: self.generation.max_output_tokens,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            syllabus_link: String::new(),
            materials: MaterialsConfig::default(),
            gateway: GatewayConfig::default(),
            generation: GenerationSettings::default(),
            quiz: QuizConfig::default(),
            survey: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.gateway.port, 8917);
        assert_eq!(config.quiz.question_count, 5);
        assert!(config.survey.is_none());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.materials.syllabus_file, config.materials.syllabus_file);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "syllabus_link = \"https://example.edu/course\"\n[quiz]\nquestion_count = 10"
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.syllabus_link, "https://example.edu/course");
        assert_eq!(config.quiz.question_count, 10);
        assert_eq!(config.materials.midterm_dir, "midterm-materials");
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            generation: GenerationSettings {
                temperature: 5.0,
                ..GenerationSettings::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_question_count_rejected() {
        let config = AppConfig {
            quiz: QuizConfig {
                question_count: 0,
                ..QuizConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn material_paths_join_root() {
        let materials = MaterialsConfig {
            root: PathBuf::from("/srv/course"),
            ..MaterialsConfig::default()
        };
        assert_eq!(
            materials.syllabus_path(),
            PathBuf::from("/srv/course/syllabus.md")
        );
        assert_eq!(
            materials.transcripts_path(),
            PathBuf::from("/srv/course/transcripts")
        );
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = AppConfig {
            api_key: Some("AIza-secret".into()),
            survey: Some(SurveyConfig {
                api_token: "qt-secret".into(),
                survey_id: "SV_123".into(),
                datacenter: "iad1".into(),
            }),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("AIza-secret"));
        assert!(!debug.contains("qt-secret"));
        assert!(debug.contains("SV_123"));
    }

    #[test]
    fn generation_config_carries_fixed_parameters() {
        let config = AppConfig::default();
        let generation = config.generation_config();
        assert_eq!(generation.model, "gemini-2.5-flash");
        assert!((generation.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(generation.max_output_tokens, 10_000);
    }
}
