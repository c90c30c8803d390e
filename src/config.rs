use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::output::OutputFormat;
use crate::core::NamingPolicy;
use crate::error::{CvError, Result};
use crate::scoring::SkillVocabulary;
use crate::utils::retry::RetryPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub records: RecordsConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Layer defaults, config files and `CVRANK_*` environment overrides.
    ///
    /// An explicit path (or `CVRANK_CONFIG`) replaces the global and project
    /// files instead of adding to them.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("CVRANK_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse one TOML document on top of the defaults, without env overrides.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| CvError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("cvrank/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&root.join("config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| CvError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| CvError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.scoring {
            self.scoring.merge(patch);
        }
        if let Some(patch) = patch.records {
            self.records.merge(patch);
        }
        if let Some(patch) = patch.store {
            self.store.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(values) = env_list("CVRANK_EXTRA_SKILLS") {
            self.scoring.extra_skills.extend(values);
        }

        if let Some(value) = env_string("CVRANK_PERSON_LABEL") {
            self.records.person_label = value;
        }
        if let Some(value) = env_string("CVRANK_FALLBACK_NAME") {
            self.records.fallback_name = value;
        }

        if let Some(value) = env_string("CVRANK_STORE_FILE") {
            self.store.file_name = value;
        }
        if let Some(value) = env_u32("CVRANK_RETRY_ATTEMPTS")? {
            self.store.retry_attempts = value;
        }
        if let Some(value) = env_u64("CVRANK_RETRY_BACKOFF_MS")? {
            self.store.retry_backoff_ms = value;
        }
        if let Some(value) = env_u64("CVRANK_LOCK_TIMEOUT_MS")? {
            self.store.lock_timeout_ms = value;
        }

        if let Some(value) = env_string("CVRANK_OUTPUT_FORMAT") {
            self.output.format = parse_output_format(&value)?;
        }
        if env_bool("CVRANK_ROBOT").unwrap_or(false) {
            self.output.format = OutputFormat::Json;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.records.person_label.trim().is_empty() {
            return Err(CvError::Config("records.person_label must not be empty".to_string()));
        }
        if self.store.file_name.trim().is_empty() {
            return Err(CvError::Config("store.file_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Skill vocabulary after applying `skills` and `extra_skills`.
    #[must_use]
    pub fn vocabulary(&self) -> SkillVocabulary {
        let mut vocabulary = match &self.scoring.skills {
            Some(skills) => SkillVocabulary::new(skills),
            None => SkillVocabulary::default(),
        };
        vocabulary.extend(&self.scoring.extra_skills);
        vocabulary
    }

    #[must_use]
    pub fn naming(&self) -> NamingPolicy {
        NamingPolicy {
            person_label: self.records.person_label.clone(),
            fallback_name: self.records.fallback_name.clone(),
        }
    }

    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.store.retry_attempts,
            backoff: Duration::from_millis(self.store.retry_backoff_ms),
        }
    }

    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.store.lock_timeout_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Replaces the built-in vocabulary when set.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    /// Appended to the active vocabulary.
    #[serde(default)]
    pub extra_skills: Vec<String>,
}

impl ScoringConfig {
    fn merge(&mut self, patch: ScoringPatch) {
        if let Some(values) = patch.skills {
            self.skills = Some(values);
        }
        if let Some(values) = patch.extra_skills {
            self.extra_skills.extend(values);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    #[serde(default = "default_person_label")]
    pub person_label: String,
    #[serde(default = "default_fallback_name")]
    pub fallback_name: String,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            person_label: default_person_label(),
            fallback_name: default_fallback_name(),
        }
    }
}

impl RecordsConfig {
    fn merge(&mut self, patch: RecordsPatch) {
        if let Some(value) = patch.person_label {
            self.person_label = value;
        }
        if let Some(value) = patch.fallback_name {
            self.fallback_name = value;
        }
    }
}

fn default_person_label() -> String {
    "PERSON".to_string()
}

fn default_fallback_name() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_file")]
    pub file_name: String,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_name: default_store_file(),
            retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl StoreConfig {
    fn merge(&mut self, patch: StorePatch) {
        if let Some(value) = patch.file_name {
            self.file_name = value;
        }
        if let Some(value) = patch.retry_attempts {
            self.retry_attempts = value;
        }
        if let Some(value) = patch.retry_backoff_ms {
            self.retry_backoff_ms = value;
        }
        if let Some(value) = patch.lock_timeout_ms {
            self.lock_timeout_ms = value;
        }
    }

    /// Store file location under `root`.
    #[must_use]
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(&self.file_name)
    }
}

fn default_store_file() -> String {
    "records.csv".to_string()
}

const fn default_retry_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    50
}

const fn default_lock_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub scoring: Option<ScoringPatch>,
    pub records: Option<RecordsPatch>,
    pub store: Option<StorePatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ScoringPatch {
    pub skills: Option<Vec<String>>,
    pub extra_skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RecordsPatch {
    pub person_label: Option<String>,
    pub fallback_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StorePatch {
    pub file_name: Option<String>,
    pub retry_attempts: Option<u32>,
    pub retry_backoff_ms: Option<u64>,
    pub lock_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub format: Option<OutputFormat>,
}

fn parse_output_format(value: &str) -> Result<OutputFormat> {
    match value.trim().to_lowercase().as_str() {
        "human" => Ok(OutputFormat::Human),
        "json" => Ok(OutputFormat::Json),
        _ => Err(CvError::Config(format!(
            "invalid output format {value} (expected human|json)"
        ))),
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u32>().map(Some).map_err(|err| {
            CvError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u64>().map(Some).map_err(|err| {
            CvError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect()
    })
}
