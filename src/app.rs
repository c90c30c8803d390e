use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::core::NamingPolicy;
use crate::error::{CvError, Result};
use crate::scoring::Scorer;
use crate::storage::{CsvRecordStore, RecordStore};

/// Everything a command needs, built once per invocation.
pub struct AppContext {
    pub scorer: Arc<Scorer>,
    pub naming: NamingPolicy,
    pub store: Arc<dyn RecordStore>,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config = Config::load(cli.config.as_deref(), &root)?;
        let output_format = if cli.wants_json() {
            OutputFormat::Json
        } else {
            cli.output_format().unwrap_or(config.output.format)
        };

        let store = CsvRecordStore::open(
            config.store.path_in(&root),
            config.retry_policy(),
            config.lock_timeout(),
        )?;
        debug!(root = %root.display(), store = %store.path().display(), "context ready");

        Self::with_store(&config, Arc::new(store), output_format)
    }

    /// Build a context around an existing store.
    pub fn with_store(
        config: &Config,
        store: Arc<dyn RecordStore>,
        output_format: OutputFormat,
    ) -> Result<Self> {
        let scorer = Scorer::new(config.vocabulary())?;
        Ok(Self {
            scorer: Arc::new(scorer),
            naming: config.naming(),
            store,
            output_format,
        })
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("CVRANK_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ".cvrank") {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| CvError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("cvrank"))
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_dir())
}
