use std::path::Path;

use anyhow::{Context, Result};

use lexi::catalog::{Catalog, CefrLevel};
use lexi::scheduler::{FileStore, LearnerId, SchedulerConfig};

/// Shared application state for CLI commands
pub struct App {
    pub learner: LearnerId,
    pub catalog: Catalog,
    pub store: FileStore,
    pub config: SchedulerConfig,
}

impl App {
    /// Initialize from the default data directory
    pub fn new(learner: &str, tasks: Option<&Path>, level: Option<CefrLevel>) -> Result<Self> {
        let data_dir = FileStore::default_data_dir().context("Failed to get data directory")?;

        let tasks_path = tasks
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| data_dir.join("tasks.json"));
        let catalog = Catalog::from_json_file(&tasks_path, level)
            .with_context(|| format!("Failed to load task bank from {}", tasks_path.display()))?;

        Ok(Self {
            learner: LearnerId::new(learner),
            catalog,
            store: FileStore::new(data_dir),
            config: SchedulerConfig::default(),
        })
    }
}
