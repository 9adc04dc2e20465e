//! Content factory for building stat repositories from data files.

use std::path::{Path, PathBuf};

use stat_core::{StatConfig, StatRepository};

use crate::loaders::{ConfigLoader, LoadMode, LoadResult, TemplateLoader, TemplateSpec};

const CONFIG_FILE: &str = "config.toml";
const TEMPLATES_FILE: &str = "templates.ron";

/// Content factory that loads stat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml     (optional)
/// └── templates.ron   (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load stat configuration from `config.toml`, or the default config
    /// when the file is absent.
    pub fn load_config(&self) -> LoadResult<StatConfig> {
        let path = self.config_path();
        if !path.exists() {
            tracing::debug!("{} not found, using default stat config", path.display());
            return Ok(StatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load template specs from `templates.ron`.
    ///
    /// Unlike [`ContentFactory::build_repository`], this requires the file
    /// to exist.
    pub fn load_templates(&self) -> LoadResult<Vec<TemplateSpec>> {
        TemplateLoader::load(&self.templates_path())
    }

    /// Build a repository from the directory's config, then upsert every
    /// template from `templates.ron` over the seeded table.
    ///
    /// # Returns
    ///
    /// Returns a ready StatRepository. Missing files fall back to the default
    /// config and the seeded templates.
    pub fn build_repository(&self) -> LoadResult<StatRepository> {
        let config = self.load_config()?;
        let mut repository = StatRepository::with_config(config);

        let templates = self.templates_path();
        if templates.exists() {
            TemplateLoader::load_into(&templates, &mut repository, LoadMode::Upsert)?;
        } else {
            tracing::debug!("{} not found, keeping seeded templates", templates.display());
        }

        Ok(repository)
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub fn templates_path(&self) -> PathBuf {
        self.data_dir.join(TEMPLATES_FILE)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
