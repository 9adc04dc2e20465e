//! Stat template loader.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use stat_core::{Stat, StatCategory, StatId, StatRepository};

use crate::loaders::{LoadResult, read_file};

/// A template as written in a RON catalog.
///
/// `description` and `category` may be omitted; `min`/`max` default to the
/// fallback range `[0, 100]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub id: StatId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: StatCategory,
    pub base: f32,
    #[serde(default)]
    pub min: f32,
    #[serde(default = "default_max")]
    pub max: f32,
}

fn default_max() -> f32 {
    100.0
}

impl TemplateSpec {
    pub fn into_stat(self) -> Stat {
        Stat::new(self.id, self.name, self.base, self.min, self.max)
            .with_category(self.category)
            .with_description(self.description)
    }
}

impl From<&Stat> for TemplateSpec {
    fn from(stat: &Stat) -> Self {
        Self {
            id: stat.id,
            name: stat.name.clone(),
            description: stat.description.clone(),
            category: stat.category,
            base: stat.base_value,
            min: stat.min_value,
            max: stat.max_value,
        }
    }
}

/// RON file structure for stat templates.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TemplateCatalog {
    pub templates: Vec<TemplateSpec>,
}

impl TemplateCatalog {
    /// Snapshot of every template in a repository, in id order.
    pub fn from_repository(repository: &StatRepository) -> Self {
        Self {
            templates: repository.templates().map(TemplateSpec::from).collect(),
        }
    }

    pub fn to_ron(&self) -> LoadResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize template catalog RON: {}", e))
    }
}

/// How loaded templates are merged into a repository.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Reject ids already present.
    #[default]
    Register,
    /// Replace ids already present, register the rest.
    Upsert,
}

/// Loader for stat templates from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load template specs from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing TemplateCatalog
    ///
    /// # Returns
    ///
    /// Returns a Vec of TemplateSpecs in file order. A catalog listing the
    /// same id twice is rejected.
    pub fn load(path: &Path) -> LoadResult<Vec<TemplateSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a template catalog from RON text already in memory.
    pub fn parse(content: &str) -> LoadResult<Vec<TemplateSpec>> {
        let catalog: TemplateCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse template catalog RON: {}", e))?;

        let mut seen = std::collections::BTreeSet::new();
        for spec in &catalog.templates {
            if !seen.insert(spec.id) {
                anyhow::bail!("Template catalog lists {} more than once", spec.id);
            }
        }

        Ok(catalog.templates)
    }

    /// Load a catalog and merge it into `repository`.
    ///
    /// Stops at the first rejected template; earlier ones stay applied.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing TemplateCatalog
    /// * `repository` - Repository receiving the templates
    /// * `mode` - Whether ids already present are rejected or replaced
    ///
    /// # Returns
    ///
    /// Returns the number of templates written.
    pub fn load_into(
        path: &Path,
        repository: &mut StatRepository,
        mode: LoadMode,
    ) -> LoadResult<usize> {
        let specs = Self::load(path)?;
        let count = specs.len();

        for spec in specs {
            let id = spec.id;
            let stat = spec.into_stat();
            let result = match mode {
                LoadMode::Upsert if repository.contains(id) => repository.update(id, stat),
                _ => repository.register(stat),
            };
            result.with_context(|| {
                format!("Failed to apply template {} from {}", id, path.display())
            })?;
        }

        tracing::debug!("Loaded {} stat templates from {}", count, path.display());
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stat_core::StatConfig;

    const CATALOG: &str = r#"(
        templates: [
            (
                id: Luck,
                name: "Fortune",
                category: Tertiary,
                base: 3.0,
                max: 7.0,
            ),
            (
                id: Speed,
                name: "Speed",
                description: "How fast.",
                category: Secondary,
                base: 12.0,
                min: 0.0,
                max: 50.0,
            ),
        ],
    )"#;

    #[test]
    fn parses_catalog_with_defaults() {
        let specs = TemplateLoader::parse(CATALOG).unwrap();
        assert_eq!(specs.len(), 2);

        let luck = specs[0].clone().into_stat();
        assert_eq!(luck.id, StatId::Luck);
        assert_eq!(luck.name, "Fortune");
        assert_eq!(luck.category, StatCategory::Tertiary);
        assert_eq!(luck.min_value, 0.0);
        assert_eq!(luck.max_value, 7.0);
        assert_eq!(luck.current_value, 3.0);
        assert!(luck.description.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let content = r#"(templates: [
            (id: Luck, name: "A", base: 1.0),
            (id: Luck, name: "B", base: 2.0),
        ])"#;
        let err = TemplateLoader::parse(content).unwrap_err();
        assert!(err.to_string().contains("Luck"));
    }

    #[test]
    fn rejects_unknown_stat_id() {
        let content = r#"(templates: [(id: Mojo, name: "Mojo", base: 1.0)])"#;
        assert!(TemplateLoader::parse(content).is_err());
    }

    #[test]
    fn catalog_ron_round_trip() {
        let repository = StatRepository::new();
        let ron = TemplateCatalog::from_repository(&repository).to_ron().unwrap();
        let specs = TemplateLoader::parse(&ron).unwrap();

        assert_eq!(specs.len(), 21);
        let mut rebuilt = StatRepository::with_config(StatConfig::new().without_defaults());
        for spec in specs {
            rebuilt.register(spec.into_stat()).unwrap();
        }
        assert_eq!(
            rebuilt.templates().collect::<Vec<_>>(),
            repository.templates().collect::<Vec<_>>()
        );
    }
}
