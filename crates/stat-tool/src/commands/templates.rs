//! List stat templates from the built-in table or a data directory.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use stat_content::TemplateCatalog;
use stat_core::{Stat, StatCategory, StatRepository};
use std::path::PathBuf;

/// List stat templates
#[derive(Parser)]
pub struct Templates {
    /// Only show templates in this category (primary, secondary, tertiary)
    #[arg(short, long, value_name = "CATEGORY")]
    category: Option<StatCategory>,

    /// Only show templates whose name contains this text
    #[arg(short, long, value_name = "TEXT")]
    search: Option<String>,

    /// Data directory with config.toml and templates.ron
    /// (defaults to the built-in table)
    #[arg(short, long, value_name = "DIR", env = "STAT_DATA_DIR")]
    data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per template
    Summary,
    /// RON catalog, loadable as templates.ron
    Ron,
    /// Full JSON output
    Json,
}

impl Templates {
    pub fn execute(self) -> Result<()> {
        let repository = super::load_repository(self.data.as_deref())?;
        let selected = self.select(&repository);

        match self.format {
            OutputFormat::Summary => print_summary(&repository, &selected),
            OutputFormat::Ron => {
                let catalog = TemplateCatalog {
                    templates: selected.iter().map(|stat| (*stat).into()).collect(),
                };
                println!("{}", catalog.to_ron()?);
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&selected)
                    .context("Failed to serialize templates to JSON")?;
                println!("{}", json);
            }
        }

        Ok(())
    }

    fn select<'a>(&self, repository: &'a StatRepository) -> Vec<&'a Stat> {
        let pattern = self.search.as_deref().map(str::to_lowercase);
        repository
            .templates()
            .filter(|stat| self.category.is_none_or(|category| stat.category == category))
            .filter(|stat| {
                pattern
                    .as_ref()
                    .is_none_or(|pattern| stat.name.to_lowercase().contains(pattern))
            })
            .collect()
    }
}

fn print_summary(repository: &StatRepository, selected: &[&Stat]) {
    println!("{}", style(repository.summary()).bold().green());
    println!();

    if selected.is_empty() {
        println!("{}", style("No templates match.").yellow());
        return;
    }

    for stat in selected {
        println!(
            "  {:<18} {:<20} {:<9} base {:>7.1}  range [{}, {}]",
            style(stat.id).cyan(),
            stat.name,
            stat.category,
            stat.base_value,
            stat.min_value,
            stat.max_value
        );
        if !stat.description.is_empty() {
            println!("  {:<18} {}", "", style(&stat.description).dim());
        }
    }
}
