//! Validate a stat data directory.
//!
//! Checks every template in `templates.ron` the same way stored stats are
//! checked, then builds a repository from the directory to surface
//! registration errors.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use stat_content::{ContentFactory, TemplateSpec};
use stat_core::{StatCollection, StatConfig, StatId, ValidationIssue};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Validate a data directory
#[derive(Parser)]
pub struct Validate {
    /// Data directory with config.toml and templates.ron
    #[arg(short, long, value_name = "DIR", env = "STAT_DATA_DIR")]
    data: PathBuf,
}

/// Outcome of checking one data directory.
struct Report {
    config: StatConfig,
    /// `None` when `templates.ron` is absent.
    template_count: Option<usize>,
    issues: Vec<ValidationIssue>,
    /// Issues that fail validation under the directory's config.
    fatal: usize,
    repository_summary: String,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let report = inspect(&self.data)?;

        println!(
            "{} {}",
            style("Data Directory:").bold().cyan(),
            self.data.display()
        );
        println!(
            "{} critical_threshold={} enforce_ranges={} seed_defaults={}",
            style("Config:").bold().cyan(),
            report.config.critical_threshold,
            report.config.enforce_ranges,
            report.config.seed_defaults
        );
        match report.template_count {
            Some(count) => println!("{} {} entries", style("Templates:").bold().cyan(), count),
            None => println!(
                "{} none (templates.ron not found)",
                style("Templates:").bold().cyan()
            ),
        }
        println!();

        for issue in &report.issues {
            println!("  {} {}", style("✗").red(), issue);
        }
        println!(
            "{} {}",
            style("Repository:").bold().cyan(),
            report.repository_summary
        );

        if report.fatal > 0 {
            anyhow::bail!(
                "{} problem(s) found in {}",
                report.fatal,
                self.data.display()
            );
        }

        println!("{}", style("✓ Data directory is valid").bold().green());
        Ok(())
    }
}

fn inspect(data: &Path) -> Result<Report> {
    if !data.is_dir() {
        anyhow::bail!("Data directory not found: {}", data.display());
    }
    let factory = ContentFactory::new(data);

    let config = factory.load_config().context("config.toml is invalid")?;

    let templates: Option<Vec<TemplateSpec>> = if factory.templates_path().exists() {
        Some(
            factory
                .load_templates()
                .context("templates.ron is invalid")?,
        )
    } else {
        None
    };
    let template_count = templates.as_ref().map(Vec::len);

    let fresh = StatCollection::from_stats(
        templates
            .into_iter()
            .flatten()
            .map(|spec| (spec.id, spec.into_stat())),
    );
    let issues = fresh.validate_integrity();
    let fatal = count_fatal(&issues, &config);

    let repository = factory.build_repository()?;

    Ok(Report {
        config,
        template_count,
        issues,
        fatal,
        repository_summary: repository.summary(),
    })
}

/// With range enforcement off, an inverted range and the out-of-range
/// current value it forces are both tolerated for that stat.
fn count_fatal(issues: &[ValidationIssue], config: &StatConfig) -> usize {
    if config.enforce_ranges {
        return issues.len();
    }

    let inverted: BTreeSet<StatId> = issues
        .iter()
        .filter(|issue| matches!(issue, ValidationIssue::MinAboveMax { .. }))
        .map(ValidationIssue::id)
        .collect();

    issues
        .iter()
        .filter(|issue| !inverted.contains(&issue.id()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const INVERTED_LUCK: &str =
        r#"(templates: [(id: Luck, name: "Luck", base: 5.0, min: 10.0, max: 1.0)])"#;

    fn validate(dir: &TempDir) -> Result<()> {
        Validate {
            data: dir.path().to_path_buf(),
        }
        .execute()
    }

    #[test]
    fn permissive_config_tolerates_inverted_ranges() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.toml"), "enforce_ranges = false\n").unwrap();
        fs::write(temp_dir.path().join("templates.ron"), INVERTED_LUCK).unwrap();

        let report = inspect(temp_dir.path()).unwrap();
        assert_eq!(report.issues.len(), 3);
        assert!(report.issues.iter().all(|issue| issue.id() == StatId::Luck));
        assert_eq!(report.fatal, 0);
        assert!(validate(&temp_dir).is_ok());
    }

    #[test]
    fn strict_config_rejects_inverted_ranges() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.toml"), "seed_defaults = false\n").unwrap();
        fs::write(temp_dir.path().join("templates.ron"), INVERTED_LUCK).unwrap();

        assert!(inspect(temp_dir.path()).is_err());
        assert!(validate(&temp_dir).is_err());
    }

    #[test]
    fn permissive_config_still_reports_other_stats() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.toml"), "enforce_ranges = false\n").unwrap();
        fs::write(
            temp_dir.path().join("templates.ron"),
            r#"(templates: [
                (id: Luck, name: "Luck", base: 5.0, min: 10.0, max: 1.0),
                (id: Speed, name: "", base: 5.0, max: 10.0),
            ])"#,
        )
        .unwrap();

        let report = inspect(temp_dir.path()).unwrap();
        assert_eq!(report.fatal, 1);
        let err = validate(&temp_dir).unwrap_err();
        assert!(err.to_string().starts_with("1 problem(s)"));
    }

    #[test]
    fn missing_templates_file_is_valid() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.toml"), "critical_threshold = 0.3\n").unwrap();

        let report = inspect(temp_dir.path()).unwrap();
        assert_eq!(report.template_count, None);
        assert!(report.issues.is_empty());
        assert!(report.repository_summary.contains("Total Stats: 21"));
        assert!(validate(&temp_dir).is_ok());
    }

    #[test]
    fn shipped_data_is_valid() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
        let report = inspect(&data).unwrap();
        assert_eq!(report.template_count, Some(21));
        assert_eq!(report.fatal, 0);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(inspect(&temp_dir.path().join("nope")).is_err());
    }
}
