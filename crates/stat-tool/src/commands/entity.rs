//! Preview the stat set a new entity starts with.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use stat_core::{StatCollection, StatId, StatModifiers};
use std::path::PathBuf;

/// Preview the default stat set for an entity
#[derive(Parser)]
pub struct Entity {
    /// Entity level used for scaling
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    level: i32,

    /// Include Hunger, Thirst, Energy and Rest
    #[arg(long)]
    survival: bool,

    /// Permanent flat bonus to apply before printing, as STAT=AMOUNT
    /// (e.g. attack=15). May be repeated.
    #[arg(short, long, value_name = "STAT=AMOUNT", value_parser = parse_bonus)]
    bonus: Vec<(StatId, f32)>,

    /// Data directory with config.toml and templates.ron
    /// (defaults to the built-in table)
    #[arg(short, long, value_name = "DIR", env = "STAT_DATA_DIR")]
    data: Option<PathBuf>,

    /// Print the bincode save size alongside the summary
    #[arg(long)]
    bytes: bool,
}

impl Entity {
    pub fn execute(self) -> Result<()> {
        let repository = super::load_repository(self.data.as_deref())?;
        let mut stats = StatCollection::from_repository(&repository, self.level, self.survival);

        for (id, amount) in &self.bonus {
            stats.add_permanent_modifier(*id, StatModifiers::flat(*amount));
        }

        println!(
            "{} level {}{}",
            style("Entity:").bold().cyan(),
            self.level,
            if self.survival { " (survival)" } else { "" }
        );
        if self.bytes {
            let bytes = stats.to_bytes().context("Failed to serialize stat collection")?;
            println!("{} {} bytes", style("Save Size:").bold().cyan(), bytes.len());
        }
        println!();

        println!("{}", stats.summary(!self.bonus.is_empty()).trim_end());

        let critical = stats.critical_with(repository.config());
        if !critical.is_empty() {
            println!();
            println!(
                "{} (below {:.0}% of max)",
                style("Critical:").bold().yellow(),
                repository.config().critical_threshold * 100.0
            );
            for stat in critical.values() {
                println!("  {}", stat.display_string(true));
            }
        }

        let issues = stats.validate_integrity();
        if !issues.is_empty() {
            println!();
            println!("{}", style("Integrity Issues:").bold().red());
            for issue in &issues {
                println!("  {}", issue);
            }
        }

        Ok(())
    }
}

fn parse_bonus(arg: &str) -> Result<(StatId, f32)> {
    let (id, amount) = arg
        .split_once('=')
        .with_context(|| format!("Expected STAT=AMOUNT, got '{}'", arg))?;
    let id: StatId = id
        .trim()
        .parse()
        .with_context(|| format!("Unknown stat '{}'", id.trim()))?;
    let amount: f32 = amount
        .trim()
        .parse()
        .with_context(|| format!("Invalid amount '{}'", amount.trim()))?;
    Ok((id, amount))
}
