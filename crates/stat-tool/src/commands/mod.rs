//! Command implementations for stat-tool
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod entity;
mod templates;
mod validate;

pub use entity::Entity;
pub use templates::Templates;
pub use validate::Validate;

use std::path::Path;

use anyhow::Result;
use stat_content::ContentFactory;
use stat_core::StatRepository;

/// Repository built from `data_dir`, or the built-in table when none is given.
pub(crate) fn load_repository(data_dir: Option<&Path>) -> Result<StatRepository> {
    match data_dir {
        Some(dir) => {
            if !dir.is_dir() {
                anyhow::bail!("Data directory not found: {}", dir.display());
            }
            ContentFactory::new(dir).build_repository()
        }
        None => Ok(StatRepository::new()),
    }
}
