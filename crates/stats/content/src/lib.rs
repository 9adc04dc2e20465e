//! Data-driven stat content.
//!
//! This crate loads stat templates and configuration from data files:
//! - Stat templates (data-driven via RON)
//! - Stat configuration (data-driven via TOML)
//!
//! Loaded content is registered into a [`stat_core::StatRepository`]; it never
//! appears in per-entity collections directly.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadMode, LoadResult, TemplateCatalog, TemplateLoader,
    TemplateSpec,
};
