//! Entity stat model: templates, per-entity collections and modifiers.
//!
//! `stat-core` holds the numeric rules shared by gameplay, UI and tooling.
//! A [`StatRepository`] provides templates and level-scaled seed sets; each
//! entity owns a [`StatCollection`] that stores plain [`Stat`] values and
//! overlays two layers of [`StatModifiers`] on every read.
//!
//! # Example
//!
//! ```
//! use stat_core::{StatCollection, StatId, StatModifiers, StatRepository};
//!
//! let repository = StatRepository::new();
//! let mut hero = StatCollection::from_repository(&repository, 1, false);
//!
//! hero.add_permanent_modifier(StatId::Health, StatModifiers::flat(10.0));
//! hero.modify_stat_value(StatId::Health, -20.0);
//!
//! // Stored: 80 / 100 base. Read: 110 × 0.8.
//! assert!((hero.stat_value(StatId::Health, &repository) - 88.0).abs() < 1e-3);
//! ```
pub mod collection;
pub mod config;
pub mod error;
pub mod id;
pub mod modifiers;
pub mod repository;
pub mod stat;

pub use collection::{StatCollection, ValidationIssue};
pub use config::StatConfig;
pub use error::{ErrorSeverity, RepositoryError, StatError};
pub use id::{StatCategory, StatId};
pub use modifiers::StatModifiers;
pub use repository::{StatRepository, default_templates};
pub use stat::Stat;
