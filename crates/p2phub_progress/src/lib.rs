//! P2PHub progression engine.
//!
//! Derives, for one user's progress snapshot, which tasks, achievements and
//! academy stages are locked, available, started, verifying, claimable or
//! completed, and builds the ordered lists the UI displays.

pub mod aggregator;
pub mod catalog;
mod catalog_data;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod status;
pub mod ticker;

pub use aggregator::{
    academy_view, list_visible, next_unlock, summarize, AcademyGroup, ProgressSummary, VisibleEntry,
};
pub use catalog::{
    Catalog, CatalogEntry, CatalogFile, EntryDef, EntryKind, EntryVariant, MissingGoalPolicy, Rule,
};
pub use config::EngineConfig;
pub use error::ProgressError;
pub use snapshot::{Tracker, UserProgressSnapshot, VerifyingEntry};
pub use status::{evaluate, Evaluation, Status};
pub use ticker::{Resume, VerificationTicker};
