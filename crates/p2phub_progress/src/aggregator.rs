//! Display lists built from a catalog and a snapshot.
//!
//! Nothing here holds state between calls; every view is recomputed from its
//! inputs and is safe to rebuild at any time.

use crate::catalog::{Catalog, CatalogEntry};
use crate::snapshot::UserProgressSnapshot;
use crate::status::{evaluate, Evaluation, Status};
use serde::Serialize;

/// An entry paired with its evaluation
#[derive(Debug, Clone, Serialize)]
pub struct VisibleEntry<'a> {
    pub entry: &'a CatalogEntry,
    pub status: Status,
    pub progress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
}

impl<'a> VisibleEntry<'a> {
    fn new(entry: &'a CatalogEntry, eval: Evaluation) -> Self {
        Self {
            entry,
            status: eval.status,
            progress: eval.progress,
            remaining_seconds: eval.remaining_seconds,
        }
    }
}

/// Evaluate every entry, then sort by level ascending.
/// The sort is stable, so equal levels keep catalog order.
fn evaluated_by_level<'a, I>(entries: I, snapshot: &UserProgressSnapshot) -> Vec<VisibleEntry<'a>>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut rows: Vec<VisibleEntry<'a>> = entries
        .into_iter()
        .map(|entry| VisibleEntry::new(entry, evaluate(entry, snapshot)))
        .collect();
    rows.sort_by_key(|row| row.entry.level_requirement);
    rows
}

/// Active missions view: every entry not yet completed, by level ascending.
///
/// Returns an empty list when everything is completed.
pub fn list_visible<'a>(
    catalog: &'a Catalog,
    snapshot: &UserProgressSnapshot,
) -> Vec<VisibleEntry<'a>> {
    let mut rows = evaluated_by_level(catalog, snapshot);
    rows.retain(|row| row.status != Status::Completed);
    rows
}

/// Per-status counts for badges and headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub locked: usize,
    pub available: usize,
    pub started: usize,
    pub verifying: usize,
    pub claimable: usize,
    pub completed: usize,
}

impl ProgressSummary {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Locked => self.locked,
            Status::Available => self.available,
            Status::Started => self.started,
            Status::Verifying => self.verifying,
            Status::Claimable => self.claimable,
            Status::Completed => self.completed,
        }
    }

    fn record(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Locked => self.locked += 1,
            Status::Available => self.available += 1,
            Status::Started => self.started += 1,
            Status::Verifying => self.verifying += 1,
            Status::Claimable => self.claimable += 1,
            Status::Completed => self.completed += 1,
        }
    }

    /// Fraction of the catalog completed (0.0 for an empty catalog)
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

pub fn summarize(catalog: &Catalog, snapshot: &UserProgressSnapshot) -> ProgressSummary {
    let mut summary = ProgressSummary::default();
    for entry in catalog {
        summary.record(evaluate(entry, snapshot).status);
    }
    summary
}

/// The next entry the user unlocks by levelling up.
///
/// Only level-gated entries count: a pro-locked entry for a non-pro user is
/// skipped since no level unlocks it.
pub fn next_unlock<'a>(
    catalog: &'a Catalog,
    snapshot: &UserProgressSnapshot,
) -> Option<&'a CatalogEntry> {
    catalog
        .iter()
        .filter(|entry| !snapshot.is_completed(&entry.id))
        .filter(|entry| entry.level_requirement > snapshot.level)
        .filter(|entry| !entry.is_pro() || snapshot.is_pro)
        .min_by_key(|entry| entry.level_requirement)
}

/// One academy category and its stages
#[derive(Debug, Clone, Serialize)]
pub struct AcademyGroup<'a> {
    pub category: &'a str,
    pub stages: Vec<VisibleEntry<'a>>,
}

/// Academy roadmap: stages grouped by category in first-appearance order,
/// each group sorted by level. Completed stages stay in the roadmap.
pub fn academy_view<'a>(
    catalog: &'a Catalog,
    snapshot: &UserProgressSnapshot,
) -> Vec<AcademyGroup<'a>> {
    let mut groups: Vec<AcademyGroup<'a>> = Vec::new();

    for entry in catalog.iter().filter(|e| e.is_academy_stage()) {
        let category = entry.category().unwrap_or("general");
        let row = VisibleEntry::new(entry, evaluate(entry, snapshot));
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.stages.push(row),
            None => groups.push(AcademyGroup {
                category,
                stages: vec![row],
            }),
        }
    }

    for group in &mut groups {
        group.stages.sort_by_key(|row| row.entry.level_requirement);
    }
    groups
}
