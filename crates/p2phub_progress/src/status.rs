//! Status evaluator.
//!
//! Maps a catalog entry and a user snapshot to a single status and progress
//! fraction. Pure: no side effects, same inputs give the same output.
//!
//! Rules are checked in a fixed order and the first match wins:
//!
//! 1. completed id              -> Completed (terminal)
//! 2. pro entry, non-pro user   -> Locked (before the level check)
//! 3. level below requirement   -> Locked
//! 4. pending verification      -> Verifying
//! 5. externally claimable      -> Claimable
//! 6. count-based kinds         -> Available / Started / Claimable
//! 7. everything else           -> Available

use crate::catalog::CatalogEntry;
use crate::snapshot::UserProgressSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Locked,
    Available,
    Started,
    Verifying,
    Claimable,
    Completed,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Locked,
        Status::Available,
        Status::Started,
        Status::Verifying,
        Status::Claimable,
        Status::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Locked => "locked",
            Status::Available => "available",
            Status::Started => "started",
            Status::Verifying => "verifying",
            Status::Claimable => "claimable",
            Status::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating one entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub status: Status,
    /// Progress fraction in [0, 1]. 1.0 for claimable and completed, 0.0 when
    /// progress does not apply.
    pub progress: f64,
    /// Countdown for display while verifying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
}

impl Evaluation {
    fn at(status: Status, progress: f64) -> Self {
        Self {
            status,
            progress,
            remaining_seconds: None,
        }
    }

    fn verifying(remaining_seconds: u32) -> Self {
        Self {
            status: Status::Verifying,
            progress: 0.0,
            remaining_seconds: Some(remaining_seconds),
        }
    }

    pub fn percent(&self) -> u32 {
        percent(self.progress)
    }
}

/// Progress fraction as a whole percentage
pub fn percent(progress: f64) -> u32 {
    (progress.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Evaluate a single entry against a snapshot
pub fn evaluate(entry: &CatalogEntry, snapshot: &UserProgressSnapshot) -> Evaluation {
    if snapshot.is_completed(&entry.id) {
        return Evaluation::at(Status::Completed, 1.0);
    }

    if entry.is_pro() && !snapshot.is_pro {
        return Evaluation::at(Status::Locked, 0.0);
    }

    if snapshot.level < entry.level_requirement {
        return Evaluation::at(Status::Locked, 0.0);
    }

    if let Some(pending) = snapshot.verifying_entry(&entry.id) {
        return Evaluation::verifying(pending.remaining_seconds);
    }

    if snapshot.claimable_ids.contains(&entry.id) {
        return Evaluation::at(Status::Claimable, 1.0);
    }

    if let Some(goal) = entry.goal() {
        let Some(effective) = effective_progress(entry, snapshot) else {
            return Evaluation::at(Status::Available, 0.0);
        };

        let goal = u64::from(goal.max(1));
        if effective >= goal {
            return Evaluation::at(Status::Claimable, 1.0);
        }
        let fraction = (effective as f64 / goal as f64).clamp(0.0, 1.0);
        return Evaluation::at(Status::Started, fraction);
    }

    Evaluation::at(Status::Available, 0.0)
}

/// Count-based progress made since the item was started, if it was started.
///
/// Clamped at zero so a corrected counter never shows negative progress.
pub fn effective_progress(entry: &CatalogEntry, snapshot: &UserProgressSnapshot) -> Option<u64> {
    let current = snapshot.metric_for(&entry.rule)?;
    let tracker = snapshot.tracker(&entry.id)?;
    Some(current.saturating_sub(tracker.baseline_metric_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EntryDef, EntryKind, MissingGoalPolicy, Section};

    fn entry(def: EntryDef, section: Section) -> CatalogEntry {
        def.validate(section, MissingGoalPolicy::Reject).unwrap()
    }

    #[test]
    fn test_level_gate() {
        let e = entry(EntryDef::new("rank_bronze", EntryKind::LevelOnly, 5), Section::Achievements);
        assert_eq!(evaluate(&e, &UserProgressSnapshot::new(4)).status, Status::Locked);
        assert_eq!(evaluate(&e, &UserProgressSnapshot::new(5)).status, Status::Available);
    }

    #[test]
    fn test_streak_task_uses_checkin_counter() {
        let e = entry(
            EntryDef::new("checkin_3", EntryKind::ActionCount, 1).with_goal(3),
            Section::Tasks,
        );
        let snap = UserProgressSnapshot::new(1)
            .with_streak(4)
            .start(&e)
            .with_referrals(100)
            .with_streak(5);
        let eval = evaluate(&e, &snap);
        assert_eq!(eval.status, Status::Started);
        assert!((eval.progress - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(effective_progress(&e, &snap), Some(1));
    }

    #[test]
    fn test_counter_regression_clamps_to_zero() {
        let e = entry(
            EntryDef::new("invite_3", EntryKind::ReferralCount, 1).with_goal(3),
            Section::Tasks,
        );
        let snap = UserProgressSnapshot::new(1).with_referrals(6).start(&e).with_referrals(4);
        let eval = evaluate(&e, &snap);
        assert_eq!(eval.status, Status::Started);
        assert_eq!(eval.progress, 0.0);
    }

    #[test]
    fn test_claimable_signal_for_social() {
        let e = entry(EntryDef::new("join_channel", EntryKind::Social, 1), Section::Tasks);
        let mut snap = UserProgressSnapshot::new(1);
        assert_eq!(evaluate(&e, &snap).status, Status::Available);
        snap = snap.confirm("join_channel");
        assert_eq!(evaluate(&e, &snap).status, Status::Claimable);
    }

    #[test]
    fn test_verifying_exposes_countdown() {
        let e = entry(EntryDef::new("join_chat", EntryKind::Social, 1), Section::Tasks);
        let snap = UserProgressSnapshot::new(1).begin_verification("join_chat", 30);
        let eval = evaluate(&e, &snap);
        assert_eq!(eval.status, Status::Verifying);
        assert_eq!(eval.remaining_seconds, Some(30));
    }

    #[test]
    fn test_unknown_kind_is_available() {
        let e = entry(EntryDef::new("future", EntryKind::Unknown, 1), Section::Tasks);
        assert_eq!(evaluate(&e, &UserProgressSnapshot::new(1)).status, Status::Available);
    }

    #[test]
    fn test_started_progress_matches_effective_progress() {
        let e = entry(
            EntryDef::new("invite_10", EntryKind::ReferralCount, 1).with_goal(10),
            Section::Tasks,
        );
        let fresh = UserProgressSnapshot::new(1).with_referrals(30);
        assert_eq!(effective_progress(&e, &fresh), None);
        assert_eq!(evaluate(&e, &fresh).status, Status::Available);

        let snap = fresh.start(&e).with_referrals(34);
        assert_eq!(effective_progress(&e, &snap), Some(4));
        assert!((evaluate(&e, &snap).progress - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_percent_rounds_and_clamps() {
        assert_eq!(percent(2.0 / 3.0), 67);
        assert_eq!(percent(1.5), 100);
        assert_eq!(percent(-0.2), 0);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Status::Claimable).unwrap(), "\"claimable\"");
    }
}
