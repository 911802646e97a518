//! User progress snapshot.
//!
//! Immutable summary of one user's progression state. Every state change
//! (start, verify, confirm, claim, tick, counter update) returns a new
//! snapshot; nothing is mutated in place.

use crate::catalog::{CatalogEntry, Rule};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Baseline recorded when a user starts a count-based item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub item_id: String,
    /// Counter value at the moment the item was started
    pub baseline_metric_value: u64,
}

/// Time-boxed pending verification for a social or action task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingEntry {
    pub item_id: String,
    pub remaining_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgressSnapshot {
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub referral_count: u64,
    #[serde(default)]
    pub checkin_streak: u64,
    #[serde(default)]
    pub completed_ids: BTreeSet<String>,
    #[serde(default)]
    pub trackers: BTreeMap<String, Tracker>,
    #[serde(default)]
    pub verifying: BTreeMap<String, VerifyingEntry>,
    #[serde(default)]
    pub claimable_ids: BTreeSet<String>,
    #[serde(default)]
    pub is_pro: bool,
}

fn default_level() -> u32 {
    1
}

impl Default for UserProgressSnapshot {
    fn default() -> Self {
        Self::new(default_level())
    }
}

impl UserProgressSnapshot {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            referral_count: 0,
            checkin_streak: 0,
            completed_ids: BTreeSet::new(),
            trackers: BTreeMap::new(),
            verifying: BTreeMap::new(),
            claimable_ids: BTreeSet::new(),
            is_pro: false,
        }
    }

    /// Current value of the counter a count-based rule measures
    pub fn metric_for(&self, rule: &Rule) -> Option<u64> {
        match rule {
            Rule::ReferralCount { .. } => Some(self.referral_count),
            Rule::ActionCount { .. } => Some(self.checkin_streak),
            _ => None,
        }
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed_ids.contains(id)
    }

    pub fn tracker(&self, id: &str) -> Option<&Tracker> {
        self.trackers.get(id)
    }

    pub fn verifying_entry(&self, id: &str) -> Option<&VerifyingEntry> {
        self.verifying.get(id)
    }

    // ========== Counter updates ==========

    pub fn with_level(&self, level: u32) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    pub fn with_referrals(&self, referral_count: u64) -> Self {
        Self {
            referral_count,
            ..self.clone()
        }
    }

    pub fn with_streak(&self, checkin_streak: u64) -> Self {
        Self {
            checkin_streak,
            ..self.clone()
        }
    }

    pub fn with_pro(&self, is_pro: bool) -> Self {
        Self {
            is_pro,
            ..self.clone()
        }
    }

    pub fn with_completed(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.completed_ids.insert(id.to_string());
        next
    }

    // ========== Lifecycle transitions ==========

    /// Start a count-based item, baselining its goal at the current counter.
    ///
    /// No-op when the item is completed, already tracked, or not count-based.
    pub fn start(&self, entry: &CatalogEntry) -> Self {
        if self.is_completed(&entry.id) || self.trackers.contains_key(&entry.id) {
            return self.clone();
        }
        let Some(baseline) = self.metric_for(&entry.rule) else {
            return self.clone();
        };

        debug!(entry = %entry.id, baseline, "tracker started");
        let mut next = self.clone();
        next.trackers.insert(
            entry.id.clone(),
            Tracker {
                item_id: entry.id.clone(),
                baseline_metric_value: baseline,
            },
        );
        next
    }

    /// Drop the tracker for an item the user abandoned
    pub fn abandon(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.trackers.remove(id);
        next
    }

    /// Enter pending verification for `seconds`
    pub fn begin_verification(&self, id: &str, seconds: u32) -> Self {
        let mut next = self.clone();
        next.verifying.insert(
            id.to_string(),
            VerifyingEntry {
                item_id: id.to_string(),
                remaining_seconds: seconds,
            },
        );
        next
    }

    /// External confirmation: the only way out of verification into claimable
    pub fn confirm(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.verifying.remove(id);
        next.claimable_ids.insert(id.to_string());
        next
    }

    /// Apply a successful claim
    pub fn claim(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.claimable_ids.remove(id);
        next.trackers.remove(id);
        next.verifying.remove(id);
        next.completed_ids.insert(id.to_string());
        next
    }

    /// Count down every verification timer, saturating at zero.
    ///
    /// Expired entries stay in `verifying` until confirmed externally.
    pub fn tick(&self, elapsed_secs: u32) -> Self {
        let mut next = self.clone();
        for entry in next.verifying.values_mut() {
            entry.remaining_seconds = entry.remaining_seconds.saturating_sub(elapsed_secs);
        }
        next
    }
}
