//! Visibility-aware countdown driver for verification timers.
//!
//! The ticker owns no clock. The caller reports elapsed time and view
//! visibility; the ticker decides whether timers move. It never fires a
//! status transition: an expired timer stays verifying until confirmed.

use crate::config::TickerConfig;
use crate::snapshot::UserProgressSnapshot;
use tracing::{debug, warn};

/// Valid tick interval range in seconds
pub const INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

/// What the caller should do after a visibility change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    /// View became visible after a pause; re-evaluate immediately
    CatchUp,
    /// Nothing to do
    Idle,
}

#[derive(Debug, Clone)]
pub struct VerificationTicker {
    interval_secs: u32,
    visible: bool,
}

impl VerificationTicker {
    pub fn new(interval_secs: u32) -> Self {
        Self {
            interval_secs: interval_secs.clamp(*INTERVAL_RANGE.start(), *INTERVAL_RANGE.end()),
            visible: true,
        }
    }

    pub fn from_config(config: &TickerConfig) -> Self {
        if config.interval_was_clamped() {
            warn!(
                configured = config.interval_secs,
                effective = config.effective_interval_secs(),
                "ticker interval out of range, clamped"
            );
        }
        Self::new(config.effective_interval_secs())
    }

    pub fn interval_secs(&self) -> u32 {
        self.interval_secs
    }

    pub fn is_running(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) -> Resume {
        let was_visible = self.visible;
        self.visible = visible;
        match (was_visible, visible) {
            (false, true) => {
                debug!("ticker resumed");
                Resume::CatchUp
            }
            (true, false) => {
                debug!("ticker paused");
                Resume::Idle
            }
            _ => Resume::Idle,
        }
    }

    /// Advance timers by `elapsed_secs` while visible; hidden views do not tick
    pub fn advance(
        &self,
        snapshot: &UserProgressSnapshot,
        elapsed_secs: u32,
    ) -> UserProgressSnapshot {
        if !self.visible || snapshot.verifying.is_empty() {
            return snapshot.clone();
        }
        snapshot.tick(elapsed_secs)
    }

    /// Advance by one configured interval
    pub fn step(&self, snapshot: &UserProgressSnapshot) -> UserProgressSnapshot {
        self.advance(snapshot, self.interval_secs)
    }
}

impl Default for VerificationTicker {
    fn default() -> Self {
        Self::new(1)
    }
}
