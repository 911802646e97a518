//! Catalog of unlockable items: tasks, achievements and academy stages.
//!
//! Definitions are decoded from TOML or JSON as raw `EntryDef` records and
//! validated into `CatalogEntry` values. A malformed entry is rejected and
//! reported on its own; the rest of the catalog still loads.

use crate::catalog_data;
use crate::error::ProgressError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Evaluation kind tag as written in catalog files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Social,
    ReferralCount,
    ActionCount,
    LevelOnly,
    ProGated,
    /// Any kind this build does not know about
    #[serde(other)]
    Unknown,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Social => "social",
            EntryKind::ReferralCount => "referral_count",
            EntryKind::ActionCount => "action_count",
            EntryKind::LevelOnly => "level_only",
            EntryKind::ProGated => "pro_gated",
            EntryKind::Unknown => "unknown",
        }
    }

    pub fn is_count_based(&self) -> bool {
        matches!(self, EntryKind::ReferralCount | EntryKind::ActionCount)
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated evaluation rule. Count-based rules always carry a goal >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    Social,
    ReferralCount { goal: u32 },
    ActionCount { goal: u32 },
    LevelOnly,
    ProGated,
    Unknown,
}

impl Rule {
    pub fn kind(&self) -> EntryKind {
        match self {
            Rule::Social => EntryKind::Social,
            Rule::ReferralCount { .. } => EntryKind::ReferralCount,
            Rule::ActionCount { .. } => EntryKind::ActionCount,
            Rule::LevelOnly => EntryKind::LevelOnly,
            Rule::ProGated => EntryKind::ProGated,
            Rule::Unknown => EntryKind::Unknown,
        }
    }

    pub fn goal(&self) -> Option<u32> {
        match self {
            Rule::ReferralCount { goal } | Rule::ActionCount { goal } => Some(*goal),
            _ => None,
        }
    }

    fn counted(kind: EntryKind, goal: u32) -> Rule {
        match kind {
            EntryKind::ReferralCount => Rule::ReferralCount { goal },
            _ => Rule::ActionCount { goal },
        }
    }

    fn uncounted(kind: EntryKind) -> Rule {
        match kind {
            EntryKind::Social => Rule::Social,
            EntryKind::LevelOnly => Rule::LevelOnly,
            EntryKind::ProGated => Rule::ProGated,
            _ => Rule::Unknown,
        }
    }
}

/// Kind-specific payload of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryVariant {
    Task { reward_xp: u32 },
    Achievement { reward_xp: u32 },
    AcademyStage { category: String, is_pro: bool },
}

/// Which catalog table a definition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Tasks,
    Achievements,
    Academy,
}

/// What to do with a count-based entry that has no goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingGoalPolicy {
    /// Drop the entry and report a configuration error
    #[default]
    Reject,
    /// Keep the entry with goal = 1 and log a warning
    DefaultOne,
}

/// Validated, immutable catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub level_requirement: u32,
    pub rule: Rule,
    pub variant: EntryVariant,
}

impl CatalogEntry {
    pub fn kind(&self) -> EntryKind {
        self.rule.kind()
    }

    pub fn goal(&self) -> Option<u32> {
        self.rule.goal()
    }

    /// Premium gate. Academy stages flagged pro and `pro_gated` entries both apply it.
    pub fn is_pro(&self) -> bool {
        match &self.variant {
            EntryVariant::AcademyStage { is_pro: true, .. } => true,
            _ => self.rule == Rule::ProGated,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match &self.variant {
            EntryVariant::AcademyStage { category, .. } => Some(category),
            _ => None,
        }
    }

    pub fn is_academy_stage(&self) -> bool {
        matches!(self.variant, EntryVariant::AcademyStage { .. })
    }
}

/// Raw catalog definition as written in configuration files.
///
/// Numeric fields are signed so that out-of-range values reject a single
/// entry instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDef {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_level", alias = "level")]
    pub level_requirement: i64,
    pub kind: EntryKind,
    #[serde(default)]
    pub goal: Option<i64>,
    #[serde(default)]
    pub reward_xp: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_pro: bool,
}

fn default_level() -> i64 {
    1
}

impl EntryDef {
    pub fn new(id: &str, kind: EntryKind, level_requirement: i64) -> Self {
        Self {
            id: id.to_string(),
            title: String::new(),
            level_requirement,
            kind,
            goal: None,
            reward_xp: 0,
            category: None,
            is_pro: false,
        }
    }

    pub fn with_goal(mut self, goal: i64) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_reward(mut self, xp: u32) -> Self {
        self.reward_xp = xp;
        self
    }

    pub fn in_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn pro(mut self) -> Self {
        self.is_pro = true;
        self
    }

    /// Check the kind/goal invariant and build the typed entry
    pub fn validate(
        self,
        section: Section,
        policy: MissingGoalPolicy,
    ) -> Result<CatalogEntry, ProgressError> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(ProgressError::EmptyId);
        }

        let level_requirement = u32::try_from(self.level_requirement)
            .ok()
            .filter(|level| *level >= 1)
            .ok_or_else(|| ProgressError::InvalidLevel {
                id: id.clone(),
                level: self.level_requirement,
            })?;

        let rule = match (self.kind, self.goal) {
            (kind, Some(goal)) if kind.is_count_based() => {
                let goal = u32::try_from(goal)
                    .ok()
                    .filter(|g| *g >= 1)
                    .ok_or_else(|| ProgressError::InvalidGoal {
                        id: id.clone(),
                        goal,
                    })?;
                Rule::counted(kind, goal)
            }
            (kind, None) if kind.is_count_based() => match policy {
                MissingGoalPolicy::Reject => {
                    return Err(ProgressError::MissingGoal {
                        id,
                        kind: kind.to_string(),
                    });
                }
                MissingGoalPolicy::DefaultOne => {
                    warn!(entry = %id, kind = %kind, "count-based entry has no goal, using 1");
                    Rule::counted(kind, 1)
                }
            },
            // Unknown kinds may carry fields a newer build understands
            (EntryKind::Unknown, _) => Rule::Unknown,
            (kind, Some(_)) => {
                return Err(ProgressError::UnexpectedGoal {
                    id,
                    kind: kind.to_string(),
                });
            }
            (kind, None) => Rule::uncounted(kind),
        };

        let variant = match section {
            Section::Tasks => EntryVariant::Task {
                reward_xp: self.reward_xp,
            },
            Section::Achievements => EntryVariant::Achievement {
                reward_xp: self.reward_xp,
            },
            Section::Academy => EntryVariant::AcademyStage {
                category: self.category.unwrap_or_else(|| "general".to_string()),
                is_pro: self.is_pro,
            },
        };

        let title = if self.title.trim().is_empty() {
            id.clone()
        } else {
            self.title
        };

        Ok(CatalogEntry {
            id,
            title,
            level_requirement,
            rule,
            variant,
        })
    }
}

/// On-disk catalog layout: one array per table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub tasks: Vec<EntryDef>,
    #[serde(default)]
    pub achievements: Vec<EntryDef>,
    #[serde(default)]
    pub academy: Vec<EntryDef>,
}

/// Ordered, validated catalog. Order is insertion order: tasks, then
/// achievements, then academy stages, each in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every definition, keeping the good ones and returning the rejections
    pub fn from_file(file: CatalogFile, policy: MissingGoalPolicy) -> (Self, Vec<ProgressError>) {
        let mut catalog = Catalog::new();
        let mut rejected = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let sections = [
            (Section::Tasks, file.tasks),
            (Section::Achievements, file.achievements),
            (Section::Academy, file.academy),
        ];

        for (section, defs) in sections {
            for def in defs {
                let outcome = def.validate(section, policy).and_then(|entry| {
                    if seen.insert(entry.id.clone()) {
                        Ok(entry)
                    } else {
                        Err(ProgressError::DuplicateId(entry.id))
                    }
                });
                match outcome {
                    Ok(entry) => catalog.entries.push(entry),
                    Err(e) => {
                        warn!("rejected catalog entry: {}", e);
                        rejected.push(e);
                    }
                }
            }
        }

        debug!(
            accepted = catalog.entries.len(),
            rejected = rejected.len(),
            "catalog loaded"
        );
        (catalog, rejected)
    }

    pub fn from_toml_str(
        content: &str,
        policy: MissingGoalPolicy,
    ) -> Result<(Self, Vec<ProgressError>), ProgressError> {
        let file: CatalogFile = toml::from_str(content)?;
        Ok(Self::from_file(file, policy))
    }

    pub fn from_json_str(
        content: &str,
        policy: MissingGoalPolicy,
    ) -> Result<(Self, Vec<ProgressError>), ProgressError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Ok(Self::from_file(file, policy))
    }

    /// Load a catalog file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(
        path: &Path,
        policy: MissingGoalPolicy,
    ) -> Result<(Self, Vec<ProgressError>), ProgressError> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json_str(&content, policy)
        } else {
            Self::from_toml_str(&content, policy)
        }
    }

    /// The hand-authored P2PHub catalog
    pub fn builtin() -> Self {
        let (catalog, rejected) =
            Self::from_file(catalog_data::builtin_file(), MissingGoalPolicy::Reject);
        debug_assert!(rejected.is_empty(), "builtin catalog has invalid entries");
        catalog
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
