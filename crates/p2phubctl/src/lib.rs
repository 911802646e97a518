//! p2phubctl - offline inspection of catalogs and progress snapshots.
//!
//! Command handlers return their output as strings so they can be tested
//! without spawning the binary.

use anyhow::{anyhow, Context, Result};
use p2phub_progress::status::percent;
use p2phub_progress::{
    evaluate, list_visible, next_unlock, summarize, Catalog, EngineConfig, ProgressError,
    UserProgressSnapshot, VerificationTicker,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    EngineConfig::load(path).with_context(|| format!("reading config {}", path.display()))
}

/// Catalog from `--catalog` if given, else from the config
pub fn load_catalog(
    config: &EngineConfig,
    override_path: Option<&Path>,
) -> Result<(Catalog, Vec<ProgressError>)> {
    let loaded = match override_path {
        Some(path) => Catalog::load(path, config.catalog.missing_goal)
            .with_context(|| format!("reading catalog {}", path.display()))?,
        None => config.catalog.load_catalog().context("loading catalog")?,
    };
    Ok(loaded)
}

pub fn load_snapshot(path: &Path) -> Result<UserProgressSnapshot> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing snapshot {}", path.display()))
}

/// Validation report and whether the catalog was clean
pub fn validate_report(catalog: &Catalog, rejected: &[ProgressError]) -> (String, bool) {
    let mut out = format!("{} entries accepted\n", catalog.len());
    if rejected.is_empty() {
        out.push_str("catalog OK\n");
        return (out, true);
    }
    out.push_str(&format!("{} entries rejected:\n", rejected.len()));
    for err in rejected {
        out.push_str(&format!("  [{}] {}\n", err.code(), err));
    }
    (out, false)
}

pub fn render_evaluation(
    catalog: &Catalog,
    snapshot: &UserProgressSnapshot,
    id: &str,
    json: bool,
) -> Result<String> {
    let entry = catalog
        .get(id)
        .ok_or_else(|| anyhow!(ProgressError::UnknownEntry(id.to_string())))?;
    let eval = evaluate(entry, snapshot);

    if json {
        #[derive(Serialize)]
        struct Row<'a> {
            id: &'a str,
            #[serde(flatten)]
            eval: p2phub_progress::Evaluation,
        }
        return Ok(serde_json::to_string_pretty(&Row { id, eval })?);
    }

    let mut line = format!("{} [{}] {}%", entry.id, eval.status, eval.percent());
    if let Some(secs) = eval.remaining_seconds {
        line.push_str(&format!(" ({}s left)", secs));
    }
    Ok(line)
}

pub fn render_list(
    catalog: &Catalog,
    snapshot: &UserProgressSnapshot,
    json: bool,
) -> Result<String> {
    let rows = list_visible(catalog, snapshot);
    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    if rows.is_empty() {
        return Ok("All clear - every mission completed".to_string());
    }

    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            format!(
                "L{:<3} {:<11} {:>3}%  {} ({})",
                row.entry.level_requirement,
                row.status.as_str(),
                percent(row.progress),
                row.entry.title,
                row.entry.id
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

pub fn render_summary(
    catalog: &Catalog,
    snapshot: &UserProgressSnapshot,
    json: bool,
) -> Result<String> {
    let summary = summarize(catalog, snapshot);
    let next = next_unlock(catalog, snapshot);

    if json {
        #[derive(Serialize)]
        struct Out<'a> {
            summary: &'a p2phub_progress::ProgressSummary,
            next_unlock: Option<&'a str>,
        }
        let out = Out {
            summary: &summary,
            next_unlock: next.map(|e| e.id.as_str()),
        };
        return Ok(serde_json::to_string_pretty(&out)?);
    }

    let mut out = format!(
        "level {}  completed {}/{} ({}%)\n",
        snapshot.level,
        summary.completed,
        summary.total,
        percent(summary.completion_rate())
    );
    out.push_str(&format!(
        "claimable {}  started {}  verifying {}  available {}  locked {}\n",
        summary.claimable, summary.started, summary.verifying, summary.available, summary.locked
    ));
    match next {
        Some(entry) => out.push_str(&format!(
            "next unlock: {} at level {}\n",
            entry.title, entry.level_requirement
        )),
        None => out.push_str("next unlock: none\n"),
    }
    Ok(out)
}

/// Run `steps` ticks at the configured interval and return the new snapshot as JSON
pub fn render_tick(
    config: &EngineConfig,
    snapshot: &UserProgressSnapshot,
    steps: u32,
) -> Result<String> {
    let ticker = VerificationTicker::from_config(&config.ticker);
    let mut current = snapshot.clone();
    for _ in 0..steps {
        current = ticker.step(&current);
    }
    Ok(serde_json::to_string_pretty(&current)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_report_clean() {
        let (report, ok) = validate_report(&Catalog::builtin(), &[]);
        assert!(ok);
        assert!(report.contains("catalog OK"));
    }

    #[test]
    fn test_unknown_id_is_error() {
        let snap = UserProgressSnapshot::default();
        let err = render_evaluation(&Catalog::builtin(), &snap, "nope", false).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_render_evaluation_text() {
        let snap = UserProgressSnapshot::new(1).begin_verification("join_channel", 12);
        let line = render_evaluation(&Catalog::builtin(), &snap, "join_channel", false).unwrap();
        assert_eq!(line, "join_channel [verifying] 0% (12s left)");
    }

    #[test]
    fn test_render_list_all_clear() {
        let catalog = Catalog::builtin();
        let mut snap = UserProgressSnapshot::new(1);
        for entry in &catalog {
            snap = snap.with_completed(&entry.id);
        }
        let out = render_list(&catalog, &snap, false).unwrap();
        assert!(out.starts_with("All clear"));
    }

    #[test]
    fn test_render_tick_uses_clamped_config_interval() {
        let mut config = EngineConfig::default();
        config.ticker.interval_secs = 600;
        let snap = UserProgressSnapshot::new(1).begin_verification("join_channel", 150);

        let out = render_tick(&config, &snap, 2).unwrap();
        let ticked: UserProgressSnapshot = serde_json::from_str(&out).unwrap();
        assert_eq!(ticked.verifying_entry("join_channel").unwrap().remaining_seconds, 30);
    }

    #[test]
    fn test_render_summary_json() {
        let snap = UserProgressSnapshot::new(1);
        let out = render_summary(&Catalog::builtin(), &snap, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["next_unlock"], "join_chat");
    }
}
