//! Missions list, summary and task lifecycle tests.

use p2phub_progress::{
    list_visible, summarize, Catalog, CatalogFile, EntryDef, EntryKind, MissingGoalPolicy, Status,
    UserProgressSnapshot,
};

fn catalog(file: CatalogFile) -> Catalog {
    let (catalog, rejected) = Catalog::from_file(file, MissingGoalPolicy::Reject);
    assert!(rejected.is_empty(), "{:?}", rejected);
    catalog
}

#[test]
fn test_excludes_completed_sorts_by_level() {
    let cat = catalog(CatalogFile {
        tasks: vec![
            EntryDef::new("lvl10", EntryKind::LevelOnly, 10),
            EntryDef::new("lvl1", EntryKind::LevelOnly, 1),
            EntryDef::new("lvl5", EntryKind::LevelOnly, 5),
        ],
        ..Default::default()
    });
    let snap = UserProgressSnapshot::new(1).with_completed("lvl5");

    let ids: Vec<_> = list_visible(&cat, &snap)
        .iter()
        .map(|row| row.entry.id.as_str())
        .collect();
    assert_eq!(ids, vec!["lvl1", "lvl10"]);
}

#[test]
fn test_all_completed_gives_empty_list() {
    let cat = catalog(CatalogFile {
        tasks: vec![
            EntryDef::new("a", EntryKind::Social, 1),
            EntryDef::new("b", EntryKind::Social, 2),
        ],
        ..Default::default()
    });
    let snap = UserProgressSnapshot::new(1).with_completed("a").with_completed("b");
    assert!(list_visible(&cat, &snap).is_empty());
}

#[test]
fn test_list_is_recomputable() {
    let cat = Catalog::builtin();
    let snap = UserProgressSnapshot::new(4).with_referrals(3);
    let first: Vec<_> = list_visible(&cat, &snap)
        .iter()
        .map(|r| (r.entry.id.clone(), r.status))
        .collect();
    let second: Vec<_> = list_visible(&cat, &snap)
        .iter()
        .map(|r| (r.entry.id.clone(), r.status))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_builtin_catalog_levels_ascending() {
    let cat = Catalog::builtin();
    let rows = list_visible(&cat, &UserProgressSnapshot::new(1));
    assert_eq!(rows.len(), cat.len());
    assert!(rows
        .windows(2)
        .all(|w| w[0].entry.level_requirement <= w[1].entry.level_requirement));
}

#[test]
fn test_referral_task_lifecycle() {
    let cat = Catalog::builtin();
    let entry = cat.get("invite_3").unwrap();

    // Level 2 user with plenty of history
    let snap = UserProgressSnapshot::new(2).with_referrals(12);
    let row = |s: &UserProgressSnapshot| {
        list_visible(&cat, s)
            .into_iter()
            .find(|r| r.entry.id == "invite_3")
            .map(|r| r.status)
    };
    assert_eq!(row(&snap), Some(Status::Available));

    let snap = snap.start(entry);
    assert_eq!(row(&snap), Some(Status::Started));

    let snap = snap.with_referrals(15);
    assert_eq!(row(&snap), Some(Status::Claimable));

    let snap = snap.claim("invite_3");
    assert_eq!(row(&snap), None);
    assert!(snap.tracker("invite_3").is_none());
}

#[test]
fn test_summary_over_builtin() {
    let cat = Catalog::builtin();
    let snap = UserProgressSnapshot::new(1)
        .with_completed("join_channel")
        .begin_verification("follow_x", 30);
    let summary = summarize(&cat, &snap);

    assert_eq!(summary.total, cat.len());
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.verifying, 1);
    let counted: usize = Status::ALL.iter().map(|s| summary.count(*s)).sum();
    assert_eq!(counted, summary.total);
}
