//! Builtin P2PHub catalog tables.
//!
//! Hand-authored content: partner tasks, referral milestones and academy
//! stages. Validated through the same path as file catalogs.

use crate::catalog::{CatalogFile, EntryDef, EntryKind};

pub(crate) fn builtin_file() -> CatalogFile {
    CatalogFile {
        tasks: tasks(),
        achievements: achievements(),
        academy: academy(),
    }
}

fn tasks() -> Vec<EntryDef> {
    use EntryKind::*;
    vec![
        // Onboarding
        EntryDef::new("join_channel", Social, 1)
            .with_title("Join the P2PHub channel")
            .with_reward(100),
        EntryDef::new("follow_x", Social, 1)
            .with_title("Follow P2PHub on X")
            .with_reward(100),
        EntryDef::new("first_invite", ReferralCount, 1)
            .with_goal(1)
            .with_title("Invite your first partner")
            .with_reward(150),
        EntryDef::new("checkin_3", ActionCount, 1)
            .with_goal(3)
            .with_title("Check in 3 days in a row")
            .with_reward(120),

        // Growth
        EntryDef::new("join_chat", Social, 2)
            .with_title("Join the partner chat")
            .with_reward(100),
        EntryDef::new("invite_3", ReferralCount, 2)
            .with_goal(3)
            .with_title("Invite 3 partners")
            .with_reward(300),
        EntryDef::new("checkin_7", ActionCount, 3)
            .with_goal(7)
            .with_title("Check in 7 days in a row")
            .with_reward(350),
        EntryDef::new("story_share", Social, 3)
            .with_title("Share a story about P2PHub")
            .with_reward(200),
        EntryDef::new("invite_10", ReferralCount, 5)
            .with_goal(10)
            .with_title("Invite 10 partners")
            .with_reward(1000),
        EntryDef::new("checkin_30", ActionCount, 8)
            .with_goal(30)
            .with_title("Check in 30 days in a row")
            .with_reward(1500),
        EntryDef::new("invite_25", ReferralCount, 10)
            .with_goal(25)
            .with_title("Invite 25 partners")
            .with_reward(3000),
    ]
}

fn achievements() -> Vec<EntryDef> {
    use EntryKind::*;
    vec![
        // Rank milestones
        EntryDef::new("rank_rookie", LevelOnly, 1).with_title("Rookie Partner"),
        EntryDef::new("rank_bronze", LevelOnly, 5)
            .with_title("Bronze Partner")
            .with_reward(500),
        EntryDef::new("rank_silver", LevelOnly, 10)
            .with_title("Silver Partner")
            .with_reward(1000),
        EntryDef::new("rank_gold", LevelOnly, 20)
            .with_title("Gold Partner")
            .with_reward(2500),
        EntryDef::new("rank_platinum", LevelOnly, 35)
            .with_title("Platinum Partner")
            .with_reward(5000),
        EntryDef::new("rank_diamond", LevelOnly, 50)
            .with_title("Diamond Partner")
            .with_reward(10000),

        // Network milestones
        EntryDef::new("network_builder", ReferralCount, 5)
            .with_goal(50)
            .with_title("Network Builder")
            .with_reward(5000),
        EntryDef::new("streak_master", ActionCount, 5)
            .with_goal(60)
            .with_title("Streak Master")
            .with_reward(4000),
    ]
}

fn academy() -> Vec<EntryDef> {
    use EntryKind::*;
    vec![
        EntryDef::new("academy_welcome", LevelOnly, 1)
            .with_title("Welcome to P2PHub")
            .in_category("basics"),
        EntryDef::new("academy_card", LevelOnly, 2)
            .with_title("Ordering your card")
            .in_category("basics"),
        EntryDef::new("academy_referrals", LevelOnly, 3)
            .with_title("How referrals pay")
            .in_category("referrals"),
        EntryDef::new("academy_pitch", LevelOnly, 5)
            .with_title("Your first pitch")
            .in_category("referrals"),
        EntryDef::new("academy_funnels", LevelOnly, 8)
            .with_title("Building a funnel")
            .in_category("referrals"),
        EntryDef::new("academy_pro_scaling", LevelOnly, 5)
            .with_title("Scaling your network")
            .in_category("pro")
            .pro(),
        EntryDef::new("academy_pro_masterclass", ProGated, 12)
            .with_title("Partner masterclass")
            .in_category("pro"),
    ]
}
