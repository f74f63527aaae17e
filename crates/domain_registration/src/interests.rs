//! Gaming-interest and fandom records
//!
//! The wire values of the bucket enums match the option values of the
//! original registration form, so records round-trip against the existing
//! backend tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::ProfileId;

use crate::draft::Draft;

/// The fixed list of game titles offered on the gaming step
pub const GAME_TITLES: &[&str] = &[
    "CS:GO / CS2",
    "Valorant",
    "League of Legends",
    "Dota 2",
    "Apex Legends",
    "Fortnite",
    "Rainbow Six Siege",
    "Overwatch",
    "Rocket League",
    "FIFA / EA FC",
    "Call of Duty",
    "PUBG",
];

/// The fixed list of gaming platforms offered on the gaming step
pub const PLATFORMS: &[&str] = &["PC", "PlayStation", "Xbox", "Nintendo Switch", "Mobile"];

/// The organization's competitive rosters offered on the fandom step
pub const ORG_TEAMS: &[&str] = &[
    "CS:GO / CS2",
    "League of Legends",
    "Valorant",
    "Rainbow Six Siege",
    "Apex Legends",
    "Free Fire",
];

/// Weekly hours spent playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeeklyHours {
    #[serde(rename = "0-5")]
    UpToFive,
    #[serde(rename = "6-10")]
    SixToTen,
    #[serde(rename = "11-20")]
    ElevenToTwenty,
    #[serde(rename = "21-30")]
    TwentyOneToThirty,
    #[serde(rename = "30+")]
    OverThirty,
}

/// Years following esports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EsportsSince {
    #[serde(rename = "less-than-1")]
    LessThanOne,
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "6-10")]
    SixToTen,
    #[serde(rename = "more-than-10")]
    MoreThanTen,
}

/// Preferred channel for watching matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatchingPreference {
    #[serde(rename = "twitch")]
    Twitch,
    #[serde(rename = "youtube")]
    Youtube,
    #[serde(rename = "in-person")]
    InPerson,
    #[serde(rename = "tv")]
    Tv,
    #[serde(rename = "other")]
    Other,
}

/// Years as a fan of the organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FanSince {
    #[serde(rename = "less-than-1")]
    LessThanOne,
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "since-beginning")]
    SinceBeginning,
}

/// In-person event attendance history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendedEvents {
    #[serde(rename = "yes-multiple")]
    YesMultiple,
    #[serde(rename = "yes-once")]
    YesOnce,
    #[serde(rename = "no-plan-to")]
    NoButPlanTo,
    #[serde(rename = "no")]
    Never,
}

/// Payload for inserting a gaming-interest record, keyed by profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGamingInterests {
    pub profile_id: ProfileId,
    pub favorite_games: BTreeSet<String>,
    pub gaming_platforms: BTreeSet<String>,
    pub gaming_hours_weekly: Option<WeeklyHours>,
    pub esports_since: Option<EsportsSince>,
    pub watching_preference: Option<WatchingPreference>,
}

impl NewGamingInterests {
    /// Builds the insert payload from the draft's gaming section
    pub fn from_draft(profile_id: ProfileId, draft: &Draft) -> Self {
        Self {
            profile_id,
            favorite_games: draft.favorite_games.clone(),
            gaming_platforms: draft.platforms.clone(),
            gaming_hours_weekly: draft.weekly_hours,
            esports_since: draft.esports_since,
            watching_preference: draft.watching_preference,
        }
    }
}

/// Payload for inserting a fandom record, keyed by profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFandomRecord {
    pub profile_id: ProfileId,
    pub favorite_teams: BTreeSet<String>,
    pub fan_since: Option<FanSince>,
    pub favorite_players: String,
    pub purchased_merchandise: Option<bool>,
    pub attended_events: Option<AttendedEvents>,
    pub motivation: String,
}

impl NewFandomRecord {
    /// Builds the insert payload from the draft's fandom section
    pub fn from_draft(profile_id: ProfileId, draft: &Draft) -> Self {
        Self {
            profile_id,
            favorite_teams: draft.favorite_teams.clone(),
            fan_since: draft.fan_since,
            favorite_players: draft.favorite_players.clone(),
            purchased_merchandise: draft.purchased_merchandise,
            attended_events: draft.attended_events,
            motivation: draft.motivation.clone(),
        }
    }
}

/// Confirmation email request, sent after a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationEmail {
    pub email: String,
    pub name: String,
}
