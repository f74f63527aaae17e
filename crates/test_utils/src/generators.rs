//! Property-Based Test Generators
//!
//! Proptest strategies for the registration domain. Used by the per-crate
//! property tests and available to downstream suites.

use proptest::prelude::*;

use domain_registration::{
    AttendedEvents, EsportsSince, FanSince, Gender, WatchingPreference, WeeklyHours, GAME_TITLES,
    ORG_TEAMS,
};
use domain_social::SocialPlatform;

/// Strategy for an 11-digit CPF string (digits only, no formatting)
pub fn cpf_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..10, 11)
        .prop_map(|digits| digits.into_iter().map(|d| (b'0' + d) as char).collect())
}

/// Strategy for an 8-digit postal code string
pub fn postal_code_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..10, 8)
        .prop_map(|digits| digits.into_iter().map(|d| (b'0' + d) as char).collect())
}

/// Strategy for a gender selection
pub fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Male),
        Just(Gender::Female),
        Just(Gender::NonBinary),
        Just(Gender::PreferNotToSay),
    ]
}

/// Strategy for a weekly-hours bucket
pub fn weekly_hours_strategy() -> impl Strategy<Value = WeeklyHours> {
    prop_oneof![
        Just(WeeklyHours::UpToFive),
        Just(WeeklyHours::SixToTen),
        Just(WeeklyHours::ElevenToTwenty),
        Just(WeeklyHours::TwentyOneToThirty),
        Just(WeeklyHours::OverThirty),
    ]
}

/// Strategy for an esports-tenure bucket
pub fn esports_since_strategy() -> impl Strategy<Value = EsportsSince> {
    prop_oneof![
        Just(EsportsSince::LessThanOne),
        Just(EsportsSince::OneToTwo),
        Just(EsportsSince::ThreeToFive),
        Just(EsportsSince::SixToTen),
        Just(EsportsSince::MoreThanTen),
    ]
}

/// Strategy for a watching-preference selection
pub fn watching_preference_strategy() -> impl Strategy<Value = WatchingPreference> {
    prop_oneof![
        Just(WatchingPreference::Twitch),
        Just(WatchingPreference::Youtube),
        Just(WatchingPreference::InPerson),
        Just(WatchingPreference::Tv),
        Just(WatchingPreference::Other),
    ]
}

/// Strategy for a fan-tenure bucket
pub fn fan_since_strategy() -> impl Strategy<Value = FanSince> {
    prop_oneof![
        Just(FanSince::LessThanOne),
        Just(FanSince::OneToTwo),
        Just(FanSince::ThreeToFive),
        Just(FanSince::SinceBeginning),
    ]
}

/// Strategy for an event-attendance answer
pub fn attended_events_strategy() -> impl Strategy<Value = AttendedEvents> {
    prop_oneof![
        Just(AttendedEvents::YesMultiple),
        Just(AttendedEvents::YesOnce),
        Just(AttendedEvents::NoButPlanTo),
        Just(AttendedEvents::Never),
    ]
}

/// Strategy for a social platform
pub fn social_platform_strategy() -> impl Strategy<Value = SocialPlatform> {
    prop_oneof![
        Just(SocialPlatform::Twitter),
        Just(SocialPlatform::Instagram),
        Just(SocialPlatform::Twitch),
        Just(SocialPlatform::Youtube),
    ]
}

/// Strategy for a non-empty selection of catalog game titles
pub fn game_selection_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(GAME_TITLES.to_vec(), 1..=GAME_TITLES.len())
        .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}

/// Strategy for a non-empty selection of catalog teams
pub fn team_selection_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(ORG_TEAMS.to_vec(), 1..=ORG_TEAMS.len())
        .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}
