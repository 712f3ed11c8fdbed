//! Profile builder: deterministic aggregation of raw trip records into a
//! `TravelerProfile`.
//!
//! The builder is a pure function over an already-fetched trip list; the
//! fetch-with-fallback wrapper lives in the engine service so this module
//! stays trivially testable.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::profile::{
    BehaviorPatterns, MoodSample, Personality, PlanningStyle, RiskTolerance, SocialPreference,
    TravelHistory, TravelPreferences, TravelerProfile, DEFAULT_AVERAGE_BUDGET,
    DEFAULT_BUDGET_RANGE, DEFAULT_TRIP_DURATION_DAYS,
};
use crate::domain::trip::{TravelerId, TripRecord};
use crate::season::Season;

/// Cap on remembered favorite destinations.
pub const MAX_FAVORITE_DESTINATIONS: usize = 10;
/// Cap on remembered favorite moods.
pub const MAX_FAVORITE_MOODS: usize = 5;
/// Per-trip duration assumed when either date is missing.
pub const FALLBACK_TRIP_DURATION_DAYS: f64 = 7.0;
/// Placeholder satisfaction score until real feedback capture exists.
/// A constant (not a sampled value) keeps profile builds idempotent.
pub const DEFAULT_SATISFACTION: f64 = 8.0;

/// Build a profile from trip records ordered newest-first.
///
/// Total and deterministic: zero records yield the cold-start defaults, and
/// rebuilding from an unchanged list yields a field-for-field equal profile.
pub fn build_profile(id: &TravelerId, trips: &[TripRecord]) -> TravelerProfile {
    let preferences = derive_preferences(trips);
    let travel_history = derive_history(trips);
    let behavior_patterns = derive_behavior(trips);

    TravelerProfile {
        id: id.clone(),
        preferences,
        travel_history,
        behavior_patterns,
        personality: Personality::default(),
    }
}

fn derive_preferences(trips: &[TripRecord]) -> TravelPreferences {
    let mut preferences = TravelPreferences::default();

    let mut destinations: Vec<String> = Vec::new();
    let mut moods: Vec<String> = Vec::new();
    let mut seasonal: BTreeMap<Season, Vec<String>> = BTreeMap::new();
    let mut budget_min: Option<f64> = None;
    let mut budget_max: Option<f64> = None;

    for trip in trips {
        let destination = trip.destination.trim();
        if !destination.is_empty() && !contains_ignore_case(&destinations, destination) {
            destinations.push(destination.to_string());
        }

        if let Some(mood) = normalized_mood(trip) {
            if !contains_ignore_case(&moods, &mood) {
                moods.push(mood.clone());
            }

            let season = Season::from_date(trip_anchor_date(trip));
            let entry = seasonal.entry(season).or_default();
            if !contains_ignore_case(entry, &mood) {
                entry.push(mood);
            }
        }

        if let Some(budget) = trip.budget {
            budget_min = Some(budget_min.map_or(budget, |min: f64| min.min(budget)));
            budget_max = Some(budget_max.map_or(budget, |max: f64| max.max(budget)));
        }
    }

    destinations.truncate(MAX_FAVORITE_DESTINATIONS);
    moods.truncate(MAX_FAVORITE_MOODS);

    preferences.favorite_destinations = destinations;
    preferences.favorite_moods = moods;
    preferences.seasonal_patterns = seasonal;
    preferences.preferred_budget_range = match (budget_min, budget_max) {
        (Some(min), Some(max)) => (min, max),
        _ => DEFAULT_BUDGET_RANGE,
    };

    preferences
}

fn derive_history(trips: &[TripRecord]) -> TravelHistory {
    let mut countries: Vec<String> = Vec::new();
    let mut duration_sum = 0.0;
    let mut budget_sum = 0.0;
    let mut budget_count = 0usize;

    for trip in trips {
        if let Some(country) = country_from_destination(&trip.destination) {
            if !contains_ignore_case(&countries, &country) {
                countries.push(country);
            }
        }

        duration_sum += trip_duration_days(trip);

        if let Some(budget) = trip.budget {
            budget_sum += budget;
            budget_count += 1;
        }
    }

    let average_trip_duration_days = if trips.is_empty() {
        DEFAULT_TRIP_DURATION_DAYS
    } else {
        duration_sum / trips.len() as f64
    };

    let average_budget = if budget_count == 0 {
        DEFAULT_AVERAGE_BUDGET
    } else {
        budget_sum / budget_count as f64
    };

    // Records are newest-first; the first dated record is the latest trip.
    let last_trip_date = trips.iter().find_map(|trip| trip.start_date);

    // Oldest-first so "most recent" reads as a suffix window.
    let mood_evolution: Vec<MoodSample> = trips
        .iter()
        .rev()
        .filter_map(|trip| {
            normalized_mood(trip).map(|mood| MoodSample {
                date: trip_anchor_date(trip),
                mood,
                satisfaction: DEFAULT_SATISFACTION,
            })
        })
        .collect();

    TravelHistory {
        total_trips: trips.len(),
        countries_visited: countries,
        average_trip_duration_days,
        average_budget,
        last_trip_date,
        mood_evolution,
    }
}

fn derive_behavior(trips: &[TripRecord]) -> BehaviorPatterns {
    let international = trips.iter().any(|trip| trip.destination.contains(','));

    BehaviorPatterns {
        planning_style: if trips.len() > 5 { PlanningStyle::Detailed } else { PlanningStyle::Flexible },
        // Comma in the destination is the "City, Country" international
        // heuristic; best effort over free-text destinations.
        risk_tolerance: if international { RiskTolerance::High } else { RiskTolerance::Medium },
        social_preference: if trips.iter().any(|trip| trip.travelers > 1) {
            SocialPreference::Group
        } else {
            SocialPreference::Solo
        },
        activity_level: "moderate".to_string(),
        cultural_openness: if international { 8 } else { 6 },
    }
}

/// Best-effort country token: text after the first comma, trimmed.
/// Destinations without a comma (or with nothing after it) contribute nothing.
pub fn country_from_destination(destination: &str) -> Option<String> {
    let (_, rest) = destination.split_once(',')?;
    let country = rest.trim();
    if country.is_empty() {
        None
    } else {
        Some(country.to_string())
    }
}

fn trip_duration_days(trip: &TripRecord) -> f64 {
    match (trip.start_date, trip.end_date) {
        (Some(start), Some(end)) => {
            let days = (end - start).num_days();
            if days >= 0 {
                days as f64
            } else {
                FALLBACK_TRIP_DURATION_DAYS
            }
        }
        _ => FALLBACK_TRIP_DURATION_DAYS,
    }
}

fn trip_anchor_date(trip: &TripRecord) -> NaiveDate {
    trip.start_date.unwrap_or_else(|| trip.created_at.date_naive())
}

fn normalized_mood(trip: &TripRecord) -> Option<String> {
    trip.mood
        .as_deref()
        .map(str::trim)
        .filter(|mood| !mood.is_empty())
        .map(|mood| mood.to_ascii_lowercase())
}

fn contains_ignore_case(values: &[String], candidate: &str) -> bool {
    values.iter().any(|value| value.eq_ignore_ascii_case(candidate))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::domain::profile::{PlanningStyle, RiskTolerance, SocialPreference};
    use crate::domain::trip::{TravelerId, TripRecord};
    use crate::season::Season;

    use super::{build_profile, country_from_destination};

    fn traveler() -> TravelerId {
        TravelerId::new("trav-42")
    }

    fn record(offset_days: i64, destination: &str) -> TripRecord {
        let created = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
            - chrono::Duration::days(offset_days);
        TripRecord::new(destination, created)
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn zero_trips_yield_cold_start_defaults() {
        let profile = build_profile(&traveler(), &[]);

        assert_eq!(profile.travel_history.total_trips, 0);
        assert_eq!(profile.travel_history.average_budget, 2000.0);
        assert_eq!(profile.travel_history.average_trip_duration_days, 7.0);
        assert_eq!(profile.preferences.preferred_budget_range, (1000.0, 5000.0));
        assert!(profile.preferences.favorite_destinations.is_empty());
        assert!(profile.preferences.seasonal_patterns.is_empty());
        assert!(profile.travel_history.mood_evolution.is_empty());
        assert!(profile.travel_history.last_trip_date.is_none());
    }

    #[test]
    fn budgets_aggregate_into_average_and_range() {
        let trips = vec![
            record(0, "Lisbon, Portugal").with_budget(1000.0),
            record(30, "Kyoto, Japan").with_budget(3000.0),
            record(60, "Porto, Portugal").with_budget(2000.0),
        ];

        let profile = build_profile(&traveler(), &trips);

        assert_eq!(profile.travel_history.average_budget, 2000.0);
        assert_eq!(profile.preferences.preferred_budget_range, (1000.0, 3000.0));
    }

    #[test]
    fn moods_dedupe_preserving_first_seen_order() {
        let trips = vec![
            record(0, "Lisbon").with_mood("adventure"),
            record(10, "Rome").with_mood("culture"),
            record(20, "Oslo").with_mood("Adventure"),
            record(30, "Bali").with_mood("relaxation"),
        ];

        let profile = build_profile(&traveler(), &trips);

        assert_eq!(
            profile.preferences.favorite_moods,
            vec!["adventure".to_string(), "culture".to_string(), "relaxation".to_string()],
        );
    }

    #[test]
    fn destinations_and_countries_contain_no_duplicates() {
        let trips = vec![
            record(0, "Lisbon, Portugal"),
            record(10, "Porto, Portugal"),
            record(20, "Lisbon, Portugal"),
            record(30, "Kyoto, Japan"),
        ];

        let profile = build_profile(&traveler(), &trips);

        assert_eq!(
            profile.preferences.favorite_destinations,
            vec![
                "Lisbon, Portugal".to_string(),
                "Porto, Portugal".to_string(),
                "Kyoto, Japan".to_string(),
            ],
        );
        assert_eq!(
            profile.travel_history.countries_visited,
            vec!["Portugal".to_string(), "Japan".to_string()],
        );
    }

    #[test]
    fn missing_dates_default_each_trip_to_seven_days() {
        let trips = vec![
            record(0, "Lisbon").with_dates(date(2026, 5, 1), date(2026, 5, 11)),
            record(30, "Rome"),
        ];

        let profile = build_profile(&traveler(), &trips);

        assert_eq!(profile.travel_history.average_trip_duration_days, 8.5);
    }

    #[test]
    fn seasonal_patterns_group_moods_by_trip_season() {
        let trips = vec![
            record(0, "Lisbon")
                .with_dates(date(2026, 1, 10), date(2026, 1, 17))
                .with_mood("skiing"),
            record(30, "Bali")
                .with_dates(date(2025, 7, 2), date(2025, 7, 12))
                .with_mood("relaxation"),
            record(60, "Oslo")
                .with_dates(date(2025, 1, 20), date(2025, 1, 27))
                .with_mood("skiing"),
        ];

        let profile = build_profile(&traveler(), &trips);
        let patterns = &profile.preferences.seasonal_patterns;

        assert_eq!(patterns.get(&Season::Winter), Some(&vec!["skiing".to_string()]));
        assert_eq!(patterns.get(&Season::Summer), Some(&vec!["relaxation".to_string()]));
    }

    #[test]
    fn behavior_heuristics_follow_history_shape() {
        let domestic_solo = build_profile(&traveler(), &[record(0, "Lisbon")]);
        assert_eq!(domestic_solo.behavior_patterns.planning_style, PlanningStyle::Flexible);
        assert_eq!(domestic_solo.behavior_patterns.risk_tolerance, RiskTolerance::Medium);
        assert_eq!(domestic_solo.behavior_patterns.social_preference, SocialPreference::Solo);
        assert_eq!(domestic_solo.behavior_patterns.cultural_openness, 6);

        let trips: Vec<_> = (0..6)
            .map(|n| record(n * 10, "Kyoto, Japan").with_travelers(3))
            .collect();
        let seasoned_group = build_profile(&traveler(), &trips);
        assert_eq!(seasoned_group.behavior_patterns.planning_style, PlanningStyle::Detailed);
        assert_eq!(seasoned_group.behavior_patterns.risk_tolerance, RiskTolerance::High);
        assert_eq!(seasoned_group.behavior_patterns.social_preference, SocialPreference::Group);
        assert_eq!(seasoned_group.behavior_patterns.cultural_openness, 8);
    }

    #[test]
    fn mood_evolution_is_chronological_and_last_trip_date_is_newest() {
        let trips = vec![
            record(0, "Lisbon")
                .with_dates(date(2026, 5, 1), date(2026, 5, 8))
                .with_mood("culture"),
            record(90, "Bali")
                .with_dates(date(2026, 2, 1), date(2026, 2, 8))
                .with_mood("relaxation"),
        ];

        let profile = build_profile(&traveler(), &trips);

        let moods: Vec<_> =
            profile.travel_history.mood_evolution.iter().map(|s| s.mood.as_str()).collect();
        assert_eq!(moods, vec!["relaxation", "culture"]);
        assert_eq!(profile.travel_history.last_trip_date, Some(date(2026, 5, 1)));
    }

    #[test]
    fn rebuilding_from_unchanged_trips_is_idempotent() {
        let trips = vec![
            record(0, "Lisbon, Portugal").with_budget(1500.0).with_mood("culture"),
            record(30, "Kyoto, Japan").with_budget(3200.0).with_mood("adventure"),
        ];

        let first = build_profile(&traveler(), &trips);
        let second = build_profile(&traveler(), &trips);

        assert_eq!(first, second);
    }

    #[test]
    fn country_extraction_is_best_effort() {
        assert_eq!(country_from_destination("Lisbon, Portugal"), Some("Portugal".to_string()));
        assert_eq!(country_from_destination("Tokyo , Japan "), Some("Japan".to_string()));
        assert_eq!(country_from_destination("Reykjavik"), None);
        assert_eq!(country_from_destination("Nowhere,"), None);
    }
}
