//! Traveler profile model: preferences, history aggregates, and behavior
//! inference derived from raw trip records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::season::Season;

use super::trip::TravelerId;

/// Default budget range reported when no budgets were ever observed.
pub const DEFAULT_BUDGET_RANGE: (f64, f64) = (1000.0, 5000.0);
/// Average budget reported for a traveler with no recorded budgets.
pub const DEFAULT_AVERAGE_BUDGET: f64 = 2000.0;
/// Average trip duration reported when no trip has usable dates.
pub const DEFAULT_TRIP_DURATION_DAYS: f64 = 7.0;

/// Behavioral profile for one traveler, built from their trip history and
/// cached per traveler id. Immutable once handed to a caller; updates replace
/// the cached value with a fresh copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TravelerProfile {
    pub id: TravelerId,
    pub preferences: TravelPreferences,
    pub travel_history: TravelHistory,
    pub behavior_patterns: BehaviorPatterns,
    pub personality: Personality,
}

impl TravelerProfile {
    /// Fully-populated cold-start profile. Used both for travelers with zero
    /// history and as the degraded result when the trip store is unreachable,
    /// so callers never branch on build failure.
    pub fn default_for(id: TravelerId) -> Self {
        Self {
            id,
            preferences: TravelPreferences::default(),
            travel_history: TravelHistory::default(),
            behavior_patterns: BehaviorPatterns::default(),
            personality: Personality::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TravelPreferences {
    /// Newest-first, deduplicated, capped at ten entries.
    pub favorite_destinations: Vec<String>,
    /// Observed [min, max]; always ordered.
    pub preferred_budget_range: (f64, f64),
    /// First-seen order over newest-first records, deduplicated, capped at five.
    pub favorite_moods: Vec<String>,
    /// Mood tags seen per season, deduplicated within each season.
    pub seasonal_patterns: BTreeMap<Season, Vec<String>>,
    pub activity_preferences: Vec<String>,
    pub accommodation_style: String,
    pub dining_preferences: Vec<String>,
    pub transport_preferences: Vec<String>,
}

impl Default for TravelPreferences {
    fn default() -> Self {
        // The four trailing fields are static heuristics, kept structurally
        // extensible until real preference capture exists upstream.
        Self {
            favorite_destinations: Vec::new(),
            preferred_budget_range: DEFAULT_BUDGET_RANGE,
            favorite_moods: Vec::new(),
            seasonal_patterns: BTreeMap::new(),
            activity_preferences: vec!["sightseeing".to_string(), "local food".to_string()],
            accommodation_style: "mid-range hotel".to_string(),
            dining_preferences: vec!["local cuisine".to_string()],
            transport_preferences: vec!["public transit".to_string(), "walking".to_string()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TravelHistory {
    pub total_trips: usize,
    /// Country tokens extracted from destination strings, deduplicated.
    pub countries_visited: Vec<String>,
    pub average_trip_duration_days: f64,
    pub average_budget: f64,
    pub last_trip_date: Option<NaiveDate>,
    /// Chronological, oldest first.
    pub mood_evolution: Vec<MoodSample>,
}

impl Default for TravelHistory {
    fn default() -> Self {
        Self {
            total_trips: 0,
            countries_visited: Vec::new(),
            average_trip_duration_days: DEFAULT_TRIP_DURATION_DAYS,
            average_budget: DEFAULT_AVERAGE_BUDGET,
            last_trip_date: None,
            mood_evolution: Vec::new(),
        }
    }
}

/// One observed mood with a satisfaction score.
///
/// Satisfaction is a fixed placeholder until real feedback capture exists; the
/// constant lives in the profile builder so aggregation stays deterministic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoodSample {
    pub date: NaiveDate,
    pub mood: String,
    pub satisfaction: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviorPatterns {
    pub planning_style: PlanningStyle,
    pub risk_tolerance: RiskTolerance,
    pub social_preference: SocialPreference,
    /// Constant "moderate" until a real activity signal exists.
    pub activity_level: String,
    /// 8 with any international trip on record, 6 otherwise.
    pub cultural_openness: u8,
}

impl Default for BehaviorPatterns {
    fn default() -> Self {
        Self {
            planning_style: PlanningStyle::Flexible,
            risk_tolerance: RiskTolerance::Medium,
            social_preference: SocialPreference::Solo,
            activity_level: "moderate".to_string(),
            cultural_openness: 6,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanningStyle {
    Detailed,
    Flexible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    High,
    Medium,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPreference {
    Group,
    Solo,
}

/// User-settable personality shaping the tone of generated advice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Adventurous,
    Careful,
    Spontaneous,
    #[default]
    Balanced,
}

impl Personality {
    /// Behavioral directive injected into every generative system context.
    pub fn directive(&self) -> &'static str {
        match self {
            Personality::Adventurous => {
                "Favor bold, off-the-beaten-path suggestions and stretch the comfort zone."
            }
            Personality::Careful => {
                "Favor well-reviewed, low-risk options with clear logistics and refund paths."
            }
            Personality::Spontaneous => {
                "Favor flexible plans that leave room for last-minute changes and discoveries."
            }
            Personality::Balanced => {
                "Balance comfort and novelty; mix reliable picks with one or two surprises."
            }
        }
    }

    /// Lenient parse used for user-supplied values; anything unrecognized
    /// falls back to `Balanced`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "adventurous" => Personality::Adventurous,
            "careful" => Personality::Careful,
            "spontaneous" => Personality::Spontaneous,
            _ => Personality::Balanced,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Personality::Adventurous => "adventurous",
            Personality::Careful => "careful",
            Personality::Spontaneous => "spontaneous",
            Personality::Balanced => "balanced",
        }
    }
}
