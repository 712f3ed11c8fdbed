//! Predictive travel insights computed locally from the cached profile.
//!
//! Everything in this module is deterministic heuristics over history the
//! profile already carries; no generative call is ever involved, which is why
//! insights have no fallback path of their own.

use serde::{Deserialize, Serialize};

use crate::domain::profile::TravelerProfile;
use crate::season::Season;

/// Fixed confidence reported for a mood trend.
pub const MOOD_TREND_CONFIDENCE: f64 = 0.75;
/// Confidence when the current season has recorded mood patterns.
pub const SEASONAL_CONFIDENCE_KNOWN: f64 = 0.7;
/// Confidence for the generic prediction when the season is unseen.
pub const SEASONAL_CONFIDENCE_UNKNOWN: f64 = 0.3;
/// Cap on rule-based destination suggestions.
pub const MAX_DESTINATION_SUGGESTIONS: usize = 3;
/// Window of recent mood samples considered for the trend.
const MOOD_TREND_WINDOW: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoodTrend {
    /// Most recent observed mood.
    pub trend: String,
    pub confidence: f64,
    /// The recent samples the trend was read from, oldest first.
    pub recent_moods: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPrediction {
    pub season: Season,
    pub predicted_moods: Vec<String>,
    pub confidence: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingOptimization {
    pub months: Vec<String>,
    pub reasoning: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TravelInsights {
    /// `None` with fewer than two mood samples; that is absence, not failure.
    pub mood_trend: Option<MoodTrend>,
    pub seasonal_prediction: SeasonalPrediction,
    /// Placeholder statement; there is no real spend-trend inference yet.
    pub budget_trend: String,
    pub destination_suggestions: Vec<String>,
    pub timing_optimization: TimingOptimization,
}

/// Derive the full insight set from a profile for the given season.
pub fn derive(profile: &TravelerProfile, current_season: Season) -> TravelInsights {
    TravelInsights {
        mood_trend: mood_trend(profile),
        seasonal_prediction: seasonal_prediction(profile, current_season),
        budget_trend: budget_trend(),
        destination_suggestions: destination_suggestions(profile),
        timing_optimization: timing_optimization(),
    }
}

fn mood_trend(profile: &TravelerProfile) -> Option<MoodTrend> {
    let samples = &profile.travel_history.mood_evolution;
    if samples.len() < 2 {
        return None;
    }

    let window_start = samples.len().saturating_sub(MOOD_TREND_WINDOW);
    let recent: Vec<String> = samples[window_start..].iter().map(|s| s.mood.clone()).collect();
    let trend = recent.last()?.clone();

    Some(MoodTrend { trend, confidence: MOOD_TREND_CONFIDENCE, recent_moods: recent })
}

fn seasonal_prediction(profile: &TravelerProfile, season: Season) -> SeasonalPrediction {
    match profile.preferences.seasonal_patterns.get(&season) {
        Some(moods) if !moods.is_empty() => SeasonalPrediction {
            season,
            predicted_moods: moods.clone(),
            confidence: SEASONAL_CONFIDENCE_KNOWN,
        },
        _ => SeasonalPrediction {
            season,
            predicted_moods: vec!["adventure".to_string()],
            confidence: SEASONAL_CONFIDENCE_UNKNOWN,
        },
    }
}

fn budget_trend() -> String {
    // Placeholder until genuine spend-trend inference is wired up.
    "Your travel spending is trending upward as you take more trips.".to_string()
}

fn destination_suggestions(profile: &TravelerProfile) -> Vec<String> {
    let mut suggestions = Vec::new();

    for country in &profile.travel_history.countries_visited {
        suggestions.push(format!("Revisit {country} in a different season for a new side of it."));
        if suggestions.len() == MAX_DESTINATION_SUGGESTIONS {
            return suggestions;
        }
    }

    for destination in &profile.preferences.favorite_destinations {
        suggestions.push(format!("Plan a longer stay around {destination} to go deeper."));
        if suggestions.len() == MAX_DESTINATION_SUGGESTIONS {
            return suggestions;
        }
    }

    if suggestions.is_empty() {
        suggestions.push("Start with a short city break close to home to find your pace.".to_string());
    }

    suggestions
}

fn timing_optimization() -> TimingOptimization {
    TimingOptimization {
        months: vec!["May".to_string(), "June".to_string(), "September".to_string()],
        reasoning: "Shoulder-season months usually balance good weather with lower prices."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::builder::DEFAULT_SATISFACTION;
    use crate::domain::profile::{MoodSample, TravelerProfile};
    use crate::domain::trip::TravelerId;
    use crate::season::Season;

    use super::{
        derive, MAX_DESTINATION_SUGGESTIONS, MOOD_TREND_CONFIDENCE, SEASONAL_CONFIDENCE_KNOWN,
        SEASONAL_CONFIDENCE_UNKNOWN,
    };

    fn sample(day: u32, mood: &str) -> MoodSample {
        MoodSample {
            date: NaiveDate::from_ymd_opt(2026, 3, day).expect("valid date"),
            mood: mood.to_string(),
            satisfaction: DEFAULT_SATISFACTION,
        }
    }

    fn profile() -> TravelerProfile {
        TravelerProfile::default_for(TravelerId::new("trav-1"))
    }

    #[test]
    fn mood_trend_needs_at_least_two_samples() {
        let mut p = profile();
        p.travel_history.mood_evolution = vec![sample(1, "culture")];

        let insights = derive(&p, Season::Spring);
        assert!(insights.mood_trend.is_none());
    }

    #[test]
    fn mood_trend_reports_most_recent_of_last_three() {
        let mut p = profile();
        p.travel_history.mood_evolution = vec![
            sample(1, "culture"),
            sample(5, "relaxation"),
            sample(9, "adventure"),
            sample(14, "foodie"),
        ];

        let trend = derive(&p, Season::Spring).mood_trend.expect("trend");
        assert_eq!(trend.trend, "foodie");
        assert_eq!(trend.confidence, MOOD_TREND_CONFIDENCE);
        assert_eq!(trend.recent_moods, vec!["relaxation", "adventure", "foodie"]);
    }

    #[test]
    fn unseen_season_predicts_adventure_at_low_confidence() {
        let insights = derive(&profile(), Season::Winter);

        assert_eq!(insights.seasonal_prediction.predicted_moods, vec!["adventure".to_string()]);
        assert_eq!(insights.seasonal_prediction.confidence, SEASONAL_CONFIDENCE_UNKNOWN);
    }

    #[test]
    fn recorded_season_echoes_its_moods_at_higher_confidence() {
        let mut p = profile();
        p.preferences
            .seasonal_patterns
            .insert(Season::Summer, vec!["relaxation".to_string(), "beach".to_string()]);

        let insights = derive(&p, Season::Summer);

        assert_eq!(
            insights.seasonal_prediction.predicted_moods,
            vec!["relaxation".to_string(), "beach".to_string()],
        );
        assert_eq!(insights.seasonal_prediction.confidence, SEASONAL_CONFIDENCE_KNOWN);
    }

    #[test]
    fn destination_suggestions_are_capped_and_never_empty() {
        let empty = derive(&profile(), Season::Spring);
        assert_eq!(empty.destination_suggestions.len(), 1);

        let mut p = profile();
        p.travel_history.countries_visited =
            vec!["Portugal".to_string(), "Japan".to_string(), "Norway".to_string()];
        p.preferences.favorite_destinations = vec!["Lisbon, Portugal".to_string()];

        let full = derive(&p, Season::Spring);
        assert_eq!(full.destination_suggestions.len(), MAX_DESTINATION_SUGGESTIONS);
    }
}
