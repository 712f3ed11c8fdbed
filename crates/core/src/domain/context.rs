use serde::{Deserialize, Serialize};

use crate::season::Season;

/// Situational inputs attached to a single recommendation request.
///
/// Weather arrives pre-resolved from the caller; this subsystem never calls
/// the weather or places services itself. Local events and price alerts are
/// always empty upstream today but kept for structural fidelity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationContext {
    pub current_season: Season,
    pub weather_conditions: Option<serde_json::Value>,
    pub local_events: Vec<String>,
    pub price_alerts: Vec<String>,
    pub user_mood: Option<String>,
    pub group_dynamics: Option<String>,
}

impl RecommendationContext {
    pub fn new(current_season: Season) -> Self {
        Self {
            current_season,
            weather_conditions: None,
            local_events: Vec::new(),
            price_alerts: Vec::new(),
            user_mood: None,
            group_dynamics: None,
        }
    }

    pub fn with_weather(mut self, weather: serde_json::Value) -> Self {
        self.weather_conditions = Some(weather);
        self
    }

    pub fn with_user_mood(mut self, mood: impl Into<String>) -> Self {
        self.user_mood = Some(mood.into());
        self
    }

    pub fn with_group_dynamics(mut self, dynamics: impl Into<String>) -> Self {
        self.group_dynamics = Some(dynamics.into());
        self
    }
}
