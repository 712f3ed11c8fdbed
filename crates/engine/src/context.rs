//! Context assembly: turns a traveler profile plus situational inputs into
//! the normalized structure every task instruction is built from.

use wayfarer_core::domain::context::RecommendationContext;
use wayfarer_core::domain::profile::TravelerProfile;
use wayfarer_core::season::Season;

/// Normalized prompt inputs shared by all task generators. Assembly is pure
/// and deterministic; each task module formats these fields into its own
/// instruction string.
#[derive(Clone, Debug, PartialEq)]
pub struct PromptContext {
    pub total_trips: usize,
    pub average_budget: f64,
    pub average_trip_duration_days: f64,
    pub favorite_destinations: Vec<String>,
    pub favorite_moods: Vec<String>,
    pub countries_visited: Vec<String>,
    pub personality_directive: String,
    pub current_season: Season,
    pub weather_summary: Option<String>,
    pub user_mood: Option<String>,
    pub group_dynamics: Option<String>,
}

impl PromptContext {
    /// Render the system prompt handed to the completion client.
    pub fn system_context(&self) -> String {
        let mut lines = vec![
            "You are a travel-planning assistant working from a traveler profile.".to_string(),
            format!(
                "Traveler history: {} trips, average budget ${:.0}, average duration {:.1} days.",
                self.total_trips, self.average_budget, self.average_trip_duration_days,
            ),
        ];

        if !self.favorite_destinations.is_empty() {
            lines.push(format!(
                "Favorite destinations: {}.",
                self.favorite_destinations.join(", ")
            ));
        }
        if !self.favorite_moods.is_empty() {
            lines.push(format!("Favorite travel moods: {}.", self.favorite_moods.join(", ")));
        }
        if !self.countries_visited.is_empty() {
            lines.push(format!("Countries visited: {}.", self.countries_visited.join(", ")));
        }

        lines.push(format!("Current season: {}.", self.current_season));
        if let Some(weather) = &self.weather_summary {
            lines.push(format!("Current weather: {weather}."));
        }
        if let Some(mood) = &self.user_mood {
            lines.push(format!("The traveler is currently in a {mood} mood."));
        }
        if let Some(group) = &self.group_dynamics {
            lines.push(format!("Group dynamics: {group}."));
        }

        lines.push(format!("Style guidance: {}", self.personality_directive));
        lines.join("\n")
    }
}

pub struct ContextAssembler;

impl ContextAssembler {
    /// Pure, total assembly; never fails, even for a cold-start profile.
    pub fn assemble(
        profile: &TravelerProfile,
        situational: &RecommendationContext,
    ) -> PromptContext {
        PromptContext {
            total_trips: profile.travel_history.total_trips,
            average_budget: profile.travel_history.average_budget,
            average_trip_duration_days: profile.travel_history.average_trip_duration_days,
            favorite_destinations: profile.preferences.favorite_destinations.clone(),
            favorite_moods: profile.preferences.favorite_moods.clone(),
            countries_visited: profile.travel_history.countries_visited.clone(),
            personality_directive: profile.personality.directive().to_string(),
            current_season: situational.current_season,
            weather_summary: situational.weather_conditions.as_ref().map(render_weather),
            user_mood: situational.user_mood.clone(),
            group_dynamics: situational.group_dynamics.clone(),
        }
    }
}

/// Weather payloads are opaque JSON from the caller; render compactly so the
/// prompt stays bounded whatever shape arrives.
fn render_weather(weather: &serde_json::Value) -> String {
    match weather {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use wayfarer_core::domain::context::RecommendationContext;
    use wayfarer_core::domain::profile::{Personality, TravelerProfile};
    use wayfarer_core::domain::trip::TravelerId;
    use wayfarer_core::season::Season;

    use super::ContextAssembler;

    fn profile() -> TravelerProfile {
        TravelerProfile::default_for(TravelerId::new("trav-1"))
    }

    #[test]
    fn assembly_is_total_for_cold_start_profiles() {
        let context = ContextAssembler::assemble(
            &profile(),
            &RecommendationContext::new(Season::Spring),
        );

        assert_eq!(context.total_trips, 0);
        assert_eq!(context.average_budget, 2000.0);
        let rendered = context.system_context();
        assert!(rendered.contains("0 trips"));
        assert!(rendered.contains("spring"));
    }

    #[test]
    fn assembly_is_deterministic() {
        let situational = RecommendationContext::new(Season::Summer)
            .with_weather(json!({"condition": "sunny", "high_c": 29}))
            .with_user_mood("adventure");

        let first = ContextAssembler::assemble(&profile(), &situational);
        let second = ContextAssembler::assemble(&profile(), &situational);

        assert_eq!(first, second);
        assert_eq!(first.system_context(), second.system_context());
    }

    #[test]
    fn personality_directive_flows_into_the_system_context() {
        let mut p = profile();
        p.personality = Personality::Careful;

        let context =
            ContextAssembler::assemble(&p, &RecommendationContext::new(Season::Autumn));

        assert!(context.system_context().contains(Personality::Careful.directive()));
    }

    #[test]
    fn situational_fields_are_rendered_when_present() {
        let situational = RecommendationContext::new(Season::Winter)
            .with_weather(json!("light snow"))
            .with_user_mood("cozy")
            .with_group_dynamics("family of four");

        let rendered =
            ContextAssembler::assemble(&profile(), &situational).system_context();

        assert!(rendered.contains("light snow"));
        assert!(rendered.contains("cozy mood"));
        assert!(rendered.contains("family of four"));
    }
}
