//! Personalized recommendations: hidden gems, budget tips, timing advice.

use serde::{Deserialize, Serialize};

use crate::context::PromptContext;

use super::{extract_json_object, TaskError, TripDetails};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HiddenGem {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelRecommendations {
    pub hidden_gems: Vec<HiddenGem>,
    pub budget_tips: Vec<String>,
    pub timing_advice: String,
}

pub fn instruction(context: &PromptContext, trip: &TripDetails) -> String {
    format!(
        "{}. Recommend hidden gems, budget tips, and timing advice tailored to this \
         traveler. Respond with a single JSON object shaped as \
         {{\"hiddenGems\": [{{\"name\": \"...\", \"description\": \"...\"}}], \
         \"budgetTips\": [\"...\"], \"timingAdvice\": \"...\"}}. \
         Keep tips concrete and grounded in the ${:.0} average budget.",
        trip.describe(),
        context.average_budget,
    )
}

pub fn parse(text: &str) -> Result<TravelRecommendations, TaskError> {
    let recommendations: TravelRecommendations =
        serde_json::from_str(extract_json_object(text)?)?;

    if recommendations.timing_advice.trim().is_empty() {
        return Err(TaskError::Schema("timingAdvice must not be empty".to_string()));
    }

    Ok(recommendations)
}

/// Static starter advice served whenever the generative call fails.
pub fn fallback() -> TravelRecommendations {
    TravelRecommendations {
        hidden_gems: Vec::new(),
        budget_tips: vec![
            "Book accommodation a few months ahead to lock in better rates.".to_string(),
            "Eat where locals eat; lunch menus are usually the best value.".to_string(),
        ],
        timing_advice: "Shoulder season (spring or early autumn) usually offers the best \
                        mix of weather, prices, and smaller crowds."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{fallback, parse};

    #[test]
    fn parses_a_fenced_response() {
        let text = r#"Sure! ```json
{"hiddenGems": [{"name": "LX Factory", "description": "Creative hub under the bridge"}],
 "budgetTips": ["Ride the tram with a day pass"],
 "timingAdvice": "Go in May before the summer crowds"}
```"#;

        let recommendations = parse(text).expect("parse");
        assert_eq!(recommendations.hidden_gems.len(), 1);
        assert_eq!(recommendations.budget_tips.len(), 1);
        assert!(recommendations.timing_advice.contains("May"));
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(parse(r#"{"gems": []}"#).is_err());
        assert!(parse("not json at all").is_err());
    }

    #[test]
    fn fallback_is_fully_shaped() {
        let recommendations = fallback();
        assert_eq!(recommendations.budget_tips.len(), 2);
        assert!(!recommendations.timing_advice.is_empty());
    }
}
