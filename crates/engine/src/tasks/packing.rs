//! Personalized packing list grouped by category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::context::PromptContext;

use super::{extract_json_object, TaskError, TripDetails};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackingItem {
    pub item: String,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackingList {
    pub categories: BTreeMap<String, Vec<PackingItem>>,
}

pub fn instruction(context: &PromptContext, trip: &TripDetails) -> String {
    let weather = context
        .weather_summary
        .as_deref()
        .map(|summary| format!(" Expected weather: {summary}."))
        .unwrap_or_default();

    format!(
        "{}.{weather} Produce a packing list for this traveler. Respond with a single \
         JSON object mapping category names (essentials, clothing, electronics, personal) \
         to arrays of {{\"item\": \"...\", \"reason\": \"...\"}}.",
        trip.describe(),
    )
}

pub fn parse(text: &str) -> Result<PackingList, TaskError> {
    let categories: BTreeMap<String, Vec<PackingItem>> =
        serde_json::from_str(extract_json_object(text)?)?;

    if categories.values().all(|items| items.is_empty()) {
        return Err(TaskError::Schema("packing list contains no items".to_string()));
    }

    Ok(PackingList { categories })
}

/// Four generic items covering the essential categories.
pub fn fallback() -> PackingList {
    let categories = BTreeMap::from([
        (
            "essentials".to_string(),
            vec![PackingItem {
                item: "Passport and travel documents".to_string(),
                reason: "Required for check-ins and border crossings.".to_string(),
            }],
        ),
        (
            "clothing".to_string(),
            vec![PackingItem {
                item: "Layered outfits for changeable weather".to_string(),
                reason: "Layers adapt to most climates without overpacking.".to_string(),
            }],
        ),
        (
            "electronics".to_string(),
            vec![PackingItem {
                item: "Universal power adapter".to_string(),
                reason: "Keeps phone and camera charged anywhere.".to_string(),
            }],
        ),
        (
            "personal".to_string(),
            vec![PackingItem {
                item: "Basic first-aid and medications".to_string(),
                reason: "Pharmacy access varies by destination.".to_string(),
            }],
        ),
    ]);

    PackingList { categories }
}

#[cfg(test)]
mod tests {
    use super::{fallback, parse};

    #[test]
    fn parses_a_categorized_list() {
        let text = r#"{
            "essentials": [{"item": "Passport", "reason": "Border control"}],
            "clothing": [{"item": "Rain jacket", "reason": "Wet season"}]
        }"#;

        let list = parse(text).expect("parse");
        assert_eq!(list.categories.len(), 2);
        assert_eq!(list.categories["clothing"][0].item, "Rain jacket");
    }

    #[test]
    fn rejects_an_effectively_empty_list() {
        assert!(parse(r#"{"essentials": []}"#).is_err());
        assert!(parse("garbage").is_err());
    }

    #[test]
    fn fallback_covers_all_four_categories() {
        let list = fallback();
        let item_count: usize = list.categories.values().map(Vec::len).sum();

        assert_eq!(item_count, 4);
        for category in ["essentials", "clothing", "electronics", "personal"] {
            assert!(list.categories.contains_key(category));
        }
    }
}
