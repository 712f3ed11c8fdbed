//! Task generators: per-task instruction builders, schema parsers, and
//! deterministic fallbacks.
//!
//! Every task follows the same contract: build an instruction from the shared
//! `PromptContext`, call the completion client, and parse the reply into a
//! fixed schema. Any failure along that path - transport, status, timeout,
//! JSON, or schema - is absorbed at the service boundary and replaced by the
//! task's fallback value, which is always a complete, valid artifact.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::completion::CompletionError;

pub mod budget;
pub mod chat;
pub mod packing;
pub mod recommendations;

pub use packing::{PackingItem, PackingList};
pub use recommendations::{HiddenGem, TravelRecommendations};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("completion response was not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("completion response violated the expected schema: {0}")]
    Schema(String),
}

/// The trip a caller is asking about. Carried alongside the profile-derived
/// context so instructions can reference concrete plans.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travelers: u32,
}

impl TripDetails {
    pub fn new(destination: impl Into<String>) -> Self {
        Self { destination: destination.into(), start_date: None, end_date: None, travelers: 1 }
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_travelers(mut self, travelers: u32) -> Self {
        self.travelers = travelers;
        self
    }

    pub(crate) fn describe(&self) -> String {
        let mut parts = vec![format!("Trip to {}", self.destination)];
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            parts.push(format!("from {start} to {end}"));
        }
        parts.push(format!(
            "for {} traveler{}",
            self.travelers,
            if self.travelers == 1 { "" } else { "s" },
        ));
        parts.join(" ")
    }
}

/// Completion replies often arrive wrapped in prose or a code fence; slice
/// out the outermost JSON object before handing it to serde.
pub fn extract_json_object(text: &str) -> Result<&str, TaskError> {
    let start = text
        .find('{')
        .ok_or_else(|| TaskError::Schema("no JSON object found in response".to_string()))?;
    let end = text
        .rfind('}')
        .ok_or_else(|| TaskError::Schema("no JSON object found in response".to_string()))?;

    if end < start {
        return Err(TaskError::Schema("no JSON object found in response".to_string()));
    }

    Ok(&text[start..=end])
}
