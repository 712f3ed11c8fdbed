//! Smart budget allocation: category splits with reasoning, plus the fixed
//! percentage fallback.

use std::collections::BTreeMap;

use serde::Deserialize;

use wayfarer_core::budget::BudgetPlan;

use crate::context::PromptContext;

use super::{extract_json_object, TaskError, TripDetails};

#[derive(Debug, Deserialize)]
struct RawAllocation {
    percentage: f64,
    reasoning: String,
}

pub fn instruction(context: &PromptContext, trip: &TripDetails, total: f64) -> String {
    format!(
        "{}. Allocate a total budget of ${total:.0} across spending categories for this \
         traveler. Respond with a single JSON object mapping category names to \
         {{\"amount\": number, \"percentage\": number, \"reasoning\": \"...\"}}; \
         percentages must sum to 100. The traveler's historical average budget is ${:.0}.",
        trip.describe(),
        context.average_budget,
    )
}

/// Parse a completion reply into a `BudgetPlan`, re-deriving every amount
/// from its percentage so the plan obeys the percentage invariant whatever
/// arithmetic the model did.
pub fn parse(text: &str, total: f64) -> Result<BudgetPlan, TaskError> {
    let raw: BTreeMap<String, RawAllocation> =
        serde_json::from_str(extract_json_object(text)?)?;

    if raw.is_empty() {
        return Err(TaskError::Schema("allocation must contain at least one category".to_string()));
    }

    let mut percentage_sum = 0.0;
    for (category, allocation) in &raw {
        if !allocation.percentage.is_finite() || allocation.percentage < 0.0 {
            return Err(TaskError::Schema(format!(
                "category `{category}` has an invalid percentage"
            )));
        }
        percentage_sum += allocation.percentage;
    }

    if percentage_sum > 100.0 + 0.5 {
        return Err(TaskError::Schema(format!(
            "category percentages sum to {percentage_sum:.1}, exceeding 100"
        )));
    }

    Ok(BudgetPlan::from_percentages(
        total,
        raw.into_iter().map(|(category, allocation)| {
            (category, allocation.percentage, allocation.reasoning)
        }),
    ))
}

pub fn fallback(total: f64) -> BudgetPlan {
    BudgetPlan::fallback(total)
}
