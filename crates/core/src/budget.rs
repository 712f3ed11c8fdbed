//! Budget allocation model shared by the generative budget task and its
//! deterministic fallback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that allocations sum to the total.
pub const ALLOCATION_TOLERANCE: f64 = 0.01;

/// One spending category within a budget plan. The amount is always derived
/// from the percentage so rescaling keeps percentages invariant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub amount: f64,
    pub percentage: f64,
    pub reasoning: String,
}

/// A full budget plan: category name to allocation, plus the total it was
/// allocated against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub total: f64,
    pub categories: BTreeMap<String, CategoryAllocation>,
}

impl BudgetPlan {
    /// Build a plan from percentage splits, deriving every amount as
    /// `percentage / 100 * total`. Negative inputs are clamped to zero.
    pub fn from_percentages(
        total: f64,
        splits: impl IntoIterator<Item = (String, f64, String)>,
    ) -> Self {
        let total = total.max(0.0);
        let categories = splits
            .into_iter()
            .map(|(name, percentage, reasoning)| {
                let percentage = percentage.max(0.0);
                let allocation = CategoryAllocation {
                    amount: percentage / 100.0 * total,
                    percentage,
                    reasoning,
                };
                (name, allocation)
            })
            .collect();

        Self { total, categories }
    }

    /// Fixed 40/30/20/10 split used when the generative call fails.
    pub fn fallback(total: f64) -> Self {
        Self::from_percentages(
            total,
            [
                (
                    "accommodation".to_string(),
                    40.0,
                    "Lodging is typically the largest fixed cost of a trip.".to_string(),
                ),
                (
                    "food".to_string(),
                    30.0,
                    "Covers everyday meals with room for a few special dinners.".to_string(),
                ),
                (
                    "activities".to_string(),
                    20.0,
                    "Tours, tickets, and experiences at the destination.".to_string(),
                ),
                (
                    "transport".to_string(),
                    10.0,
                    "Local transit and transfers once you arrive.".to_string(),
                ),
            ],
        )
    }

    /// Re-derive every amount against a new total. Percentages are invariant
    /// under rescaling and amounts never go negative.
    pub fn rescale(&mut self, new_total: f64) {
        let new_total = new_total.max(0.0);
        for allocation in self.categories.values_mut() {
            allocation.amount = (allocation.percentage / 100.0 * new_total).max(0.0);
        }
        self.total = new_total;
    }

    /// Sum of all category amounts.
    pub fn allocated_total(&self) -> f64 {
        self.categories.values().map(|allocation| allocation.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{BudgetPlan, ALLOCATION_TOLERANCE};

    #[test]
    fn fallback_split_for_two_thousand_matches_fixed_percentages() {
        let plan = BudgetPlan::fallback(2000.0);

        assert_eq!(plan.categories["accommodation"].amount, 800.0);
        assert_eq!(plan.categories["food"].amount, 600.0);
        assert_eq!(plan.categories["activities"].amount, 400.0);
        assert_eq!(plan.categories["transport"].amount, 200.0);
        assert!((plan.allocated_total() - plan.total).abs() < ALLOCATION_TOLERANCE);
    }

    #[test]
    fn rescale_doubles_amounts_and_keeps_percentages() {
        let mut plan = BudgetPlan::fallback(1000.0);
        let before: Vec<f64> = plan.categories.values().map(|a| a.percentage).collect();

        plan.rescale(2000.0);

        let after: Vec<f64> = plan.categories.values().map(|a| a.percentage).collect();
        assert_eq!(before, after);
        assert_eq!(plan.categories["accommodation"].amount, 800.0);
        assert_eq!(plan.categories["food"].amount, 600.0);
        assert_eq!(plan.categories["activities"].amount, 400.0);
        assert_eq!(plan.categories["transport"].amount, 200.0);
        assert!((plan.allocated_total() - 2000.0).abs() < ALLOCATION_TOLERANCE);
    }

    #[test]
    fn rescale_to_negative_total_clamps_to_zero() {
        let mut plan = BudgetPlan::fallback(1000.0);

        plan.rescale(-500.0);

        assert_eq!(plan.total, 0.0);
        assert!(plan.categories.values().all(|a| a.amount == 0.0));
    }

    #[test]
    fn from_percentages_clamps_negative_inputs() {
        let plan = BudgetPlan::from_percentages(
            1000.0,
            [("misc".to_string(), -10.0, "bad input".to_string())],
        );

        assert_eq!(plan.categories["misc"].percentage, 0.0);
        assert_eq!(plan.categories["misc"].amount, 0.0);
    }
}
