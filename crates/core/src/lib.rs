//! wayfarer-core - domain model and deterministic logic for the traveler
//! personalization engine.
//!
//! This crate holds everything that needs no I/O:
//! - **Domain types** (`domain`) - trip records, the traveler profile, and the
//!   per-request recommendation context.
//! - **Profile builder** (`builder`) - pure aggregation of trip records into a
//!   `TravelerProfile`, including the cold-start defaults.
//! - **Budget model** (`budget`) - allocation plans with the percentage
//!   invariant and the deterministic fallback split.
//! - **Insights** (`insights`) - local heuristics over the profile's own
//!   history; never generative.
//! - **Config** (`config`) - layered configuration for embedders.
//!
//! # Key Principle
//!
//! Every public artifact here is total and deterministic: zero trip history
//! yields a complete default profile, and rebuilding from unchanged inputs
//! yields field-for-field equal output. Failure handling for the generative
//! path lives in `wayfarer-engine`, not here.

pub mod budget;
pub mod builder;
pub mod config;
pub mod domain;
pub mod insights;
pub mod season;

pub use budget::{BudgetPlan, CategoryAllocation};
pub use builder::build_profile;
pub use config::{AppConfig, CompletionConfig, CompletionProvider, ConfigError, LoadOptions};
pub use domain::context::RecommendationContext;
pub use domain::profile::{
    BehaviorPatterns, MoodSample, Personality, TravelHistory, TravelPreferences, TravelerProfile,
};
pub use domain::trip::{TravelerId, TripRecord};
pub use insights::TravelInsights;
pub use season::Season;
