pub mod context;
pub mod profile;
pub mod trip;

pub use context::RecommendationContext;
pub use profile::{
    BehaviorPatterns, MoodSample, Personality, PlanningStyle, RiskTolerance, SocialPreference,
    TravelHistory, TravelPreferences, TravelerProfile,
};
pub use trip::{TravelerId, TripRecord};
