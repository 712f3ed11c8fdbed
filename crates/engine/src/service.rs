//! The personalization service: profile lifecycle plus the five generator
//! entry points. All dependencies are injected at construction; there is no
//! global state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use wayfarer_core::budget::BudgetPlan;
use wayfarer_core::builder::{build_profile, MAX_FAVORITE_MOODS};
use wayfarer_core::domain::context::RecommendationContext;
use wayfarer_core::domain::profile::{Personality, TravelerProfile};
use wayfarer_core::domain::trip::TravelerId;
use wayfarer_core::insights::{self, TravelInsights};
use wayfarer_core::season::Season;

use wayfarer_db::repositories::TripRepository;

use crate::cache::ProfileCache;
use crate::completion::{CompletionClient, CompletionOptions};
use crate::context::{ContextAssembler, PromptContext};
use crate::retry::RetryPolicy;
use crate::tasks::{self, PackingList, TaskError, TravelRecommendations, TripDetails};

pub struct PersonalizationService {
    trips: Arc<dyn TripRepository>,
    completion: Arc<dyn CompletionClient>,
    cache: ProfileCache,
    retry: RetryPolicy,
    options: CompletionOptions,
}

impl PersonalizationService {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        completion: Arc<dyn CompletionClient>,
        cache: ProfileCache,
    ) -> Self {
        Self {
            trips,
            completion,
            cache,
            retry: RetryPolicy::default(),
            options: CompletionOptions::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_completion_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    /// Cached profile, built on first request. Never fails: if the trip store
    /// is unreachable the fully-default profile is cached and returned.
    pub async fn profile(&self, traveler: &TravelerId) -> Arc<TravelerProfile> {
        if let Some(profile) = self.cache.get(traveler).await {
            debug!(
                event_name = "engine.profile.cache_hit",
                traveler_id = %traveler,
                "profile served from cache"
            );
            return profile;
        }

        self.build_and_cache(traveler).await
    }

    /// Explicit rebuild from the trip store, replacing any cached entry.
    pub async fn rebuild_profile(&self, traveler: &TravelerId) -> Arc<TravelerProfile> {
        self.build_and_cache(traveler).await
    }

    async fn build_and_cache(&self, traveler: &TravelerId) -> Arc<TravelerProfile> {
        let profile = match self.retry.run(|| self.trips.list_for_traveler(traveler)).await {
            Ok(records) => {
                debug!(
                    event_name = "engine.profile.built",
                    traveler_id = %traveler,
                    total_trips = records.len(),
                    "profile built from trip records"
                );
                build_profile(traveler, &records)
            }
            Err(error) => {
                warn!(
                    event_name = "engine.profile.store_unavailable",
                    traveler_id = %traveler,
                    error = %error,
                    "trip store unreachable; serving default profile"
                );
                TravelerProfile::default_for(traveler.clone())
            }
        };

        self.cache.put(profile).await
    }

    /// Set the traveler's personality, preserving it through the cache.
    pub async fn set_personality(
        &self,
        traveler: &TravelerId,
        personality: Personality,
    ) -> Arc<TravelerProfile> {
        // Make sure an entry exists before the copy-on-write update.
        self.profile(traveler).await;
        match self.cache.update(traveler, |profile| profile.personality = personality).await {
            Some(updated) => updated,
            None => self.profile(traveler).await,
        }
    }

    /// Incremental profile update: append a newly observed mood to the
    /// favorites, deduplicated and capped like the builder's own scan.
    pub async fn observe_mood(&self, traveler: &TravelerId, mood: &str) {
        let mood = mood.trim().to_ascii_lowercase();
        if mood.is_empty() {
            return;
        }

        self.profile(traveler).await;
        self.cache
            .update(traveler, |profile| {
                let moods = &mut profile.preferences.favorite_moods;
                let seen = moods.iter().any(|m| m.eq_ignore_ascii_case(&mood));
                if !seen && moods.len() < MAX_FAVORITE_MOODS {
                    moods.push(mood.clone());
                }
            })
            .await;
    }

    /// Personalized recommendations for a planned trip. Total: a failed or
    /// malformed completion degrades to the static starter advice.
    pub async fn recommendations(
        &self,
        traveler: &TravelerId,
        trip: &TripDetails,
        situational: Option<&RecommendationContext>,
    ) -> TravelRecommendations {
        let context = self.assemble(traveler, situational).await;
        let instruction = tasks::recommendations::instruction(&context, trip);
        let correlation_id = Uuid::new_v4();

        match self
            .complete_task("recommendations", traveler, &context, &instruction, correlation_id)
            .await
        {
            Ok(text) => match tasks::recommendations::parse(&text) {
                Ok(result) => {
                    self.note_interaction_mood(traveler, situational).await;
                    result
                }
                Err(error) => {
                    let fallback = tasks::recommendations::fallback();
                    self.fall_back("recommendations", traveler, correlation_id, error, fallback)
                }
            },
            Err(error) => {
                let fallback = tasks::recommendations::fallback();
                self.fall_back("recommendations", traveler, correlation_id, error, fallback)
            }
        }
    }

    /// Budget allocation for a total spend. Amounts always obey the
    /// percentage invariant, whether generated or fallen back.
    pub async fn budget_allocation(
        &self,
        traveler: &TravelerId,
        trip: &TripDetails,
        total_budget: f64,
        situational: Option<&RecommendationContext>,
    ) -> BudgetPlan {
        let context = self.assemble(traveler, situational).await;
        let instruction = tasks::budget::instruction(&context, trip, total_budget);
        let correlation_id = Uuid::new_v4();

        match self.complete_task("budget", traveler, &context, &instruction, correlation_id).await {
            Ok(text) => match tasks::budget::parse(&text, total_budget) {
                Ok(plan) => {
                    self.note_interaction_mood(traveler, situational).await;
                    plan
                }
                Err(error) => {
                    let fallback = tasks::budget::fallback(total_budget);
                    self.fall_back("budget", traveler, correlation_id, error, fallback)
                }
            },
            Err(error) => {
                let fallback = tasks::budget::fallback(total_budget);
                self.fall_back("budget", traveler, correlation_id, error, fallback)
            }
        }
    }

    /// Packing list for a planned trip.
    pub async fn packing_list(
        &self,
        traveler: &TravelerId,
        trip: &TripDetails,
        situational: Option<&RecommendationContext>,
    ) -> PackingList {
        let context = self.assemble(traveler, situational).await;
        let instruction = tasks::packing::instruction(&context, trip);
        let correlation_id = Uuid::new_v4();

        match self.complete_task("packing", traveler, &context, &instruction, correlation_id).await {
            Ok(text) => match tasks::packing::parse(&text) {
                Ok(list) => {
                    self.note_interaction_mood(traveler, situational).await;
                    list
                }
                Err(error) => {
                    let fallback = tasks::packing::fallback();
                    self.fall_back("packing", traveler, correlation_id, error, fallback)
                }
            },
            Err(error) => {
                let fallback = tasks::packing::fallback();
                self.fall_back("packing", traveler, correlation_id, error, fallback)
            }
        }
    }

    /// Conversational reply. Anonymous callers get a cold-start context and
    /// the sign-in variant of the canned apology on failure.
    pub async fn chat_reply(
        &self,
        traveler: Option<&TravelerId>,
        message: &str,
        situational: Option<&RecommendationContext>,
    ) -> String {
        let signed_in = traveler.is_some();
        let context = match traveler {
            Some(traveler) => self.assemble(traveler, situational).await,
            None => {
                let anonymous = TravelerProfile::default_for(TravelerId::new("anonymous"));
                ContextAssembler::assemble(&anonymous, &self.situational_or_now(situational))
            }
        };
        let instruction = tasks::chat::instruction(&context, message);
        let correlation_id = Uuid::new_v4();

        let anonymous_id = TravelerId::new("anonymous");
        let subject = traveler.unwrap_or(&anonymous_id);
        match self.complete_task("chat", subject, &context, &instruction, correlation_id).await {
            Ok(text) => match tasks::chat::parse(&text) {
                Ok(reply) => {
                    if let Some(traveler) = traveler {
                        self.note_interaction_mood(traveler, situational).await;
                    }
                    reply
                }
                Err(error) => {
                    let fallback = tasks::chat::fallback(signed_in);
                    self.fall_back("chat", subject, correlation_id, error, fallback)
                }
            },
            Err(error) => {
                let fallback = tasks::chat::fallback(signed_in);
                self.fall_back("chat", subject, correlation_id, error, fallback)
            }
        }
    }

    /// Predictive insights computed locally from the cached profile's own
    /// history. Never touches the completion client.
    pub async fn predictive_insights(&self, traveler: &TravelerId) -> TravelInsights {
        let profile = self.profile(traveler).await;
        insights::derive(&profile, Season::current(Utc::now()))
    }

    async fn assemble(
        &self,
        traveler: &TravelerId,
        situational: Option<&RecommendationContext>,
    ) -> PromptContext {
        let profile = self.profile(traveler).await;
        ContextAssembler::assemble(&profile, &self.situational_or_now(situational))
    }

    fn situational_or_now(
        &self,
        situational: Option<&RecommendationContext>,
    ) -> RecommendationContext {
        situational
            .cloned()
            .unwrap_or_else(|| RecommendationContext::new(Season::current(Utc::now())))
    }

    async fn complete_task(
        &self,
        task: &str,
        traveler: &TravelerId,
        context: &PromptContext,
        instruction: &str,
        correlation_id: Uuid,
    ) -> Result<String, TaskError> {
        let system_context = context.system_context();
        debug!(
            event_name = "engine.task.start",
            task,
            traveler_id = %traveler,
            correlation_id = %correlation_id,
            "dispatching completion call"
        );

        self.retry
            .run(|| self.completion.complete(&system_context, instruction, &self.options))
            .await
            .map_err(TaskError::from)
    }

    fn fall_back<T>(
        &self,
        task: &str,
        traveler: &TravelerId,
        correlation_id: Uuid,
        error: TaskError,
        fallback: T,
    ) -> T {
        warn!(
            event_name = "engine.task.fallback",
            task,
            traveler_id = %traveler,
            correlation_id = %correlation_id,
            error = %error,
            "generative task degraded to deterministic fallback"
        );
        fallback
    }

    /// Post-success incremental update: a mood carried by the situational
    /// context is folded into the profile's favorites.
    async fn note_interaction_mood(
        &self,
        traveler: &TravelerId,
        situational: Option<&RecommendationContext>,
    ) {
        if let Some(mood) = situational.and_then(|s| s.user_mood.as_deref()) {
            self.observe_mood(traveler, mood).await;
        }
    }
}
