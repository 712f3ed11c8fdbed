//! wayfarer-engine - orchestration layer of the traveler personalization
//! engine.
//!
//! This crate wires the pure logic from `wayfarer-core` to the outside world:
//!
//! 1. **Profile flow** - fetch trips through a `TripRepository`, build the
//!    profile, and cache it (`cache`, `service`).
//! 2. **Context assembly** (`context`) - render the profile plus situational
//!    inputs into the system context every task shares.
//! 3. **Generative tasks** (`tasks`) - per-task instruction builders, schema
//!    parsers, and deterministic fallbacks.
//! 4. **Completion transport** (`completion`, `http`, `retry`) - the abstract
//!    client, its HTTP adapter, and bounded retry with backoff.
//!
//! # Safety Principle
//!
//! The completion backend is strictly advisory. Every public service method
//! is total: transport failures, timeouts, and malformed or schema-violating
//! responses are logged and replaced by the task's deterministic fallback, so
//! UI-facing callers never see an error state.

pub mod cache;
pub mod completion;
pub mod context;
pub mod http;
pub mod retry;
pub mod service;
pub mod tasks;

pub use cache::ProfileCache;
pub use completion::{CompletionClient, CompletionError, CompletionOptions};
pub use context::{ContextAssembler, PromptContext};
pub use http::HttpCompletionClient;
pub use retry::RetryPolicy;
pub use service::PersonalizationService;
pub use tasks::{
    HiddenGem, PackingItem, PackingList, TaskError, TravelRecommendations, TripDetails,
};
