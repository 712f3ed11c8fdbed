//! Process-wide profile cache, injected into the service at construction.
//!
//! Entries are `Arc`-wrapped so a profile handed to a caller stays immutable;
//! updates clone, mutate the clone, and swap the map entry. Concurrent
//! `get_or_build` races may build twice - last write wins, which is fine
//! because builds are idempotent.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use wayfarer_core::domain::profile::TravelerProfile;
use wayfarer_core::domain::trip::TravelerId;

#[derive(Clone, Default)]
pub struct ProfileCache {
    inner: Arc<RwLock<HashMap<TravelerId, Arc<TravelerProfile>>>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, traveler: &TravelerId) -> Option<Arc<TravelerProfile>> {
        let profiles = self.inner.read().await;
        profiles.get(traveler).cloned()
    }

    pub async fn put(&self, profile: TravelerProfile) -> Arc<TravelerProfile> {
        let shared = Arc::new(profile);
        let mut profiles = self.inner.write().await;
        profiles.insert(shared.id.clone(), Arc::clone(&shared));
        shared
    }

    /// Copy-on-write update: clone the cached profile, apply `f`, and swap
    /// the entry. Returns the new copy, or `None` when nothing was cached.
    pub async fn update<F>(&self, traveler: &TravelerId, f: F) -> Option<Arc<TravelerProfile>>
    where
        F: FnOnce(&mut TravelerProfile),
    {
        let mut profiles = self.inner.write().await;
        let current = profiles.get(traveler)?;
        let mut updated = TravelerProfile::clone(current);
        f(&mut updated);
        let shared = Arc::new(updated);
        profiles.insert(traveler.clone(), Arc::clone(&shared));
        Some(shared)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use wayfarer_core::domain::profile::{Personality, TravelerProfile};
    use wayfarer_core::domain::trip::TravelerId;

    use super::ProfileCache;

    #[tokio::test]
    async fn put_then_get_returns_the_same_profile() {
        let cache = ProfileCache::new();
        let traveler = TravelerId::new("trav-1");

        let stored = cache.put(TravelerProfile::default_for(traveler.clone())).await;
        let fetched = cache.get(&traveler).await.expect("cached profile");

        assert!(std::sync::Arc::ptr_eq(&stored, &fetched));
    }

    #[tokio::test]
    async fn update_swaps_a_fresh_copy_without_touching_the_old_arc() {
        let cache = ProfileCache::new();
        let traveler = TravelerId::new("trav-1");
        let original = cache.put(TravelerProfile::default_for(traveler.clone())).await;

        let updated = cache
            .update(&traveler, |profile| profile.personality = Personality::Adventurous)
            .await
            .expect("profile was cached");

        assert_eq!(original.personality, Personality::Balanced);
        assert_eq!(updated.personality, Personality::Adventurous);
        let fetched = cache.get(&traveler).await.expect("cached profile");
        assert_eq!(fetched.personality, Personality::Adventurous);
    }

    #[tokio::test]
    async fn update_of_missing_entry_is_a_no_op() {
        let cache = ProfileCache::new();

        let result = cache
            .update(&TravelerId::new("nobody"), |profile| {
                profile.personality = Personality::Careful
            })
            .await;

        assert!(result.is_none());
        assert!(cache.is_empty().await);
    }
}
