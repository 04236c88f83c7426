//! Last-known-good snapshot per cached resource type.
//!
//! Overwritten on every successful fetch, read when a fetch fails. No TTL,
//! no eviction, not persisted; lives as long as the process.

use std::sync::{PoisonError, RwLock};

use crate::modules::portfolio::domain::entities::{
    PersonalInfo, Project, SocialLink, Testimonial,
};

#[derive(Debug, Default)]
pub struct FallbackCache {
    projects: RwLock<Vec<Project>>,
    testimonials: RwLock<Vec<Testimonial>>,
    social_links: RwLock<Vec<SocialLink>>,
    personal_info: RwLock<Option<PersonalInfo>>,
}

/// A payload type with its own slot in [`FallbackCache`].
///
/// The slot's initial value (empty list / `None`) is what callers get back
/// before the first successful fetch.
pub trait CachedResource: Clone + Send + Sync + 'static {
    fn slot(cache: &FallbackCache) -> &RwLock<Self>;
}

impl CachedResource for Vec<Project> {
    fn slot(cache: &FallbackCache) -> &RwLock<Self> {
        &cache.projects
    }
}

impl CachedResource for Vec<Testimonial> {
    fn slot(cache: &FallbackCache) -> &RwLock<Self> {
        &cache.testimonials
    }
}

impl CachedResource for Vec<SocialLink> {
    fn slot(cache: &FallbackCache) -> &RwLock<Self> {
        &cache.social_links
    }
}

impl CachedResource for Option<PersonalInfo> {
    fn slot(cache: &FallbackCache) -> &RwLock<Self> {
        &cache.personal_info
    }
}

impl FallbackCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<R: CachedResource>(&self) -> R {
        R::slot(self)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn put<R: CachedResource>(&self, data: R) {
        *R::slot(self)
            .write()
            .unwrap_or_else(PoisonError::into_inner) = data;
    }
}
