use super::*;
use seeker_core::ID;

/// Persistence for talent profiles.
#[async_trait::async_trait]
pub trait TalentRepository: Send + Sync {
    /// Attaches a new profile to `user`. A user owns at most one.
    async fn create(&self, user: ID<Identity>, draft: Draft) -> Result<TalentProfile, TalentError>;
    /// All profiles, optionally restricted to one category.
    async fn list(&self, category: Option<&str>) -> Result<Vec<TalentProfile>, TalentError>;
}
