use super::*;
use seeker_core::ID;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process talent store.
///
/// Shares the user store so that a later login or renewal reads the
/// aggregate with its profile attached.
pub struct Memory {
    users: Arc<seeker_auth::Memory>,
    profiles: RwLock<HashMap<ID<Identity>, TalentProfile>>,
}

impl Memory {
    pub fn new(users: Arc<seeker_auth::Memory>) -> Self {
        Self {
            users,
            profiles: RwLock::default(),
        }
    }
}

#[async_trait::async_trait]
impl TalentRepository for Memory {
    async fn create(&self, user: ID<Identity>, draft: Draft) -> Result<TalentProfile, TalentError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&user) {
            return Err(TalentError::Exists);
        }
        let profile = draft.into_profile();
        self.users
            .attach(user, profile.clone())
            .await
            .map_err(|e| TalentError::Storage(e.to_string()))?;
        profiles.insert(user, profile.clone());
        Ok(profile)
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<TalentProfile>, TalentError> {
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect())
    }
}
