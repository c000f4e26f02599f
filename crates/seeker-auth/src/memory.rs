use super::*;
use seeker_core::ID;
use seeker_core::Unique;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process user store, for tests and for running without a database.
#[derive(Default)]
pub struct Memory {
    users: RwLock<HashMap<ID<Identity>, (Identity, String)>>,
}

impl Memory {
    /// Replaces the stored aggregate's talent profile.
    pub async fn attach(&self, user: ID<Identity>, talent: TalentProfile) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        let (identity, _) = users
            .get_mut(&user)
            .ok_or_else(|| AuthError::Storage(format!("unknown user {}", user)))?;
        *identity = identity.with_talent(talent);
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserRepository for Memory {
    async fn exists(&self, email: &str) -> Result<bool, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|(identity, _)| identity.email() == email))
    }

    async fn create(&self, identity: &Identity, hashword: &str) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        if users.values().any(|(other, _)| other.email() == identity.email()) {
            return Err(AuthError::Conflict);
        }
        users.insert(identity.id(), (identity.clone(), hashword.to_string()));
        Ok(())
    }

    async fn lookup(&self, email: &str) -> Result<Option<(Identity, String)>, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|(identity, _)| identity.email() == email)
            .cloned())
    }

    async fn find(&self, id: ID<Identity>) -> Result<Option<Identity>, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .get(&id)
            .map(|(identity, _)| identity.clone()))
    }

    async fn verify(&self, email: &str) -> Result<bool, AuthError> {
        let mut users = self.users.write().await;
        let (identity, _) = users
            .values_mut()
            .find(|(identity, _)| identity.email() == email)
            .ok_or_else(|| AuthError::Verification(format!("unknown email {}", email)))?;
        *identity = identity.verified(true);
        Ok(identity.email_verified())
    }
}
