use super::*;
use seeker_core::ID;

/// Persistence for the user aggregate.
///
/// Object safe so handlers can take `web::Data<dyn UserRepository>`
/// regardless of backing store. Every read returns the whole aggregate,
/// embedded profiles included, so sessions minted from it are complete.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn exists(&self, email: &str) -> Result<bool, AuthError>;
    async fn create(&self, identity: &Identity, hashword: &str) -> Result<(), AuthError>;
    /// User and password hash by email, for login.
    async fn lookup(&self, email: &str) -> Result<Option<(Identity, String)>, AuthError>;
    async fn find(&self, id: ID<Identity>) -> Result<Option<Identity>, AuthError>;
    /// Marks the email verified and returns the resulting flag.
    async fn verify(&self, email: &str) -> Result<bool, AuthError>;
}
