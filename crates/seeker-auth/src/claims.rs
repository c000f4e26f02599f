use super::*;
use seeker_core::ID;
use seeker_core::Unique;

/// Access token payload: the identity snapshot plus temporal claims.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub user: Identity,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: Identity, now: i64) -> Self {
        Self {
            user,
            iat: now,
            exp: now + seeker_core::ACCESS_TOKEN_DURATION.as_secs() as i64,
        }
    }
    pub fn identity(&self) -> &Identity {
        &self.user
    }
    pub fn into_identity(self) -> Identity {
        self.user
    }
}

/// Refresh token payload. Carries only the user id, so renewal always
/// reloads the user instead of trusting a stale snapshot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RefreshClaims {
    pub sub: uuid::Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl RefreshClaims {
    pub fn new(user: &Identity, now: i64) -> Self {
        Self {
            sub: user.id().inner(),
            iat: now,
            exp: now + seeker_core::REFRESH_TOKEN_DURATION.as_secs() as i64,
        }
    }
    pub fn user(&self) -> ID<Identity> {
        ID::from(self.sub)
    }
}
