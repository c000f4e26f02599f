use super::*;
use seeker_core::Unique;
use std::sync::Arc;

/// Mints sessions from identity snapshots.
///
/// Called on registration, login, renewal, and after every mutation of
/// the user aggregate. Performs no I/O; persistence happens in the
/// caller before or after.
pub struct Issuer {
    crypto: Arc<Crypto>,
    secure: bool,
}

impl Issuer {
    pub fn new(crypto: Arc<Crypto>) -> Self {
        Self {
            crypto,
            secure: false,
        }
    }
    /// Mark cookies for issued sessions `Secure`.
    pub fn secure(self, secure: bool) -> Self {
        Self { secure, ..self }
    }
    pub fn is_secure(&self) -> bool {
        self.secure
    }
    pub fn crypto(&self) -> &Crypto {
        &self.crypto
    }
    pub fn issue(&self, identity: Identity) -> Result<Session, AuthError> {
        self.issue_at(identity, seeker_core::now())
    }
    /// Issue against an explicit clock reading (unix seconds).
    pub fn issue_at(&self, identity: Identity, now: i64) -> Result<Session, AuthError> {
        let refresh = RefreshClaims::new(&identity, now);
        let claims = Claims::new(identity, now);
        let access = self.crypto.encode(&claims)?;
        let refresh = self.crypto.encode_refresh(&refresh)?;
        let tokens = TokenPair::new(access, refresh)
            .ok_or_else(|| AuthError::Issuance(String::from("empty token")))?;
        log::debug!("issued session for user {}", claims.identity().id());
        Ok(Session::new(tokens, claims))
    }
}
