use super::*;
use seeker_core::ID;
use seeker_core::Unique;

/// Snapshot of a user at the moment a session was minted.
///
/// Never mutated in place. Changing the user means building a new value
/// with [`Identity::verified`] or [`Identity::with_talent`] and issuing a
/// new session for it; in-flight requests keep the snapshot they decoded.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    id: ID<Self>,
    email: String,
    #[serde(default)]
    picture: String,
    email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    talent: Option<TalentProfile>,
}

impl Identity {
    pub fn new(id: ID<Self>, email: String, picture: String, email_verified: bool) -> Self {
        Self {
            id,
            email,
            picture,
            email_verified,
            talent: None,
        }
    }
    /// A freshly registered user: unverified, no profiles.
    pub fn register(email: String) -> Self {
        Self::new(ID::default(), email, String::new(), false)
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn picture(&self) -> &str {
        &self.picture
    }
    pub fn email_verified(&self) -> bool {
        self.email_verified
    }
    pub fn talent(&self) -> Option<&TalentProfile> {
        self.talent.as_ref()
    }
    pub fn verified(&self, email_verified: bool) -> Self {
        Self {
            email_verified,
            ..self.clone()
        }
    }
    pub fn with_talent(&self, talent: TalentProfile) -> Self {
        Self {
            talent: Some(talent),
            ..self.clone()
        }
    }
}

impl Unique for Identity {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
