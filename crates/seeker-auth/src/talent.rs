use seeker_core::ID;
use seeker_core::Unique;

/// Public profile of a user who is looking for work.
/// Embedded in [`crate::Identity`] once the user attaches one.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentProfile {
    pub id: ID<TalentProfile>,
    pub category: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin_url: String,
    #[serde(default)]
    pub resume_url: String,
    #[serde(default)]
    pub photo: String,
}

impl Unique for TalentProfile {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
