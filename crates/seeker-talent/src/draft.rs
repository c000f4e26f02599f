use super::*;
use seeker_core::ID;
use serde::Deserialize;

/// Input for attaching a talent profile to the calling user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
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

impl Draft {
    pub fn validate(&self) -> Result<(), TalentError> {
        for (field, value) in [
            ("category", &self.category),
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
        ] {
            if value.trim().is_empty() {
                return Err(TalentError::Invalid(format!("{} is required", field)));
            }
        }
        Ok(())
    }
    /// Assigns a fresh id.
    pub fn into_profile(self) -> TalentProfile {
        TalentProfile {
            id: ID::default(),
            category: self.category,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            linkedin_url: self.linkedin_url,
            resume_url: self.resume_url,
            photo: self.photo,
        }
    }
}

/// Query string for listing profiles.
#[derive(Debug, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub category: Option<String>,
}
