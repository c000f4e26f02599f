use super::*;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        if !self.email.contains('@') {
            return Err(AuthError::Invalid(String::from("email must contain @")));
        }
        if self.password.is_empty() {
            return Err(AuthError::Invalid(String::from("password must not be empty")));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Query string for user lookup. `id` wins when both are given.
#[derive(Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
