//! Talent profiles.
//!
//! Attaching a profile changes the user aggregate, so the handler here
//! persists it and then re-issues the caller's session with the profile
//! embedded in the new identity.
mod draft;
mod error;
mod memory;
mod repository;

pub use draft::*;
pub use error::*;
pub use memory::*;
pub use repository::*;

#[cfg(feature = "database")]
mod postgres;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;

use seeker_auth::Identity;
use seeker_auth::TalentProfile;
