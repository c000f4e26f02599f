//! Stateless sessions and identity propagation.
//!
//! A user's identity, embedded profiles included, is signed into an
//! access/refresh token pair and carried in two cookies. Nothing is stored
//! server-side: a protected request is trusted because its access token
//! verifies, and any change to the user aggregate is published by issuing
//! a new pair.
//!
//! ## Session Model
//!
//! - [`Identity`]: Immutable snapshot of a user at mint time
//! - [`TalentProfile`]: Embedded talent sub-aggregate
//! - [`Claims`]: Access token payload
//! - [`TokenPair`]: Access and refresh token, never apart
//! - [`Session`]: One issuance: pair plus payload
//!
//! ## Security
//!
//! - [`Crypto`]: JWT signing and verification
//! - [`Issuer`]: Mints sessions from identities
//! - [`password`]: Argon2 hashing and verification
//!
//! ## Transport
//!
//! - [`guard`]: Middleware that verifies cookies and stores the identity
//! - [`Auth`]: Extractor handing the verified identity to handlers
//! - [`cookie`]: Cookie names, attributes, and parsing
mod claims;
mod crypto;
mod dto;
mod error;
mod identity;
mod issuer;
mod memory;
pub mod password;
mod repository;
mod session;
mod talent;
mod tokens;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use error::*;
pub use identity::*;
pub use issuer::*;
pub use memory::*;
pub use repository::*;
pub use session::*;
pub use talent::*;
pub use tokens::*;

#[cfg(feature = "database")]
mod postgres;

#[cfg(feature = "server")]
pub mod cookie;
#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
