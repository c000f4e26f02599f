//! PostgreSQL integration for seeker.
//!
//! ## Connectivity
//!
//! - [`db()`]: Establishes a database connection from a url
//! - [`migrate()`]: Creates every table and index that is missing
//!
//! ## Schema
//!
//! - [`Schema`]: Table metadata and DDL generation
//!
//! ## Table Names
//!
//! Constants for the persistent entities: users, talents, and talent profiles.
mod schema;

pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
/// The connection future is driven on the current tokio runtime.
pub async fn db(url: &str) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// Runs `CREATE ... IF NOT EXISTS` for a table and its indices.
pub async fn migrate<S: Schema>(client: &Client) -> Result<(), PgErr> {
    log::info!("migrating {}", S::name());
    client.batch_execute(S::creates()).await?;
    client.batch_execute(S::indices()).await?;
    Ok(())
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for registered users and their credentials.
#[rustfmt::skip]
pub const USERS:           &str = "users";
/// Table linking a user to their talent role.
#[rustfmt::skip]
pub const TALENTS:         &str = "talents";
/// Table for talent profile details.
#[rustfmt::skip]
pub const TALENT_PROFILES: &str = "talent_profiles";
