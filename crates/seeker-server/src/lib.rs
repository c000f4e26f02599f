//! Seeker backend.
//!
//! Assembles the session and talent routes into one actix-web server.
//! Storage is PostgreSQL when `DB_URL` is set and the `database` feature
//! is on, in-memory otherwise.
mod config;

pub use config::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use seeker_auth::Crypto;
use seeker_auth::Issuer;
use seeker_auth::UserRepository;
use seeker_talent::TalentRepository;
use std::sync::Arc;

/// What `/health` checks.
pub enum Probe {
    Memory,
    #[cfg(feature = "database")]
    Postgres(Arc<tokio_postgres::Client>),
}

async fn health(probe: web::Data<Probe>) -> impl Responder {
    match probe.as_ref() {
        Probe::Memory => HttpResponse::Ok().body("ok"),
        #[cfg(feature = "database")]
        Probe::Postgres(client) => match client
            .execute("SELECT 1", &[])
            .await
            .inspect_err(|e| log::error!("health check failed: {}", e))
        {
            Ok(_) => HttpResponse::Ok().body("ok"),
            Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
        },
    }
}

/// Health check plus every `/auth` and `/talent` route.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .configure(seeker_auth::routes)
        .configure(seeker_talent::routes);
}

/// Repositories behind the handlers.
struct Storage {
    users: Arc<dyn UserRepository>,
    talents: Arc<dyn TalentRepository>,
    probe: Probe,
}

impl Storage {
    fn memory() -> Self {
        let users = Arc::new(seeker_auth::Memory::default());
        Self {
            talents: Arc::new(seeker_talent::Memory::new(users.clone())),
            users,
            probe: Probe::Memory,
        }
    }

    #[cfg(feature = "database")]
    async fn postgres(url: &str) -> Result<Self, std::io::Error> {
        let client = seeker_pg::db(url).await.map_err(std::io::Error::other)?;
        seeker_pg::migrate::<seeker_auth::Identity>(&client)
            .await
            .map_err(std::io::Error::other)?;
        seeker_pg::migrate::<seeker_auth::TalentProfile>(&client)
            .await
            .map_err(std::io::Error::other)?;
        Ok(Self {
            users: Arc::new(client.clone()),
            talents: Arc::new(client.clone()),
            probe: Probe::Postgres(client),
        })
    }

    #[cfg(feature = "database")]
    async fn open(config: &Config) -> Result<Self, std::io::Error> {
        match config.db_url.as_deref() {
            Some(url) => Self::postgres(url).await,
            None => Ok(Self::memory()),
        }
    }

    #[cfg(not(feature = "database"))]
    async fn open(config: &Config) -> Result<Self, std::io::Error> {
        if config.db_url.is_some() {
            log::warn!("DB_URL is set but database support is not compiled in");
        }
        Ok(Self::memory())
    }
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let config = Config::from_env()?;
    let storage = Storage::open(&config).await?;
    let crypto = Arc::new(Crypto::from_env());
    let issuer = web::Data::new(Issuer::new(crypto.clone()).secure(config.secure));
    let crypto = web::Data::from(crypto);
    let users = web::Data::from(storage.users);
    let talents = web::Data::from(storage.talents);
    let probe = web::Data::new(storage.probe);
    log::info!("starting seeker server on {}", config.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
            )
            .app_data(crypto.clone())
            .app_data(issuer.clone())
            .app_data(users.clone())
            .app_data(talents.clone())
            .app_data(probe.clone())
            .configure(routes)
    })
    .workers(6)
    .bind(config.bind.as_str())?
    .run()
    .await
}
