use super::*;
use seeker_core::ID;
use seeker_core::Unique;
use seeker_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Users joined with their optional talent profile. Column order is what
/// [`hydrate`] expects; `hashword` is always last.
const SELECT: &str = const_format::concatcp!(
    "SELECT u.id, u.email, u.picture, u.email_verified,
            p.id, p.category, p.first_name, p.last_name,
            p.phone, p.linkedin_url, p.resume_url, p.photo,
            u.hashword
     FROM ",
    USERS,
    " u LEFT JOIN ",
    TALENTS,
    " t ON t.user_id = u.id LEFT JOIN ",
    TALENT_PROFILES,
    " p ON p.talent_id = t.id"
);

fn hydrate(row: &Row) -> Identity {
    let identity = Identity::new(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        row.get::<_, bool>(3),
    );
    match row.get::<_, Option<uuid::Uuid>>(4) {
        None => identity,
        Some(id) => identity.with_talent(TalentProfile {
            id: ID::from(id),
            category: row.get(5),
            first_name: row.get(6),
            last_name: row.get(7),
            phone: row.get(8),
            linkedin_url: row.get(9),
            resume_url: row.get(10),
            photo: row.get(11),
        }),
    }
}

#[async_trait::async_trait]
impl UserRepository for Arc<Client> {
    async fn exists(&self, email: &str) -> Result<bool, AuthError> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT 1 FROM ", USERS, " WHERE email = $1"),
                &[&email],
            )
            .await?
            .is_some())
    }

    async fn create(&self, identity: &Identity, hashword: &str) -> Result<(), AuthError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, email, picture, email_verified, hashword) VALUES ($1, $2, $3, $4, $5)"
            ),
            &[
                &identity.id().inner(),
                &identity.email(),
                &identity.picture(),
                &identity.email_verified(),
                &hashword,
            ],
        )
        .await?;
        Ok(())
    }

    async fn lookup(&self, email: &str) -> Result<Option<(Identity, String)>, AuthError> {
        Ok(self
            .query_opt(const_format::concatcp!(SELECT, " WHERE u.email = $1"), &[&email])
            .await?
            .map(|row| (hydrate(&row), row.get::<_, String>(12))))
    }

    async fn find(&self, id: ID<Identity>) -> Result<Option<Identity>, AuthError> {
        Ok(self
            .query_opt(const_format::concatcp!(SELECT, " WHERE u.id = $1"), &[&id.inner()])
            .await?
            .map(|row| hydrate(&row)))
    }

    async fn verify(&self, email: &str) -> Result<bool, AuthError> {
        match self
            .execute(
                const_format::concatcp!("UPDATE ", USERS, " SET email_verified = TRUE WHERE email = $1"),
                &[&email],
            )
            .await?
        {
            0 => Err(AuthError::Verification(format!("unknown email {}", email))),
            _ => Ok(true),
        }
    }
}

impl Schema for Identity {
    fn name() -> &'static str {
        USERS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            USERS,
            " (
                id              UUID PRIMARY KEY,
                email           VARCHAR(255) UNIQUE NOT NULL,
                picture         TEXT NOT NULL DEFAULT '',
                email_verified  BOOLEAN NOT NULL DEFAULT FALSE,
                hashword        TEXT NOT NULL
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_users_email ON ",
            USERS,
            " (email);"
        )
    }
}

/// Creates both the `talents` link table and `talent_profiles`.
impl Schema for TalentProfile {
    fn name() -> &'static str {
        TALENT_PROFILES
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            TALENTS,
            " (
                id          UUID PRIMARY KEY,
                user_id     UUID UNIQUE NOT NULL REFERENCES ",
            USERS,
            "(id) ON DELETE CASCADE
            );
            CREATE TABLE IF NOT EXISTS ",
            TALENT_PROFILES,
            " (
                id            UUID PRIMARY KEY,
                talent_id     UUID UNIQUE NOT NULL REFERENCES ",
            TALENTS,
            "(id) ON DELETE CASCADE,
                category      VARCHAR(64) NOT NULL,
                first_name    VARCHAR(128) NOT NULL,
                last_name     VARCHAR(128) NOT NULL,
                phone         TEXT NOT NULL DEFAULT '',
                linkedin_url  TEXT NOT NULL DEFAULT '',
                resume_url    TEXT NOT NULL DEFAULT '',
                photo         TEXT NOT NULL DEFAULT ''
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_talent_profiles_category ON ",
            TALENT_PROFILES,
            " (category);"
        )
    }
}
