use super::*;
use seeker_core::ID;
use seeker_core::Unique;
use seeker_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

const SELECT: &str = const_format::concatcp!(
    "SELECT id, category, first_name, last_name, phone, linkedin_url, resume_url, photo FROM ",
    TALENT_PROFILES
);

fn hydrate(row: &Row) -> TalentProfile {
    TalentProfile {
        id: ID::from(row.get::<_, uuid::Uuid>(0)),
        category: row.get(1),
        first_name: row.get(2),
        last_name: row.get(3),
        phone: row.get(4),
        linkedin_url: row.get(5),
        resume_url: row.get(6),
        photo: row.get(7),
    }
}

#[async_trait::async_trait]
impl TalentRepository for Arc<Client> {
    /// Link row and profile row go in one statement; a second profile for
    /// the same user trips the unique `user_id` and maps to `Exists`.
    async fn create(&self, user: ID<Identity>, draft: Draft) -> Result<TalentProfile, TalentError> {
        let profile = draft.into_profile();
        self.execute(
            const_format::concatcp!(
                "WITH link AS (INSERT INTO ",
                TALENTS,
                " (id, user_id) VALUES ($1, $2) RETURNING id) INSERT INTO ",
                TALENT_PROFILES,
                " (id, talent_id, category, first_name, last_name, phone, linkedin_url, resume_url, photo)
                 SELECT $3, link.id, $4, $5, $6, $7, $8, $9, $10 FROM link"
            ),
            &[
                &uuid::Uuid::now_v7(),
                &user.inner(),
                &profile.id().inner(),
                &profile.category,
                &profile.first_name,
                &profile.last_name,
                &profile.phone,
                &profile.linkedin_url,
                &profile.resume_url,
                &profile.photo,
            ],
        )
        .await?;
        Ok(profile)
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<TalentProfile>, TalentError> {
        let rows = match category {
            Some(category) => {
                self.query(const_format::concatcp!(SELECT, " WHERE category = $1"), &[&category])
                    .await?
            }
            None => self.query(SELECT, &[]).await?,
        };
        Ok(rows.iter().map(hydrate).collect())
    }
}
