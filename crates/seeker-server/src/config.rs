/// Process configuration, read once at startup.
///
/// Signing secrets are not held here; [`seeker_auth::Crypto::from_env`]
/// reads `JWT_SECRET` and `JWT_REFRESH_SECRET` directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    pub db_url: Option<String>,
    pub secure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, std::io::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
    pub fn from_lookup<F>(lookup: F) -> Result<Self, std::io::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup("BIND_ADDR")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| std::io::Error::other("BIND_ADDR must be set"))?;
        let db_url = lookup("DB_URL").filter(|s| !s.is_empty());
        let secure = lookup("COOKIE_SECURE")
            .map(|s| matches!(s.trim(), "true" | "1"))
            .unwrap_or(false);
        Ok(Self {
            bind,
            db_url,
            secure,
        })
    }
}
