/// Errors raised while issuing, transporting, or verifying sessions.
///
/// The codec-level variants (`MalformedToken`, `SignatureInvalid`,
/// `Expired`) exist for logging. They never reach a client: the guard
/// collapses them into `Unauthorized`, and their HTTP rendering is the
/// same opaque 401 anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential, or a credential that failed verification.
    Unauthorized,
    /// Token structure or claims could not be parsed.
    MalformedToken,
    /// Signature does not match the configured key and algorithm.
    SignatureInvalid,
    /// Token expiry has passed.
    Expired,
    /// Token could not be signed; a configuration problem.
    Issuance(String),
    /// A guarded handler ran without a verified identity in its request.
    NotPresent,
    /// Login with an unknown email or a wrong password.
    Credentials,
    /// Registration with an email that is already taken.
    Conflict,
    /// No user matches a lookup.
    Missing,
    /// Request input rejected before reaching any collaborator.
    Invalid(String),
    /// The email-verification collaborator refused.
    Verification(String),
    /// Password hashing failed.
    Hashing(String),
    /// The user repository failed.
    Storage(String),
}

impl AuthError {
    /// True for every variant that means "credential not accepted".
    pub fn is_credential(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::MalformedToken | Self::SignatureInvalid | Self::Expired
        )
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::MalformedToken => write!(f, "malformed token"),
            Self::SignatureInvalid => write!(f, "invalid token signature"),
            Self::Expired => write!(f, "token expired"),
            Self::Issuance(s) => write!(f, "failed to create session: {}", s),
            Self::NotPresent => write!(f, "no verified identity in request"),
            Self::Credentials => write!(f, "invalid credentials"),
            Self::Conflict => write!(f, "user already exists"),
            Self::Missing => write!(f, "user does not exist"),
            Self::Invalid(s) => write!(f, "invalid input: {}", s),
            Self::Verification(s) => write!(f, "failed to verify email: {}", s),
            Self::Hashing(s) => write!(f, "password hashing failed: {}", s),
            Self::Storage(s) => write!(f, "storage failure: {}", s),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(feature = "database")]
impl From<tokio_postgres::Error> for AuthError {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::from_sql(e.code(), e.to_string())
    }
}

impl AuthError {
    /// The only unique column a write can trip is `users.email`.
    #[cfg(feature = "database")]
    fn from_sql(code: Option<&tokio_postgres::error::SqlState>, message: String) -> Self {
        match code {
            Some(&tokio_postgres::error::SqlState::UNIQUE_VIOLATION) => Self::Conflict,
            _ => Self::Storage(message),
        }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    impl ResponseError for AuthError {
        fn status_code(&self) -> StatusCode {
            match self {
                e if e.is_credential() => StatusCode::UNAUTHORIZED,
                Self::Credentials => StatusCode::UNAUTHORIZED,
                Self::Conflict => StatusCode::CONFLICT,
                Self::Missing => StatusCode::NOT_FOUND,
                Self::Invalid(_) | Self::Verification(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
        fn error_response(&self) -> HttpResponse {
            let body = match self {
                e if e.is_credential() => AuthError::Unauthorized.to_string(),
                Self::Credentials
                | Self::Conflict
                | Self::Missing
                | Self::Invalid(_)
                | Self::Verification(_) => self.to_string(),
                _ => {
                    log::error!("{}", self);
                    String::from("internal server error")
                }
            };
            HttpResponse::build(self.status_code()).body(body)
        }
    }
}
