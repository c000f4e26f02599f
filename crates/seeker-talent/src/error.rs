/// Errors raised by talent profile operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TalentError {
    /// Profile input failed validation.
    Invalid(String),
    /// The user already owns a talent profile.
    Exists,
    /// The talent repository failed.
    Storage(String),
}

impl std::fmt::Display for TalentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(s) => write!(f, "invalid profile: {}", s),
            Self::Exists => write!(f, "talent profile already exists"),
            Self::Storage(s) => write!(f, "storage failure: {}", s),
        }
    }
}

impl std::error::Error for TalentError {}

#[cfg(feature = "database")]
impl From<tokio_postgres::Error> for TalentError {
    fn from(e: tokio_postgres::Error) -> Self {
        match e.code() {
            Some(&tokio_postgres::error::SqlState::UNIQUE_VIOLATION) => Self::Exists,
            _ => Self::Storage(e.to_string()),
        }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    impl ResponseError for TalentError {
        fn status_code(&self) -> StatusCode {
            match self {
                Self::Invalid(_) => StatusCode::BAD_REQUEST,
                Self::Exists => StatusCode::CONFLICT,
                Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
        fn error_response(&self) -> HttpResponse {
            match self {
                Self::Storage(_) => {
                    log::error!("{}", self);
                    HttpResponse::InternalServerError().body("internal server error")
                }
                _ => HttpResponse::build(self.status_code()).body(self.to_string()),
            }
        }
    }
}
