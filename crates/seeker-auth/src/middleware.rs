use super::*;
use actix_web::FromRequest;
use actix_web::HttpMessage;
use actix_web::HttpRequest;
use actix_web::body::EitherBody;
use actix_web::body::MessageBody;
use actix_web::dev::Payload;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::middleware::Next;
use actix_web::web;

/// Request-scoped identity slot. Only [`guard`] writes it.
#[derive(Debug, Clone)]
struct Verified(Identity);

/// Checks a request's credential: both cookies present, then the access
/// token decoded against the codec. The refresh token is never decoded
/// here. Every failure collapses to `Unauthorized`.
pub fn verify(crypto: &Crypto, req: &HttpRequest) -> Result<Identity, AuthError> {
    let tokens = cookie::read(req).ok_or_else(|| {
        log::debug!("rejected {}: no credential", req.path());
        AuthError::Unauthorized
    })?;
    crypto
        .decode(tokens.access())
        .map(Claims::into_identity)
        .map_err(|e| {
            log::debug!("rejected {}: {}", req.path(), e);
            AuthError::Unauthorized
        })
}

/// Session guard middleware, mounted with `actix_web::middleware::from_fn`.
///
/// On success the decoded identity is stored in the request extensions
/// and the wrapped service runs; on failure the service never runs and the
/// client receives a bare 401.
pub async fn guard<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let verdict = match req.app_data::<web::Data<Crypto>>() {
        Some(crypto) => verify(crypto, req.request()),
        None => Err(AuthError::Issuance(String::from("token codec not configured"))),
    };
    match verdict {
        Ok(identity) => {
            req.extensions_mut().insert(Verified(identity));
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Err(e) => Ok(req.error_response(e).map_into_right_body()),
    }
}

/// Identity the guard verified for this request.
pub fn current(req: &HttpRequest) -> Result<Identity, AuthError> {
    req.extensions()
        .get::<Verified>()
        .map(|verified| verified.0.clone())
        .ok_or(AuthError::NotPresent)
}

/// Extractor for guarded handlers.
/// Fails with a server error if the route is not behind [`guard`].
pub struct Auth(pub Identity);

impl Auth {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for Auth {
    type Error = AuthError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(current(req).map(Auth))
    }
}
