use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::middleware::from_fn;
use actix_web::web;
use seeker_core::ID;
use seeker_core::Unique;

/// Mounts the `/auth` scope and the guarded `/user` lookup.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .route("/logout", web::post().to(logout))
            .service(
                web::resource("/verify-email")
                    .wrap(from_fn(guard))
                    .route(web::get().to(verify_email)),
            )
            .service(
                web::resource("/me")
                    .wrap(from_fn(guard))
                    .route(web::get().to(me)),
            ),
    )
    .service(
        web::resource("/user")
            .wrap(from_fn(guard))
            .route(web::get().to(find_user)),
    );
}

pub async fn register(
    users: web::Data<dyn UserRepository>,
    issuer: web::Data<Issuer>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let req = req.into_inner();
    req.validate()?;
    if users.exists(&req.email).await? {
        return Err(AuthError::Conflict.into());
    }
    let hashword = password::hash(&req.password)?;
    let identity = Identity::register(req.email);
    users.create(&identity, &hashword).await?;
    let session = issuer.issue(identity)?;
    log::info!("registered user {}", session.identity().id());
    Ok(session
        .respond(HttpResponse::Created(), issuer.is_secure())
        .json(session.claims()))
}

pub async fn login(
    users: web::Data<dyn UserRepository>,
    issuer: web::Data<Issuer>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let (identity, hashword) = users
        .lookup(&req.email)
        .await?
        .ok_or(AuthError::Credentials)?;
    if !password::verify(&req.password, &hashword) {
        return Err(AuthError::Credentials.into());
    }
    let session = issuer.issue(identity)?;
    Ok(session.respond(HttpResponse::Ok(), issuer.is_secure()).json(session.claims()))
}

/// Marks the caller's email verified and re-issues their session so the
/// next request carries the new flag. Tokens issued earlier stay valid,
/// with the old flag, until they expire.
pub async fn verify_email(
    users: web::Data<dyn UserRepository>,
    issuer: web::Data<Issuer>,
    Auth(identity): Auth,
) -> Result<HttpResponse, actix_web::Error> {
    let verified = users.verify(identity.email()).await?;
    let session = issuer.issue(identity.verified(verified))?;
    log::info!("verified email for user {}", session.identity().id());
    Ok(session.respond(HttpResponse::Ok(), issuer.is_secure()).json(session.claims()))
}

/// Trades a valid refresh token for a new pair minted from the stored
/// aggregate. Requires the same whole pair the guard does.
pub async fn refresh(
    users: web::Data<dyn UserRepository>,
    issuer: web::Data<Issuer>,
    req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
    let tokens = cookie::read(&req).ok_or(AuthError::Unauthorized)?;
    let claims = issuer
        .crypto()
        .decode_refresh(tokens.refresh())
        .map_err(|e| {
            log::debug!("rejected refresh: {}", e);
            AuthError::Unauthorized
        })?;
    let identity = users
        .find(claims.user())
        .await?
        .ok_or(AuthError::Unauthorized)?;
    let session = issuer.issue(identity)?;
    Ok(session.respond(HttpResponse::Ok(), issuer.is_secure()).json(session.claims()))
}

pub async fn logout(issuer: web::Data<Issuer>) -> HttpResponse {
    cookie::clear(HttpResponse::Ok(), issuer.is_secure())
        .json(serde_json::json!({ "status": "logged_out" }))
}

pub async fn me(Auth(identity): Auth) -> HttpResponse {
    HttpResponse::Ok().json(identity)
}

/// Looks up any user by `id` or `email`. An id that does not parse names
/// no user.
pub async fn find_user(
    users: web::Data<dyn UserRepository>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = query.id.as_deref().filter(|s| !s.is_empty());
    let email = query.email.as_deref().filter(|s| !s.is_empty());
    let found = match (id, email) {
        (Some(id), _) => match uuid::Uuid::parse_str(id) {
            Ok(id) => users.find(ID::from(id)).await?,
            Err(_) => None,
        },
        (None, Some(email)) => users.lookup(email).await?.map(|(identity, _)| identity),
        (None, None) => return Err(AuthError::Invalid(String::from("id or email is required")).into()),
    };
    let identity = found.ok_or(AuthError::Missing)?;
    Ok(HttpResponse::Ok().json(identity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use seeker_core::ACCESS_TOKEN_COOKIE;
    use seeker_core::REFRESH_TOKEN_COOKIE;
    use std::sync::Arc;

    const SECRET: &[u8] = b"handler test secret";

    fn pair<B>(res: &ServiceResponse<B>) -> TokenPair {
        let value = |name: &str| {
            res.response()
                .cookies()
                .find(|c| c.name() == name)
                .map(|c| c.value().to_string())
                .unwrap_or_default()
        };
        TokenPair::new(value(ACCESS_TOKEN_COOKIE), value(REFRESH_TOKEN_COOKIE)).unwrap()
    }

    fn with(req: test::TestRequest, tokens: &TokenPair) -> test::TestRequest {
        req.cookie(actix_web::cookie::Cookie::new(ACCESS_TOKEN_COOKIE, tokens.access().to_string()))
            .cookie(actix_web::cookie::Cookie::new(REFRESH_TOKEN_COOKIE, tokens.refresh().to_string()))
    }

    fn credentials() -> serde_json::Value {
        serde_json::json!({ "email": "a@x.com", "password": "secret" })
    }

    macro_rules! app {
        ($memory:expr) => {{
            let crypto = Arc::new(Crypto::from_secret(SECRET));
            let users: Arc<dyn UserRepository> = $memory.clone();
            test::init_service(
                App::new()
                    .app_data(web::Data::from(crypto.clone()))
                    .app_data(web::Data::new(Issuer::new(crypto)))
                    .app_data(web::Data::from(users))
                    .configure(routes),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn registration_sets_cookies_and_returns_session() {
        let memory = Arc::new(Memory::default());
        let app = app!(memory);
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(credentials())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status() == StatusCode::CREATED);
        let tokens = pair(&res);
        let body: Claims = test::read_body_json(res).await;
        let decoded = Crypto::from_secret(SECRET).decode(tokens.access()).unwrap();
        assert!(decoded.user.email() == "a@x.com");
        assert!(!decoded.user.email_verified());
        assert!(decoded == body);
    }

    #[actix_web::test]
    async fn duplicate_and_invalid_registrations_are_refused() {
        let memory = Arc::new(Memory::default());
        let app = app!(memory);
        let first = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(credentials())
            .to_request();
        assert!(test::call_service(&app, first).await.status() == StatusCode::CREATED);
        let again = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(credentials())
            .to_request();
        assert!(test::call_service(&app, again).await.status() == StatusCode::CONFLICT);
        let invalid = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(serde_json::json!({ "email": "nobody", "password": "secret" }))
            .to_request();
        assert!(test::call_service(&app, invalid).await.status() == StatusCode::BAD_REQUEST);
    }

    /// Loses the race between its own `exists` and `create`.
    struct Racing;

    #[async_trait::async_trait]
    impl UserRepository for Racing {
        async fn exists(&self, _: &str) -> Result<bool, AuthError> {
            Ok(false)
        }
        async fn create(&self, _: &Identity, _: &str) -> Result<(), AuthError> {
            Err(AuthError::Conflict)
        }
        async fn lookup(&self, _: &str) -> Result<Option<(Identity, String)>, AuthError> {
            Ok(None)
        }
        async fn find(&self, _: ID<Identity>) -> Result<Option<Identity>, AuthError> {
            Ok(None)
        }
        async fn verify(&self, email: &str) -> Result<bool, AuthError> {
            Err(AuthError::Verification(format!("unknown email {}", email)))
        }
    }

    #[actix_web::test]
    async fn duplicate_caught_at_insert_is_a_conflict() {
        let racing = Arc::new(Racing);
        let app = app!(racing);
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(credentials())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status() == StatusCode::CONFLICT);
        assert!(res.headers().get(actix_web::http::header::SET_COOKIE).is_none());
    }

    #[actix_web::test]
    async fn user_lookup_by_id_or_email() {
        let memory = Arc::new(Memory::default());
        let app = app!(memory);
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(credentials())
            .to_request();
        let tokens = pair(&test::call_service(&app, req).await);
        let id = Crypto::from_secret(SECRET).decode(tokens.access()).unwrap().user.id();
        let req = with(test::TestRequest::get().uri(&format!("/user?id={}", id)), &tokens).to_request();
        let seen: Identity = test::call_and_read_body_json(&app, req).await;
        assert!(seen.email() == "a@x.com");
        let req = with(test::TestRequest::get().uri("/user?email=a@x.com"), &tokens).to_request();
        let seen: Identity = test::call_and_read_body_json(&app, req).await;
        assert!(seen.id() == id);
        let req = with(test::TestRequest::get().uri("/user?email=b@x.com"), &tokens).to_request();
        assert!(test::call_service(&app, req).await.status() == StatusCode::NOT_FOUND);
        let req = with(test::TestRequest::get().uri("/user?id=not-a-uuid"), &tokens).to_request();
        assert!(test::call_service(&app, req).await.status() == StatusCode::NOT_FOUND);
        let req = with(test::TestRequest::get().uri("/user"), &tokens).to_request();
        assert!(test::call_service(&app, req).await.status() == StatusCode::BAD_REQUEST);
        let req = test::TestRequest::get().uri("/user?email=a@x.com").to_request();
        assert!(test::call_service(&app, req).await.status() == StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn login_checks_password() {
        let memory = Arc::new(Memory::default());
        let app = app!(memory);
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(credentials())
            .to_request();
        test::call_service(&app, req).await;
        let good = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(credentials())
            .to_request();
        let res = test::call_service(&app, good).await;
        assert!(res.status() == StatusCode::OK);
        let tokens = pair(&res);
        let decoded = Crypto::from_secret(SECRET).decode(tokens.access()).unwrap();
        assert!(decoded.user.email() == "a@x.com");
        let bad = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({ "email": "a@x.com", "password": "wrong" }))
            .to_request();
        let res = test::call_service(&app, bad).await;
        assert!(res.status() == StatusCode::UNAUTHORIZED);
        assert!(test::read_body(res).await == "invalid credentials");
    }

    #[actix_web::test]
    async fn email_verification_reissues_without_invalidating_old_tokens() {
        let memory = Arc::new(Memory::default());
        let app = app!(memory);
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(credentials())
            .to_request();
        let old = pair(&test::call_service(&app, req).await);
        let req = with(test::TestRequest::get().uri("/auth/verify-email"), &old).to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status() == StatusCode::OK);
        let new = pair(&res);
        let crypto = Crypto::from_secret(SECRET);
        let fresh = crypto.decode(new.access()).unwrap().user;
        let stale = crypto.decode(old.access()).unwrap().user;
        assert!(fresh.email_verified());
        assert!(!stale.email_verified());
        assert!(fresh.id() == stale.id());
        let req = with(test::TestRequest::get().uri("/auth/me"), &old).to_request();
        let seen: Identity = test::call_and_read_body_json(&app, req).await;
        assert!(!seen.email_verified());
        let req = with(test::TestRequest::get().uri("/auth/me"), &new).to_request();
        let seen: Identity = test::call_and_read_body_json(&app, req).await;
        assert!(seen.email_verified());
    }

    #[actix_web::test]
    async fn verification_requires_credential() {
        let memory = Arc::new(Memory::default());
        let app = app!(memory);
        let req = test::TestRequest::get().uri("/auth/verify-email").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status() == StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn refresh_mints_from_stored_aggregate() {
        let memory = Arc::new(Memory::default());
        let app = app!(memory);
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(credentials())
            .to_request();
        let old = pair(&test::call_service(&app, req).await);
        memory.verify("a@x.com").await.unwrap();
        let req = with(test::TestRequest::post().uri("/auth/refresh"), &old).to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status() == StatusCode::OK);
        let new = pair(&res);
        let decoded = Crypto::from_secret(SECRET).decode(new.access()).unwrap();
        assert!(decoded.user.email_verified());
        let swapped = TokenPair::new(old.access().to_string(), old.access().to_string()).unwrap();
        let req = with(test::TestRequest::post().uri("/auth/refresh"), &swapped).to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status() == StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_expires_both_cookies() {
        let memory = Arc::new(Memory::default());
        let app = app!(memory);
        let req = test::TestRequest::post().uri("/auth/logout").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status() == StatusCode::OK);
        let cleared = res
            .response()
            .cookies()
            .filter(|c| c.value().is_empty())
            .filter(|c| c.max_age() == Some(actix_web::cookie::time::Duration::ZERO))
            .count();
        assert!(cleared == 2);
    }
}
