use super::*;
use actix_web::HttpResponse;
use actix_web::middleware::from_fn;
use actix_web::web;
use seeker_auth::Auth;
use seeker_auth::Issuer;
use seeker_auth::guard;
use seeker_core::Unique;

/// Mounts the `/talent` scope. Every route requires a session.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/talent")
            .wrap(from_fn(guard))
            .route("", web::post().to(create_profile))
            .route("/list", web::get().to(list_talents)),
    );
}

/// Attaches a talent profile to the caller, then re-issues their session
/// so the new access token embeds it.
pub async fn create_profile(
    talents: web::Data<dyn TalentRepository>,
    issuer: web::Data<Issuer>,
    Auth(identity): Auth,
    req: web::Json<Draft>,
) -> Result<HttpResponse, actix_web::Error> {
    let draft = req.into_inner();
    draft.validate()?;
    let profile = talents.create(identity.id(), draft).await?;
    let session = issuer.issue(identity.with_talent(profile.clone()))?;
    log::info!("attached talent profile {} to user {}", profile.id(), identity.id());
    Ok(session.respond(HttpResponse::Created(), issuer.is_secure()).json(profile))
}

pub async fn list_talents(
    talents: web::Data<dyn TalentRepository>,
    query: web::Query<Listing>,
) -> Result<HttpResponse, actix_web::Error> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    Ok(HttpResponse::Ok().json(talents.list(category).await?))
}
