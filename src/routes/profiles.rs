use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{GameProfileFields, GameProfileRequest};
use crate::routes::{current_user, AppState, AuthenticatedUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profiles")
            .route("", web::get().to(list_profiles))
            .service(
                web::resource("/{game_type}")
                    .route(web::post().to(upsert_profile))
                    .route(web::get().to(get_profile))
                    .route(web::delete().to(delete_profile)),
            ),
    );
}

/// POST /profiles/{game_type}
///
/// Creates the caller's profile for the game or replaces it. Any `game_type`
/// in the body is ignored in favour of the path.
async fn upsert_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<GameProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let user = current_user(&state, auth).await?;
    let game_type = path.into_inner();
    let fields = GameProfileFields::from(req.into_inner());

    let profile = state
        .store
        .upsert_game_profile(user.id, &game_type, &fields)
        .await?;

    Ok(HttpResponse::Created().json(profile))
}

async fn get_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    let profile = state
        .store
        .get_game_profile(user.id, &path)
        .await?
        .ok_or_else(|| ApiError::not_found("Game profile not found"))?;

    Ok(HttpResponse::Ok().json(profile))
}

async fn list_profiles(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    let profiles = state.store.list_game_profiles(user.id).await?;

    Ok(HttpResponse::Ok().json(profiles))
}

async fn delete_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;

    if !state.store.delete_game_profile(user.id, &path).await? {
        return Err(ApiError::not_found("Game profile not found"));
    }

    Ok(HttpResponse::NoContent().finish())
}
