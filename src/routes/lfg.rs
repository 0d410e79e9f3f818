use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::ApiError;
use crate::models::LfgCreateRequest;
use crate::routes::{current_user, AppState, AuthenticatedUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/lfg")
            .route(web::post().to(create_post))
            .route(web::get().to(list_posts)),
    );
}

async fn create_post(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    req: web::Json<LfgCreateRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let user = current_user(&state, auth).await?;
    let post = state.store.create_post(user.id, &req.content).await?;

    Ok(HttpResponse::Created().json(post))
}

/// GET /lfg, newest first
async fn list_posts(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    current_user(&state, auth).await?;
    let posts = state.store.list_posts().await?;

    Ok(HttpResponse::Ok().json(posts))
}
