use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::{ProfileEditRequest, QuizUpdateRequest, UserResponse};
use crate::routes::{current_user, AppState, AuthenticatedUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user/profile")
            .route("", web::get().to(get_profile))
            .route("/quiz", web::put().to(update_quiz))
            .route("/edit", web::put().to(edit_profile)),
    );
}

async fn get_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /user/profile/quiz
///
/// Replaces the stored answers wholesale.
async fn update_quiz(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    req: web::Json<QuizUpdateRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    let updated = state.store.update_quiz_answers(user.id, &req.answers).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// PUT /user/profile/edit
async fn edit_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    req: web::Json<ProfileEditRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    let changes = req.into_inner().into_changes();
    let updated = state.store.update_profile(user.id, &changes).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
