use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::apply_rating;
use crate::error::ApiError;
use crate::models::{DetailResponse, FeedbackRequest, FriendStatus, UserId};
use crate::routes::{current_user, AppState, AuthenticatedUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/feedback/{user_id}", web::post().to(submit_feedback));
}

/// POST /feedback/{user_id}
///
/// Folds a 1..=5 rating into the target's running feedback average.
/// Only accepted friends may rate each other; the rating range is checked last.
async fn submit_feedback(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<UserId>,
    req: web::Json<FeedbackRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    let target_id = path.into_inner();

    if target_id == user.id {
        return Err(ApiError::bad_request("Cannot leave feedback for yourself"));
    }

    let target = state
        .store
        .get_user(target_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let are_friends = state
        .store
        .find_request_between(user.id, target.id)
        .await?
        .is_some_and(|request| request.status == FriendStatus::Accepted);

    if !are_friends {
        return Err(ApiError::forbidden("You can only leave feedback for friends"));
    }

    req.validate()?;

    let (score, count) = apply_rating(target.feedback_score, target.feedback_count, req.rating);
    state.store.update_feedback(target.id, score, count).await?;

    tracing::info!(
        "Feedback from {} to {}: rating={} new_score={} count={}",
        user.id,
        target.id,
        req.rating,
        score,
        count
    );

    Ok(HttpResponse::Ok().json(DetailResponse::new("Feedback submitted successfully")))
}
