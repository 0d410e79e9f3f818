use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::{DashboardStats, FriendStatus};
use crate::routes::{current_user, AppState, AuthenticatedUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard/stats", web::get().to(stats));
}

/// GET /dashboard/stats
///
/// `total_users` and `total_matches` are global; the other two are the caller's.
async fn stats(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;

    let total_users = state.store.count_users().await?;
    let total_matches = state.store.count_accepted().await?;

    let involving = state.store.requests_involving(user.id).await?;
    let friends_count = involving
        .iter()
        .filter(|request| request.status == FriendStatus::Accepted)
        .count();
    let pending_requests = involving
        .iter()
        .filter(|request| request.status == FriendStatus::Pending && request.to_user_id == user.id)
        .count();

    Ok(HttpResponse::Ok().json(DashboardStats {
        total_users,
        total_matches,
        friends_count: friends_count as i64,
        pending_requests: pending_requests as i64,
    }))
}
