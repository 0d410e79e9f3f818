use actix_web::{web, HttpResponse};
use std::collections::HashSet;

use crate::error::ApiError;
use crate::models::{SuggestionFilters, UserId, UserProfile};
use crate::routes::{current_user, AppState, AuthenticatedUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/suggestions", web::get().to(get_suggestions))
        .route("/suggestions/", web::get().to(get_suggestions))
        .route("/quiz/suggestions", web::get().to(get_suggestions));
}

/// GET /suggestions?game=&platform=&region=
///
/// Ranked list of users the caller is not yet connected to.
async fn get_suggestions(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<SuggestionFilters>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    let filters = normalize(query.into_inner());

    let related: HashSet<UserId> = state
        .store
        .requests_involving(user.id)
        .await?
        .iter()
        .map(|request| request.counterpart(user.id))
        .collect();

    let candidates: Vec<UserProfile> = state
        .store
        .list_users_except(user.id)
        .await?
        .into_iter()
        .map(UserProfile::from)
        .collect();

    let requester = UserProfile::from(user);
    let suggestions = state
        .matcher
        .rank_suggestions(&requester, candidates, &related, &filters);

    tracing::debug!(
        "Ranked {} suggestions for user {} (excluded {} related)",
        suggestions.len(),
        requester.id,
        related.len()
    );

    Ok(HttpResponse::Ok().json(suggestions))
}

/// `?platform=` with an empty value means no filter
fn normalize(filters: SuggestionFilters) -> SuggestionFilters {
    let keep = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    SuggestionFilters {
        game: keep(filters.game),
        platform: keep(filters.platform),
        region: keep(filters.region),
    }
}
