use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::{invalid_json_body, ApiError};
use crate::models::MatchmakingFilters;
use crate::routes::{current_user, AppState, AuthenticatedUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matchmaking/{game_type}", web::post().to(find_matches));
}

/// POST /matchmaking/{game_type}
///
/// Request body (all fields optional, body may be omitted):
/// ```json
/// {
///   "playstyle": "Competitive",
///   "communication_preference": "Voice",
///   "role_preference": "Support",
///   "min_rank": "Gold",
///   "max_rank": "Platinum"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Bytes,
    http_req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
    let filters = parse_filters(&body).map_err(|e| invalid_json_body(e, &http_req))?;

    Ok(rank_for_game(&state, auth, &path, &filters).await?)
}

async fn rank_for_game(
    state: &AppState,
    auth: AuthenticatedUser,
    game_type: &str,
    filters: &MatchmakingFilters,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(state, auth).await?;

    let mine = state
        .store
        .get_game_profile(user.id, game_type)
        .await?
        .ok_or_else(|| ApiError::not_found("Game profile not found"))?;

    let candidates = state.store.profiles_for_game(game_type).await?;
    let considered = candidates.len();
    let matches = state.matcher.rank_profiles(&mine, candidates, filters);

    tracing::debug!(
        "Matchmaking for user {} in {}: {} of {} profiles matched",
        user.id,
        game_type,
        matches.len(),
        considered
    );

    Ok(HttpResponse::Ok().json(matches))
}

/// An empty body means no filters; anything else must be a valid filter object
fn parse_filters(body: &[u8]) -> Result<MatchmakingFilters, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MatchmakingFilters::default());
    }

    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_means_no_filters() {
        let filters = parse_filters(b"").unwrap();
        assert!(filters.min_rank.is_none());

        let filters = parse_filters(b"  \n").unwrap();
        assert!(filters.playstyle.is_none());
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        assert!(parse_filters(br#"{"min_rank": 5}"#).is_err());
        assert!(parse_filters(br#"{"min_rank": "Gold""#).is_err());
        assert_eq!(
            parse_filters(br#"{"min_rank": "Gold"}"#).unwrap().min_rank.as_deref(),
            Some("Gold")
        );
    }
}
