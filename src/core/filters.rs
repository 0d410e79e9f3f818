use std::collections::HashSet;

use crate::models::{GameProfile, MatchmakingFilters, ProfileCandidate, SuggestionFilters, UserId, UserProfile};

/// Check whether a candidate may be suggested to the requester at all
///
/// Excludes the requester themself, private profiles, and anyone in
/// `related` (accepted friends and pending requests in either direction).
#[inline]
pub fn is_admissible(
    requester: &UserProfile,
    candidate: &UserProfile,
    related: &HashSet<UserId>,
) -> bool {
    if candidate.id == requester.id {
        return false;
    }

    if candidate.is_private {
        return false;
    }

    !related.contains(&candidate.id)
}

/// Check a candidate against the caller's exact-match filters
///
/// Unset filters accept everything. These never affect the score.
#[inline]
pub fn matches_suggestion_filters(candidate: &UserProfile, filters: &SuggestionFilters) -> bool {
    if let Some(game) = filters.game.as_deref() {
        if !candidate.plays(game) {
            return false;
        }
    }

    if let Some(platform) = filters.platform.as_deref() {
        if candidate.platform.as_deref() != Some(platform) {
            return false;
        }
    }

    if let Some(region) = filters.region.as_deref() {
        if candidate.region.as_deref() != Some(region) {
            return false;
        }
    }

    true
}

/// Check whether another user's game profile is eligible for matchmaking
#[inline]
pub fn is_profile_admissible(requester_id: UserId, candidate: &ProfileCandidate) -> bool {
    candidate.profile.user_id != requester_id && !candidate.is_private
}

/// Check a game profile against the matchmaking filters
///
/// Rank bounds compare the rank labels lexicographically; a profile
/// without a rank fails any bound.
#[inline]
pub fn matches_profile_filters(profile: &GameProfile, filters: &MatchmakingFilters) -> bool {
    if let Some(playstyle) = filters.playstyle.as_deref() {
        if profile.playstyle != playstyle {
            return false;
        }
    }

    if let Some(communication) = filters.communication_preference.as_deref() {
        if profile.communication_preference != communication {
            return false;
        }
    }

    if let Some(role) = filters.role_preference.as_deref() {
        if profile.role_preference != role {
            return false;
        }
    }

    let rank = profile.rank.as_deref();

    if let Some(min_rank) = filters.min_rank.as_deref() {
        if !rank.is_some_and(|r| r >= min_rank) {
            return false;
        }
    }

    if let Some(max_rank) = filters.max_rank.as_deref() {
        if !rank.is_some_and(|r| r <= max_rank) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(id: i64) -> UserProfile {
        UserProfile {
            id,
            username: format!("player{}", id),
            games: vec!["Valorant".to_string(), "Overwatch".to_string()],
            platform: Some("PC".to_string()),
            region: Some("NA".to_string()),
            ..Default::default()
        }
    }

    fn create_game_profile(user_id: i64, rank: Option<&str>) -> GameProfile {
        GameProfile {
            id: user_id * 10,
            user_id,
            game_type: "Valorant".to_string(),
            playstyle: "Aggressive".to_string(),
            communication_preference: "Voice".to_string(),
            role_preference: "Duelist".to_string(),
            rank: rank.map(str::to_string),
            additional_preferences: None,
        }
    }

    #[test]
    fn test_self_is_not_admissible() {
        let requester = create_test_profile(1);
        assert!(!is_admissible(&requester, &requester, &HashSet::new()));
    }

    #[test]
    fn test_private_is_not_admissible() {
        let requester = create_test_profile(1);
        let mut candidate = create_test_profile(2);
        assert!(is_admissible(&requester, &candidate, &HashSet::new()));

        candidate.is_private = true;
        assert!(!is_admissible(&requester, &candidate, &HashSet::new()));
    }

    #[test]
    fn test_related_is_not_admissible() {
        let requester = create_test_profile(1);
        let candidate = create_test_profile(2);
        let related: HashSet<UserId> = [2].into_iter().collect();

        assert!(!is_admissible(&requester, &candidate, &related));
    }

    #[test]
    fn test_suggestion_filters() {
        let candidate = create_test_profile(2);

        assert!(matches_suggestion_filters(&candidate, &SuggestionFilters::default()));

        let by_game = SuggestionFilters {
            game: Some("Overwatch".to_string()),
            ..Default::default()
        };
        assert!(matches_suggestion_filters(&candidate, &by_game));

        let wrong_game = SuggestionFilters {
            game: Some("Dota 2".to_string()),
            ..Default::default()
        };
        assert!(!matches_suggestion_filters(&candidate, &wrong_game));

        let wrong_region = SuggestionFilters {
            platform: Some("PC".to_string()),
            region: Some("EU".to_string()),
            ..Default::default()
        };
        assert!(!matches_suggestion_filters(&candidate, &wrong_region));
    }

    #[test]
    fn test_rank_bounds() {
        let filters = MatchmakingFilters {
            min_rank: Some("Gold".to_string()),
            max_rank: Some("Platinum".to_string()),
            ..Default::default()
        };

        assert!(matches_profile_filters(&create_game_profile(2, Some("Gold")), &filters));
        assert!(matches_profile_filters(&create_game_profile(2, Some("Iron")), &filters));
        assert!(!matches_profile_filters(&create_game_profile(2, Some("Silver")), &filters));
        assert!(!matches_profile_filters(&create_game_profile(2, None), &filters));
    }

    #[test]
    fn test_profile_exact_filters() {
        let profile = create_game_profile(2, None);
        let filters = MatchmakingFilters {
            playstyle: Some("Passive".to_string()),
            ..Default::default()
        };

        assert!(!matches_profile_filters(&profile, &filters));
        assert!(matches_profile_filters(&profile, &MatchmakingFilters::default()));
    }
}
