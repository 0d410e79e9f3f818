use std::collections::HashSet;

use crate::core::{
    filters::{is_admissible, is_profile_admissible, matches_profile_filters, matches_suggestion_filters},
    matchmaking::profile_match_score,
    scoring::calculate_compatibility,
};
use crate::models::{
    GameProfile, MatchmakingFilters, ProfileCandidate, ProfileMatch, ProfileWeights,
    ScoredSuggestion, ScoringWeights, SuggestionFilters, UserId, UserProfile,
};

/// Ranking orchestrator
///
/// # Suggestion pipeline
/// 1. Admissibility (self, private, friends and pending requests)
/// 2. Caller filters (game, platform, region)
/// 3. Compatibility scoring
/// 4. Stable sort by score, highest first
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    weights: ScoringWeights,
    profile_weights: ProfileWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, profile_weights: ProfileWeights) -> Self {
        Self {
            weights,
            profile_weights,
        }
    }

    /// Rank candidates for the requester
    ///
    /// Candidates with equal scores keep the order in which they were passed in.
    pub fn rank_suggestions(
        &self,
        requester: &UserProfile,
        candidates: Vec<UserProfile>,
        related: &HashSet<UserId>,
        filters: &SuggestionFilters,
    ) -> Vec<ScoredSuggestion> {
        let mut suggestions: Vec<ScoredSuggestion> = candidates
            .into_iter()
            .filter(|candidate| is_admissible(requester, candidate, related))
            .filter(|candidate| matches_suggestion_filters(candidate, filters))
            .map(|candidate| {
                let score = calculate_compatibility(requester, &candidate, &self.weights);

                ScoredSuggestion {
                    id: candidate.id,
                    username: candidate.username,
                    platform: candidate.platform,
                    region: candidate.region,
                    games: candidate.games,
                    overwatch_role: candidate.overwatch_role,
                    score,
                }
            })
            .collect();

        // sort_by is stable
        suggestions.sort_by(|a, b| b.score.cmp(&a.score));
        suggestions
    }

    /// Rank other users' profiles for the same game against the requester's profile
    pub fn rank_profiles(
        &self,
        mine: &GameProfile,
        candidates: Vec<ProfileCandidate>,
        filters: &MatchmakingFilters,
    ) -> Vec<ProfileMatch> {
        let mut matches: Vec<ProfileMatch> = candidates
            .into_iter()
            .filter(|candidate| candidate.profile.game_type == mine.game_type)
            .filter(|candidate| is_profile_admissible(mine.user_id, candidate))
            .filter(|candidate| matches_profile_filters(&candidate.profile, filters))
            .map(|candidate| {
                let match_score = profile_match_score(mine, &candidate.profile, &self.profile_weights);
                let profile = candidate.profile;

                ProfileMatch {
                    user_id: profile.user_id,
                    username: candidate.username,
                    game_type: profile.game_type,
                    playstyle: profile.playstyle,
                    communication_preference: profile.communication_preference,
                    role_preference: profile.role_preference,
                    rank: profile.rank,
                    match_score,
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches
    }
}
