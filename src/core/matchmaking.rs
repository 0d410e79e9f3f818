use crate::models::{GameProfile, ProfileWeights};

/// Calculate a match score (0.0-1.0) between two profiles for the same game
///
/// Scoring formula (default weights):
/// score = (
///     same_playstyle * 0.3 +
///     same_communication * 0.2 +
///     different_role * 0.3 +       # different roles balance a team
///     same_rank * 0.2              # only when both have a rank
/// )
pub fn profile_match_score(mine: &GameProfile, theirs: &GameProfile, weights: &ProfileWeights) -> f64 {
    let mut score = 0.0;

    if mine.playstyle == theirs.playstyle {
        score += weights.playstyle;
    }

    if mine.communication_preference == theirs.communication_preference {
        score += weights.communication;
    }

    if mine.role_preference != theirs.role_preference {
        score += weights.role;
    }

    if let (Some(a), Some(b)) = (mine.rank.as_deref(), theirs.rank.as_deref()) {
        if a == b {
            score += weights.rank;
        }
    }

    score
}
