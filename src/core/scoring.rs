use std::collections::HashSet;

use crate::models::{UserProfile, ScoringWeights};

/// Game whose role labels are compared for team complementarity
pub const ROLE_GAME: &str = "Overwatch";

/// Calculate the compatibility score of `candidate` for `requester`
///
/// Scoring formula (default weights):
/// score = (
///     shared_games * 30 +          # distinct games both play
///     platform_match * 20 +        # same non-empty platform
///     region_match * 20 +          # same non-empty region
///     min(feedback, 100) +         # candidate reputation
///     matching_quiz_answers * 5 +  # same answer to the same question
///     role_complement * 10         # both play Overwatch with different roles
/// )
///
/// Every term is non-negative and computed independently. Missing or empty
/// fields contribute zero.
pub fn calculate_compatibility(
    requester: &UserProfile,
    candidate: &UserProfile,
    weights: &ScoringWeights,
) -> u32 {
    let games = shared_game_count(requester, candidate).saturating_mul(weights.shared_game);

    let platform = match (requester.platform(), candidate.platform()) {
        (Some(a), Some(b)) if a == b => weights.platform,
        _ => 0,
    };

    let region = match (requester.region(), candidate.region()) {
        (Some(a), Some(b)) if a == b => weights.region,
        _ => 0,
    };

    let feedback = feedback_score(candidate, weights.feedback_cap);
    let quiz = matching_answer_count(requester, candidate).saturating_mul(weights.quiz_answer);

    let role = if roles_complement(requester, candidate) {
        weights.role_complement
    } else {
        0
    };

    games
        .saturating_add(platform)
        .saturating_add(region)
        .saturating_add(feedback)
        .saturating_add(quiz)
        .saturating_add(role)
}

/// Number of distinct games present in both profiles
pub fn shared_game_count(a: &UserProfile, b: &UserProfile) -> u32 {
    let theirs: HashSet<&str> = b.games.iter().map(String::as_str).collect();
    let shared: HashSet<&str> = a
        .games
        .iter()
        .map(String::as_str)
        .filter(|g| theirs.contains(g))
        .collect();

    u32::try_from(shared.len()).unwrap_or(u32::MAX)
}

/// Number of quiz questions both users answered identically
pub fn matching_answer_count(a: &UserProfile, b: &UserProfile) -> u32 {
    let count = a
        .quiz_answers
        .iter()
        .filter(|(key, value)| b.quiz_answers.get(*key) == Some(*value))
        .count();

    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Both play the role game, both picked a role, and the roles differ
pub fn roles_complement(a: &UserProfile, b: &UserProfile) -> bool {
    if !a.plays(ROLE_GAME) || !b.plays(ROLE_GAME) {
        return false;
    }

    matches!((a.role(), b.role()), (Some(x), Some(y)) if x != y)
}

/// Candidate reputation clamped to `[0, cap]`
#[inline]
fn feedback_score(candidate: &UserProfile, cap: u32) -> u32 {
    candidate
        .feedback_score
        .map(|score| u32::try_from(score.max(0)).unwrap_or(0).min(cap))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(id: i64, games: &[&str]) -> UserProfile {
        UserProfile {
            id,
            username: format!("player{}", id),
            games: games.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> crate::models::Answers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_worked_example_scores_165() {
        let mut requester = create_test_profile(1, &["Valorant", "Overwatch"]);
        requester.platform = Some("PC".to_string());
        requester.region = Some("NA".to_string());
        requester.quiz_answers = answers(&[("q1", "Aggressive")]);
        requester.overwatch_role = Some("DPS".to_string());
        requester.feedback_score = Some(10);

        let mut candidate = create_test_profile(2, &["Overwatch"]);
        candidate.platform = Some("PC".to_string());
        candidate.region = Some("NA".to_string());
        candidate.quiz_answers = answers(&[("q1", "Aggressive"), ("q2", "Mid")]);
        candidate.feedback_score = Some(80);
        candidate.overwatch_role = Some("Tank".to_string());

        let score = calculate_compatibility(&requester, &candidate, &ScoringWeights::default());
        assert_eq!(score, 165);
    }

    #[test]
    fn test_self_comparison() {
        let mut profile = create_test_profile(1, &["Valorant", "Overwatch", "Apex"]);
        profile.platform = Some("PC".to_string());
        profile.region = Some("EU".to_string());
        profile.quiz_answers = answers(&[("q1", "Aggressive"), ("q2", "Tactical")]);
        profile.overwatch_role = Some("Support".to_string());
        profile.feedback_score = Some(40);

        let score = calculate_compatibility(&profile, &profile, &ScoringWeights::default());
        // equal roles never complement
        assert_eq!(score, 3 * 30 + 20 + 20 + 40 + 2 * 5);
    }

    #[test]
    fn test_symmetry_without_feedback() {
        let mut a = create_test_profile(1, &["Overwatch", "Valorant"]);
        a.platform = Some("PC".to_string());
        a.region = Some("NA".to_string());
        a.quiz_answers = answers(&[("q1", "Aggressive"), ("q3", "Night")]);
        a.overwatch_role = Some("Tank".to_string());

        let mut b = create_test_profile(2, &["Overwatch", "Rocket League"]);
        b.platform = Some("PC".to_string());
        b.region = Some("EU".to_string());
        b.quiz_answers = answers(&[("q1", "Aggressive"), ("q3", "Morning")]);
        b.overwatch_role = Some("Support".to_string());

        let weights = ScoringWeights::default();
        assert_eq!(
            calculate_compatibility(&a, &b, &weights),
            calculate_compatibility(&b, &a, &weights)
        );
        assert_eq!(calculate_compatibility(&a, &b, &weights), 30 + 20 + 5 + 10);
    }

    #[test]
    fn test_empty_profiles_score_zero() {
        let a = create_test_profile(1, &[]);
        let b = create_test_profile(2, &[]);

        assert_eq!(calculate_compatibility(&a, &b, &ScoringWeights::default()), 0);
    }

    #[test]
    fn test_empty_platform_and_region_do_not_match() {
        let mut a = create_test_profile(1, &[]);
        a.platform = Some(String::new());
        a.region = Some(String::new());
        let b = a.clone();

        assert_eq!(calculate_compatibility(&a, &b, &ScoringWeights::default()), 0);
    }

    #[test]
    fn test_duplicate_games_count_once() {
        let a = create_test_profile(1, &["Apex", "Apex"]);
        let b = create_test_profile(2, &["Apex", "Apex", "Apex"]);

        assert_eq!(shared_game_count(&a, &b), 1);
    }

    #[test]
    fn test_feedback_is_clamped() {
        let a = create_test_profile(1, &[]);
        let mut b = create_test_profile(2, &[]);
        let weights = ScoringWeights::default();

        b.feedback_score = Some(250);
        assert_eq!(calculate_compatibility(&a, &b, &weights), 100);

        b.feedback_score = Some(-40);
        assert_eq!(calculate_compatibility(&a, &b, &weights), 0);
    }

    #[test]
    fn test_role_complement_requires_role_game() {
        let mut a = create_test_profile(1, &["Valorant"]);
        a.overwatch_role = Some("Tank".to_string());
        let mut b = create_test_profile(2, &["Valorant"]);
        b.overwatch_role = Some("DPS".to_string());

        assert!(!roles_complement(&a, &b));

        a.games.push(ROLE_GAME.to_string());
        b.games.push(ROLE_GAME.to_string());
        assert!(roles_complement(&a, &b));

        b.overwatch_role = None;
        assert!(!roles_complement(&a, &b));
    }

    #[test]
    fn test_quiz_answers_must_be_equal() {
        let mut a = create_test_profile(1, &[]);
        a.quiz_answers = answers(&[("q1", "Aggressive"), ("q2", "Mid")]);
        let mut b = create_test_profile(2, &[]);
        b.quiz_answers = answers(&[("q1", "Passive"), ("q2", "Mid"), ("q4", "Late")]);

        assert_eq!(matching_answer_count(&a, &b), 1);
    }
}
