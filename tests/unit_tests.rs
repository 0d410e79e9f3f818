// Unit tests for the Tomolink ranking core

use std::collections::HashSet;

use tomolink::core::{
    feedback::apply_rating,
    filters::{is_admissible, matches_profile_filters, matches_suggestion_filters},
    matchmaking::profile_match_score,
    scoring::{calculate_compatibility, roles_complement, shared_game_count},
};
use tomolink::models::{
    Answers, GameProfile, MatchmakingFilters, ProfileWeights, ScoringWeights, SuggestionFilters,
    UserProfile,
};

fn create_test_profile(id: i64, games: &[&str], platform: Option<&str>, region: Option<&str>) -> UserProfile {
    UserProfile {
        id,
        username: format!("player{}", id),
        games: games.iter().map(|g| g.to_string()).collect(),
        platform: platform.map(str::to_string),
        region: region.map(str::to_string),
        ..Default::default()
    }
}

fn answers(pairs: &[(&str, &str)]) -> Answers {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn game_profile(user_id: i64, playstyle: &str, comms: &str, role: &str, rank: Option<&str>) -> GameProfile {
    GameProfile {
        id: user_id * 10,
        user_id,
        game_type: "Valorant".to_string(),
        playstyle: playstyle.to_string(),
        communication_preference: comms.to_string(),
        role_preference: role.to_string(),
        rank: rank.map(str::to_string),
        additional_preferences: None,
    }
}

#[test]
fn test_region_and_platform_mismatch_only_loses_points() {
    let requester = create_test_profile(1, &["Apex"], Some("PC"), Some("NA"));
    let candidate = create_test_profile(2, &["Apex"], Some("PS5"), Some("EU"));

    let score = calculate_compatibility(&requester, &candidate, &ScoringWeights::default());
    assert_eq!(score, 30);
}

#[test]
fn test_no_shared_game_still_scores() {
    let mut requester = create_test_profile(1, &["Apex"], Some("PC"), Some("NA"));
    let mut candidate = create_test_profile(2, &["Valorant"], Some("PC"), Some("NA"));
    requester.quiz_answers = answers(&[("q1", "Chill"), ("q2", "Night")]);
    candidate.quiz_answers = answers(&[("q1", "Chill"), ("q2", "Morning")]);
    candidate.feedback_score = Some(40);

    // platform 20 + region 20 + feedback 40 + one quiz answer 5
    let score = calculate_compatibility(&requester, &candidate, &ScoringWeights::default());
    assert_eq!(score, 85);
}

#[test]
fn test_custom_weights() {
    let weights = ScoringWeights {
        shared_game: 1,
        platform: 0,
        region: 0,
        feedback_cap: 10,
        quiz_answer: 0,
        role_complement: 0,
    };

    let requester = create_test_profile(1, &["Apex", "Valorant"], Some("PC"), Some("NA"));
    let mut candidate = create_test_profile(2, &["Valorant", "Apex"], Some("PC"), Some("NA"));
    candidate.feedback_score = Some(95);

    assert_eq!(calculate_compatibility(&requester, &candidate, &weights), 12);
}

#[test]
fn test_shared_games_ignore_order() {
    let a = create_test_profile(1, &["Valorant", "Overwatch", "Apex"], None, None);
    let b = create_test_profile(2, &["Apex", "Valorant"], None, None);

    assert_eq!(shared_game_count(&a, &b), 2);
    assert_eq!(shared_game_count(&b, &a), 2);
}

#[test]
fn test_same_role_does_not_complement() {
    let mut a = create_test_profile(1, &["Overwatch"], None, None);
    let mut b = create_test_profile(2, &["Overwatch"], None, None);
    a.overwatch_role = Some("Support".to_string());
    b.overwatch_role = Some("Support".to_string());

    assert!(!roles_complement(&a, &b));

    b.overwatch_role = None;
    assert!(!roles_complement(&a, &b));
}

#[test]
fn test_admissibility() {
    let requester = create_test_profile(1, &[], None, None);
    let stranger = create_test_profile(2, &[], None, None);
    let friend = create_test_profile(3, &[], None, None);
    let mut hidden = create_test_profile(4, &[], None, None);
    hidden.is_private = true;

    let related: HashSet<i64> = [3].into_iter().collect();

    assert!(is_admissible(&requester, &stranger, &related));
    assert!(!is_admissible(&requester, &friend, &related));
    assert!(!is_admissible(&requester, &hidden, &related));
    assert!(!is_admissible(&requester, &requester, &related));
}

#[test]
fn test_suggestion_filters_are_exact() {
    let candidate = create_test_profile(2, &["Valorant"], Some("PC"), Some("NA"));

    let by_game = SuggestionFilters {
        game: Some("valorant".to_string()),
        ..Default::default()
    };
    assert!(!matches_suggestion_filters(&candidate, &by_game));

    let by_platform_and_region = SuggestionFilters {
        platform: Some("PC".to_string()),
        region: Some("NA".to_string()),
        ..Default::default()
    };
    assert!(matches_suggestion_filters(&candidate, &by_platform_and_region));
}

#[test]
fn test_profile_match_score_terms() {
    let weights = ProfileWeights::default();
    let mine = game_profile(1, "Competitive", "Voice", "Duelist", Some("Gold"));

    let perfect = game_profile(2, "Competitive", "Voice", "Controller", Some("Gold"));
    assert!((profile_match_score(&mine, &perfect, &weights) - 1.0).abs() < 1e-9);

    let same_role = game_profile(3, "Competitive", "Voice", "Duelist", Some("Gold"));
    assert!((profile_match_score(&mine, &same_role, &weights) - 0.7).abs() < 1e-9);

    let unranked = game_profile(4, "Casual", "Text", "Duelist", None);
    assert!(profile_match_score(&mine, &unranked, &weights).abs() < 1e-9);
}

#[test]
fn test_rank_bounds_are_lexicographic() {
    let filters = MatchmakingFilters {
        min_rank: Some("Bronze".to_string()),
        max_rank: Some("Gold".to_string()),
        ..Default::default()
    };

    assert!(matches_profile_filters(&game_profile(2, "a", "b", "c", Some("Diamond")), &filters));
    assert!(!matches_profile_filters(&game_profile(3, "a", "b", "c", Some("Platinum")), &filters));
    assert!(!matches_profile_filters(&game_profile(4, "a", "b", "c", None), &filters));
}

#[test]
fn test_feedback_running_average() {
    let (score, count) = apply_rating(0, 0, 4);
    assert_eq!((score, count), (80, 1));

    let (score, count) = apply_rating(score, count, 1);
    assert_eq!((score, count), (50, 2));

    let (score, count) = apply_rating(score, count, 2);
    // (50 * 2 + 40) / 3 = 46.67, truncated
    assert_eq!((score, count), (46, 3));
}
