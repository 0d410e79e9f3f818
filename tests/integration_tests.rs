// Integration tests for the Tomolink ranking pipeline

use std::collections::HashSet;

use tomolink::core::Matcher;
use tomolink::models::{
    GameProfile, MatchmakingFilters, ProfileCandidate, ProfileWeights, ScoringWeights,
    SuggestionFilters, UserProfile,
};

fn create_test_profile(id: i64, games: &[&str], platform: &str, region: &str, feedback: i32) -> UserProfile {
    UserProfile {
        id,
        username: format!("player{}", id),
        games: games.iter().map(|g| g.to_string()).collect(),
        platform: Some(platform.to_string()),
        region: Some(region.to_string()),
        feedback_score: Some(feedback),
        ..Default::default()
    }
}

fn create_candidate(user_id: i64, playstyle: &str, role: &str, rank: Option<&str>, is_private: bool) -> ProfileCandidate {
    ProfileCandidate {
        profile: GameProfile {
            id: 100 + user_id,
            user_id,
            game_type: "Overwatch".to_string(),
            playstyle: playstyle.to_string(),
            communication_preference: "Voice".to_string(),
            role_preference: role.to_string(),
            rank: rank.map(str::to_string),
            additional_preferences: None,
        },
        username: format!("player{}", user_id),
        is_private,
    }
}

#[test]
fn test_integration_end_to_end_suggestions() {
    let matcher = Matcher::default();
    let mut requester = create_test_profile(1, &["Overwatch", "Valorant"], "PC", "NA", 0);
    requester.overwatch_role = Some("Support".to_string());

    let mut tank = create_test_profile(2, &["Overwatch"], "PC", "NA", 50);
    tank.overwatch_role = Some("Tank".to_string());

    let mut hidden = create_test_profile(5, &["Overwatch", "Valorant"], "PC", "NA", 100);
    hidden.is_private = true;

    let candidates = vec![
        create_test_profile(1, &["Overwatch"], "PC", "NA", 100), // requester's own row
        tank,                                                    // 30 + 20 + 20 + 50 + 10 = 130
        create_test_profile(3, &["Valorant"], "PS5", "EU", 20),  // 30 + 20 = 50
        create_test_profile(4, &["Overwatch", "Valorant"], "PC", "NA", 0), // 60 + 40 = 100
        hidden,
        create_test_profile(6, &["Valorant"], "PC", "NA", 100),  // already a friend
    ];

    let related: HashSet<i64> = [6].into_iter().collect();
    let results = matcher.rank_suggestions(&requester, candidates, &related, &SuggestionFilters::default());

    let ids: Vec<i64> = results.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 4, 3]);

    let scores: Vec<u32> = results.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![130, 100, 50]);

    // Scores must be in descending order
    for window in results.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[test]
fn test_integration_filters_do_not_change_scores() {
    let matcher = Matcher::default();
    let requester = create_test_profile(1, &["Valorant"], "PC", "NA", 0);

    let candidates = vec![
        create_test_profile(2, &["Valorant"], "PC", "NA", 10),
        create_test_profile(3, &["Valorant"], "PS5", "NA", 90),
        create_test_profile(4, &["Apex"], "PC", "EU", 0),
    ];

    let unfiltered = matcher.rank_suggestions(&requester, candidates.clone(), &HashSet::new(), &SuggestionFilters::default());
    let filters = SuggestionFilters {
        game: Some("Valorant".to_string()),
        ..Default::default()
    };
    let filtered = matcher.rank_suggestions(&requester, candidates, &HashSet::new(), &filters);

    assert_eq!(unfiltered.len(), 3);
    assert_eq!(filtered.len(), 2);

    for suggestion in &filtered {
        let baseline = unfiltered.iter().find(|s| s.id == suggestion.id).unwrap();
        assert_eq!(baseline.score, suggestion.score);
    }
}

#[test]
fn test_integration_ties_keep_input_order() {
    let matcher = Matcher::default();
    let requester = create_test_profile(1, &["Apex"], "PC", "NA", 0);

    let candidates: Vec<UserProfile> = (2..=6)
        .map(|id| create_test_profile(id, &["Apex"], "PC", "NA", 0))
        .collect();

    let results = matcher.rank_suggestions(&requester, candidates, &HashSet::new(), &SuggestionFilters::default());
    let ids: Vec<i64> = results.iter().map(|s| s.id).collect();

    assert_eq!(ids, vec![2, 3, 4, 5, 6]);
}

#[test]
fn test_integration_custom_weights() {
    let weights = ScoringWeights {
        region: 200,
        ..Default::default()
    };
    let matcher = Matcher::new(weights, ProfileWeights::default());
    let requester = create_test_profile(1, &["Apex"], "PC", "NA", 0);

    let candidates = vec![
        create_test_profile(2, &["Apex"], "PC", "EU", 100),
        create_test_profile(3, &[], "Switch", "NA", 0),
    ];

    let results = matcher.rank_suggestions(&requester, candidates, &HashSet::new(), &SuggestionFilters::default());
    assert_eq!(results[0].id, 3);
    assert_eq!(results[0].score, 200);
    assert_eq!(results[1].score, 150);
}

#[test]
fn test_integration_profile_matchmaking() {
    let matcher = Matcher::default();
    let mine = create_candidate(1, "Competitive", "Support", Some("Gold"), false).profile;

    let candidates = vec![
        create_candidate(1, "Competitive", "Support", Some("Gold"), false), // self
        create_candidate(2, "Casual", "Tank", None, false),                 // 0.2 + 0.3
        create_candidate(3, "Competitive", "Tank", Some("Gold"), false),    // 1.0
        create_candidate(4, "Competitive", "Tank", Some("Gold"), true),     // private
        create_candidate(5, "Competitive", "Support", Some("Silver"), false), // 0.3 + 0.2
    ];

    let results = matcher.rank_profiles(&mine, candidates, &MatchmakingFilters::default());
    let ids: Vec<i64> = results.iter().map(|m| m.user_id).collect();

    assert_eq!(ids, vec![3, 2, 5]);
    assert!((results[0].match_score - 1.0).abs() < 1e-9);
    assert!((results[1].match_score - 0.5).abs() < 1e-9);
    assert!((results[2].match_score - 0.5).abs() < 1e-9);

    let competitive_only = MatchmakingFilters {
        playstyle: Some("Competitive".to_string()),
        ..Default::default()
    };
    let candidates = vec![
        create_candidate(2, "Casual", "Tank", None, false),
        create_candidate(3, "Competitive", "Tank", Some("Gold"), false),
    ];
    let results = matcher.rank_profiles(&mine, candidates, &competitive_only);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].username, "player3");
}
