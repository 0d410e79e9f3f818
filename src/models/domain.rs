use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Primary key of the `users` table
pub type UserId = i64;

/// Free-form quiz or preference answers keyed by question id
pub type Answers = BTreeMap<String, String>;

/// Registered account as stored in the `users` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    #[serde(default)]
    pub quiz_answers: Option<Answers>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub games: Option<Vec<String>>,
    #[serde(default)]
    pub overwatch_role: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub feedback_score: i32,
    #[serde(default)]
    pub feedback_count: i32,
}

/// Fields required to insert a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
}

/// Partial profile update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub platform: Option<String>,
    pub region: Option<String>,
    pub games: Option<Vec<String>>,
    pub overwatch_role: Option<String>,
    pub is_private: Option<bool>,
}

/// Read-only view of a user consumed by the compatibility scorer
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    /// Games in the order the user listed them. Compared as a set.
    pub games: Vec<String>,
    pub platform: Option<String>,
    pub region: Option<String>,
    pub quiz_answers: Answers,
    pub feedback_score: Option<i32>,
    pub overwatch_role: Option<String>,
    pub is_private: bool,
}

impl UserProfile {
    /// Platform label, treating an empty string as unset
    pub fn platform(&self) -> Option<&str> {
        non_empty(self.platform.as_deref())
    }

    /// Region label, treating an empty string as unset
    pub fn region(&self) -> Option<&str> {
        non_empty(self.region.as_deref())
    }

    /// Role label, treating an empty string as unset
    pub fn role(&self) -> Option<&str> {
        non_empty(self.overwatch_role.as_deref())
    }

    pub fn plays(&self, game: &str) -> bool {
        self.games.iter().any(|g| g == game)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            games: user.games.unwrap_or_default(),
            platform: user.platform,
            region: user.region,
            quiz_answers: user.quiz_answers.unwrap_or_default(),
            feedback_score: Some(user.feedback_score),
            overwatch_role: user.overwatch_role,
            is_private: user.is_private,
        }
    }
}

/// Friend request lifecycle, stored as the `friend_status` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "friend_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendStatus {
    Pending,
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FriendRequest {
    pub id: i64,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub status: FriendStatus,
}

impl FriendRequest {
    /// The user on the other side of this request from `user_id`
    pub fn counterpart(&self, user_id: UserId) -> UserId {
        if self.from_user_id == user_id {
            self.to_user_id
        } else {
            self.from_user_id
        }
    }
}

/// Looking-for-group post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LfgPost {
    pub id: i64,
    pub user_id: UserId,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Per-game matchmaking profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameProfile {
    pub id: i64,
    pub user_id: UserId,
    pub game_type: String,
    pub playstyle: String,
    pub communication_preference: String,
    pub role_preference: String,
    pub rank: Option<String>,
    pub additional_preferences: Option<Answers>,
}

/// Editable part of a game profile
#[derive(Debug, Clone)]
pub struct GameProfileFields {
    pub playstyle: String,
    pub communication_preference: String,
    pub role_preference: String,
    pub rank: Option<String>,
    pub additional_preferences: Option<Answers>,
}

/// Another user's game profile considered by per-game matchmaking
#[derive(Debug, Clone)]
pub struct ProfileCandidate {
    pub profile: GameProfile,
    pub username: String,
    pub is_private: bool,
}

/// Optional exact-match pre-filters for suggestions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionFilters {
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

/// Optional filters for per-game matchmaking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchmakingFilters {
    #[serde(default)]
    pub playstyle: Option<String>,
    #[serde(default)]
    pub communication_preference: Option<String>,
    #[serde(default)]
    pub role_preference: Option<String>,
    #[serde(default)]
    pub min_rank: Option<String>,
    #[serde(default)]
    pub max_rank: Option<String>,
}

/// Ranked suggestion returned by `/suggestions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSuggestion {
    pub id: UserId,
    pub username: String,
    pub platform: Option<String>,
    pub region: Option<String>,
    pub games: Vec<String>,
    pub overwatch_role: Option<String>,
    pub score: u32,
}

/// Ranked game-profile match returned by `/matchmaking/{game_type}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMatch {
    pub user_id: UserId,
    pub username: String,
    pub game_type: String,
    pub playstyle: String,
    pub communication_preference: String,
    pub role_preference: String,
    pub rank: Option<String>,
    pub match_score: f64,
}

/// Compatibility weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub shared_game: u32,
    pub platform: u32,
    pub region: u32,
    pub feedback_cap: u32,
    pub quiz_answer: u32,
    pub role_complement: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            shared_game: 30,
            platform: 20,
            region: 20,
            feedback_cap: 100,
            quiz_answer: 5,
            role_complement: 10,
        }
    }
}

/// Game-profile match weights, summing to 1.0 by default
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileWeights {
    pub playstyle: f64,
    pub communication: f64,
    pub role: f64,
    pub rank: f64,
}

impl Default for ProfileWeights {
    fn default() -> Self {
        Self {
            playstyle: 0.3,
            communication: 0.2,
            role: 0.3,
            rank: 0.2,
        }
    }
}
