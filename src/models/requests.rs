use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Answers, GameProfileFields, ProfileChanges};

/// Request to register a new account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Credentials for both the form and the JSON login endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Full replacement of the quiz answers, e.g. `{"q1": "Aggressive"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizUpdateRequest {
    pub answers: Answers,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileEditRequest {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub games: Option<Vec<String>>,
    #[serde(default)]
    pub overwatch_role: Option<String>,
    #[serde(default)]
    pub is_private: Option<bool>,
}

impl ProfileEditRequest {
    /// Only non-empty values overwrite what is stored
    pub fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            platform: self.platform.filter(|p| !p.is_empty()),
            region: self.region.filter(|r| !r.is_empty()),
            games: self.games.filter(|g| !g.is_empty()),
            overwatch_role: self.overwatch_role.filter(|r| !r.is_empty()),
            is_private: self.is_private,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LfgCreateRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Body of `POST /profiles/{game_type}`. The game comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GameProfileRequest {
    #[validate(length(min = 1))]
    pub playstyle: String,
    #[validate(length(min = 1))]
    pub communication_preference: String,
    #[validate(length(min = 1))]
    pub role_preference: String,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub additional_preferences: Option<Answers>,
}

impl From<GameProfileRequest> for GameProfileFields {
    fn from(req: GameProfileRequest) -> Self {
        Self {
            playstyle: req.playstyle,
            communication_preference: req.communication_preference,
            role_preference: req.role_preference,
            rank: req.rank,
            additional_preferences: req.additional_preferences,
        }
    }
}
