use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Answers, FriendRequest, FriendStatus, GameProfile, GameProfileFields, LfgPost, NewUser,
    ProfileCandidate, ProfileChanges, User, UserId,
};

/// Errors that can occur when reading or writing persistent state
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Accounts and their profile data
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Every user except `id`, ordered by id
    async fn list_users_except(&self, id: UserId) -> Result<Vec<User>, StoreError>;

    async fn list_users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError>;

    async fn update_quiz_answers(&self, id: UserId, answers: &Answers) -> Result<User, StoreError>;

    async fn update_profile(&self, id: UserId, changes: &ProfileChanges) -> Result<User, StoreError>;

    async fn update_feedback(&self, id: UserId, score: i32, count: i32) -> Result<(), StoreError>;

    async fn count_users(&self) -> Result<i64, StoreError>;
}

/// Friend requests and accepted friendships
#[async_trait]
pub trait FriendRepository: Send + Sync {
    async fn create_friend_request(
        &self,
        from_user_id: UserId,
        to_user_id: UserId,
    ) -> Result<FriendRequest, StoreError>;

    async fn get_friend_request(&self, id: i64) -> Result<Option<FriendRequest>, StoreError>;

    /// Any request between the two users, in either direction
    async fn find_request_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<FriendRequest>, StoreError>;

    async fn set_request_status(
        &self,
        id: i64,
        status: FriendStatus,
    ) -> Result<FriendRequest, StoreError>;

    async fn delete_friend_request(&self, id: i64) -> Result<(), StoreError>;

    /// Pending requests addressed to `user_id`
    async fn incoming_requests(&self, user_id: UserId) -> Result<Vec<FriendRequest>, StoreError>;

    /// Requests of any status sent or received by `user_id`
    async fn requests_involving(&self, user_id: UserId) -> Result<Vec<FriendRequest>, StoreError>;

    async fn count_accepted(&self) -> Result<i64, StoreError>;
}

#[async_trait]
pub trait LfgRepository: Send + Sync {
    async fn create_post(&self, user_id: UserId, content: &str) -> Result<LfgPost, StoreError>;

    /// All posts, newest first
    async fn list_posts(&self) -> Result<Vec<LfgPost>, StoreError>;
}

#[async_trait]
pub trait GameProfileRepository: Send + Sync {
    /// Insert or replace the user's profile for `game_type`
    async fn upsert_game_profile(
        &self,
        user_id: UserId,
        game_type: &str,
        fields: &GameProfileFields,
    ) -> Result<GameProfile, StoreError>;

    async fn get_game_profile(
        &self,
        user_id: UserId,
        game_type: &str,
    ) -> Result<Option<GameProfile>, StoreError>;

    async fn list_game_profiles(&self, user_id: UserId) -> Result<Vec<GameProfile>, StoreError>;

    /// Returns whether a profile was removed
    async fn delete_game_profile(&self, user_id: UserId, game_type: &str) -> Result<bool, StoreError>;

    /// Every profile for `game_type` with its owner's name and visibility, ordered by profile id
    async fn profiles_for_game(&self, game_type: &str) -> Result<Vec<ProfileCandidate>, StoreError>;
}

/// Everything the HTTP layer needs from persistence
#[async_trait]
pub trait Store: UserRepository + FriendRepository + LfgRepository + GameProfileRepository {
    async fn health_check(&self) -> Result<bool, StoreError>;
}
