use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{
    Answers, FriendRequest, FriendStatus, GameProfile, GameProfileFields, LfgPost, NewUser,
    ProfileCandidate, ProfileChanges, User, UserId,
};
use crate::services::store::{
    FriendRepository, GameProfileRepository, LfgRepository, Store, StoreError, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    friend_requests: Vec<FriendRequest>,
    lfg_posts: Vec<LfgPost>,
    game_profiles: Vec<GameProfile>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user_mut(&mut self, id: UserId) -> Result<&mut User, StoreError> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))
    }
}

/// In-process store with the same constraints as the Postgres schema
///
/// Ids come from a single sequence shared by all tables. Intended for tests
/// and local experiments; nothing is persisted.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        if tables
            .users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(StoreError::Conflict(
                "Username or email already registered".to_string(),
            ));
        }

        let created = User {
            id: tables.next_id(),
            username: user.username,
            email: user.email,
            hashed_password: user.hashed_password,
            quiz_answers: None,
            platform: None,
            region: None,
            games: None,
            overwatch_role: None,
            is_private: false,
            feedback_score: 0,
            feedback_count: 0,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn list_users_except(&self, id: UserId) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().filter(|u| u.id != id).cloned().collect())
    }

    async fn list_users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn update_quiz_answers(&self, id: UserId, answers: &Answers) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(id)?;
        user.quiz_answers = Some(answers.clone());
        Ok(user.clone())
    }

    async fn update_profile(&self, id: UserId, changes: &ProfileChanges) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(id)?;

        if let Some(platform) = &changes.platform {
            user.platform = Some(platform.clone());
        }
        if let Some(region) = &changes.region {
            user.region = Some(region.clone());
        }
        if let Some(games) = &changes.games {
            user.games = Some(games.clone());
        }
        if let Some(role) = &changes.overwatch_role {
            user.overwatch_role = Some(role.clone());
        }
        if let Some(is_private) = changes.is_private {
            user.is_private = is_private;
        }

        Ok(user.clone())
    }

    async fn update_feedback(&self, id: UserId, score: i32, count: i32) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(id)?;
        user.feedback_score = score;
        user.feedback_count = count;
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.len() as i64)
    }
}

#[async_trait]
impl FriendRepository for MemoryStore {
    async fn create_friend_request(
        &self,
        from_user_id: UserId,
        to_user_id: UserId,
    ) -> Result<FriendRequest, StoreError> {
        let mut tables = self.tables.write().await;

        if tables
            .friend_requests
            .iter()
            .any(|r| {
                (r.from_user_id == from_user_id && r.to_user_id == to_user_id)
                    || (r.from_user_id == to_user_id && r.to_user_id == from_user_id)
            })
        {
            return Err(StoreError::Conflict("Friend request already exists".to_string()));
        }

        let request = FriendRequest {
            id: tables.next_id(),
            from_user_id,
            to_user_id,
            status: FriendStatus::Pending,
        };
        tables.friend_requests.push(request.clone());
        Ok(request)
    }

    async fn get_friend_request(&self, id: i64) -> Result<Option<FriendRequest>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.friend_requests.iter().find(|r| r.id == id).cloned())
    }

    async fn find_request_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<FriendRequest>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .friend_requests
            .iter()
            .find(|r| {
                (r.from_user_id == a && r.to_user_id == b)
                    || (r.from_user_id == b && r.to_user_id == a)
            })
            .cloned())
    }

    async fn set_request_status(
        &self,
        id: i64,
        status: FriendStatus,
    ) -> Result<FriendRequest, StoreError> {
        let mut tables = self.tables.write().await;
        let request = tables
            .friend_requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("friend request {}", id)))?;

        request.status = status;
        Ok(request.clone())
    }

    async fn delete_friend_request(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.friend_requests.len();
        tables.friend_requests.retain(|r| r.id != id);

        if tables.friend_requests.len() == before {
            return Err(StoreError::NotFound(format!("friend request {}", id)));
        }
        Ok(())
    }

    async fn incoming_requests(&self, user_id: UserId) -> Result<Vec<FriendRequest>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .friend_requests
            .iter()
            .filter(|r| r.to_user_id == user_id && r.status == FriendStatus::Pending)
            .cloned()
            .collect())
    }

    async fn requests_involving(&self, user_id: UserId) -> Result<Vec<FriendRequest>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .friend_requests
            .iter()
            .filter(|r| r.from_user_id == user_id || r.to_user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_accepted(&self) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .friend_requests
            .iter()
            .filter(|r| r.status == FriendStatus::Accepted)
            .count() as i64)
    }
}

#[async_trait]
impl LfgRepository for MemoryStore {
    async fn create_post(&self, user_id: UserId, content: &str) -> Result<LfgPost, StoreError> {
        let mut tables = self.tables.write().await;
        let post = LfgPost {
            id: tables.next_id(),
            user_id,
            content: content.to_string(),
            created_at: chrono::Utc::now(),
        };
        tables.lfg_posts.push(post.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<LfgPost>, StoreError> {
        let tables = self.tables.read().await;
        let mut posts = tables.lfg_posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }
}

#[async_trait]
impl GameProfileRepository for MemoryStore {
    async fn upsert_game_profile(
        &self,
        user_id: UserId,
        game_type: &str,
        fields: &GameProfileFields,
    ) -> Result<GameProfile, StoreError> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables
            .game_profiles
            .iter_mut()
            .find(|p| p.user_id == user_id && p.game_type == game_type)
        {
            existing.playstyle = fields.playstyle.clone();
            existing.communication_preference = fields.communication_preference.clone();
            existing.role_preference = fields.role_preference.clone();
            existing.rank = fields.rank.clone();
            existing.additional_preferences = fields.additional_preferences.clone();
            return Ok(existing.clone());
        }

        let profile = GameProfile {
            id: tables.next_id(),
            user_id,
            game_type: game_type.to_string(),
            playstyle: fields.playstyle.clone(),
            communication_preference: fields.communication_preference.clone(),
            role_preference: fields.role_preference.clone(),
            rank: fields.rank.clone(),
            additional_preferences: fields.additional_preferences.clone(),
        };
        tables.game_profiles.push(profile.clone());
        Ok(profile)
    }

    async fn get_game_profile(
        &self,
        user_id: UserId,
        game_type: &str,
    ) -> Result<Option<GameProfile>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .game_profiles
            .iter()
            .find(|p| p.user_id == user_id && p.game_type == game_type)
            .cloned())
    }

    async fn list_game_profiles(&self, user_id: UserId) -> Result<Vec<GameProfile>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .game_profiles
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_game_profile(&self, user_id: UserId, game_type: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.game_profiles.len();
        tables
            .game_profiles
            .retain(|p| !(p.user_id == user_id && p.game_type == game_type));
        Ok(tables.game_profiles.len() < before)
    }

    async fn profiles_for_game(&self, game_type: &str) -> Result<Vec<ProfileCandidate>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .game_profiles
            .iter()
            .filter(|p| p.game_type == game_type)
            .filter_map(|p| {
                tables.users.iter().find(|u| u.id == p.user_id).map(|u| ProfileCandidate {
                    profile: p.clone(),
                    username: u.username.clone(),
                    is_private: u.is_private,
                })
            })
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
