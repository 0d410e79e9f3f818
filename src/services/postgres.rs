use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;
use crate::models::{
    Answers, FriendRequest, FriendStatus, GameProfile, GameProfileFields, LfgPost, NewUser,
    ProfileCandidate, ProfileChanges, User, UserId,
};
use crate::services::store::{
    FriendRepository, GameProfileRepository, LfgRepository, Store, StoreError, UserRepository,
};

const USER_COLUMNS: &str = "id, username, email, hashed_password, quiz_answers, platform, region, \
     games, overwatch_role, is_private, feedback_score, feedback_count";

const FRIEND_REQUEST_COLUMNS: &str = "id, from_user_id, to_user_id, status";

const GAME_PROFILE_COLUMNS: &str = "id, user_id, game_type, playstyle, communication_preference, \
     role_preference, rank, additional_preferences";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    hashed_password: String,
    quiz_answers: Option<Json<Answers>>,
    platform: Option<String>,
    region: Option<String>,
    games: Option<Json<Vec<String>>>,
    overwatch_role: Option<String>,
    is_private: bool,
    feedback_score: i32,
    feedback_count: i32,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            hashed_password: row.hashed_password,
            quiz_answers: row.quiz_answers.map(|a| a.0),
            platform: row.platform,
            region: row.region,
            games: row.games.map(|g| g.0),
            overwatch_role: row.overwatch_role,
            is_private: row.is_private,
            feedback_score: row.feedback_score,
            feedback_count: row.feedback_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GameProfileRow {
    id: i64,
    user_id: i64,
    game_type: String,
    playstyle: String,
    communication_preference: String,
    role_preference: String,
    rank: Option<String>,
    additional_preferences: Option<Json<Answers>>,
}

impl From<GameProfileRow> for GameProfile {
    fn from(row: GameProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            game_type: row.game_type,
            playstyle: row.playstyle,
            communication_preference: row.communication_preference,
            role_preference: row.role_preference,
            rank: row.rank,
            additional_preferences: row.additional_preferences.map(|a| a.0),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileCandidateRow {
    #[sqlx(flatten)]
    profile: GameProfileRow,
    username: String,
    is_private: bool,
}

/// Map a unique-constraint violation to [`StoreError::Conflict`]
fn conflict_or(err: sqlx::Error, what: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(what.to_string());
        }
    }
    err.into()
}

/// PostgreSQL-backed store
///
/// Owns the connection pool and runs the embedded migrations on connect.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect with explicit pool limits and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Connect using the `[database]` configuration section
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!(
            "Connecting to PostgreSQL (max: {} connections)",
            settings.max_connections.unwrap_or(10)
        );

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(10),
            settings.min_connections.unwrap_or(1),
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(settings.idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (username, email, hashed_password) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );

        let row: UserRow = sqlx::query_as(&query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.hashed_password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_or(e, "Username or email already registered"))?;

        tracing::debug!("Created user {} ({})", row.id, row.username);
        Ok(row.into())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);

        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        let query = format!(
            "SELECT {} FROM users WHERE username = $1 OR email = $2 LIMIT 1",
            USER_COLUMNS
        );

        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn list_users_except(&self, id: UserId) -> Result<Vec<User>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id <> $1 ORDER BY id", USER_COLUMNS);

        let rows: Vec<UserRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn list_users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!("SELECT {} FROM users WHERE id = ANY($1) ORDER BY id", USER_COLUMNS);

        let rows: Vec<UserRow> = sqlx::query_as(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update_quiz_answers(&self, id: UserId, answers: &Answers) -> Result<User, StoreError> {
        let query = format!(
            "UPDATE users SET quiz_answers = $2 WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );

        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(id)
            .bind(Json(answers))
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::from)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))
    }

    async fn update_profile(&self, id: UserId, changes: &ProfileChanges) -> Result<User, StoreError> {
        let query = format!(
            r#"
            UPDATE users SET
                platform = COALESCE($2, platform),
                region = COALESCE($3, region),
                games = COALESCE($4, games),
                overwatch_role = COALESCE($5, overwatch_role),
                is_private = COALESCE($6, is_private)
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(id)
            .bind(changes.platform.as_deref())
            .bind(changes.region.as_deref())
            .bind(changes.games.as_ref().map(Json))
            .bind(changes.overwatch_role.as_deref())
            .bind(changes.is_private)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::from)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))
    }

    async fn update_feedback(&self, id: UserId, score: i32, count: i32) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users SET feedback_score = $2, feedback_count = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(score)
        .bind(count)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl FriendRepository for PostgresStore {
    async fn create_friend_request(
        &self,
        from_user_id: UserId,
        to_user_id: UserId,
    ) -> Result<FriendRequest, StoreError> {
        let query = format!(
            "INSERT INTO friend_requests (from_user_id, to_user_id, status) VALUES ($1, $2, $3) RETURNING {}",
            FRIEND_REQUEST_COLUMNS
        );

        let request: FriendRequest = sqlx::query_as(&query)
            .bind(from_user_id)
            .bind(to_user_id)
            .bind(FriendStatus::Pending)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_or(e, "Friend request already exists"))?;

        tracing::debug!("Friend request {}: {} -> {}", request.id, from_user_id, to_user_id);
        Ok(request)
    }

    async fn get_friend_request(&self, id: i64) -> Result<Option<FriendRequest>, StoreError> {
        let query = format!("SELECT {} FROM friend_requests WHERE id = $1", FRIEND_REQUEST_COLUMNS);

        let request = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    async fn find_request_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<FriendRequest>, StoreError> {
        let query = format!(
            r#"
            SELECT {}
            FROM friend_requests
            WHERE (from_user_id = $1 AND to_user_id = $2)
               OR (from_user_id = $2 AND to_user_id = $1)
            ORDER BY id
            LIMIT 1
            "#,
            FRIEND_REQUEST_COLUMNS
        );

        let request = sqlx::query_as(&query)
            .bind(a)
            .bind(b)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    async fn set_request_status(
        &self,
        id: i64,
        status: FriendStatus,
    ) -> Result<FriendRequest, StoreError> {
        let query = format!(
            "UPDATE friend_requests SET status = $2 WHERE id = $1 RETURNING {}",
            FRIEND_REQUEST_COLUMNS
        );

        let request: Option<FriendRequest> = sqlx::query_as(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;

        request.ok_or_else(|| StoreError::NotFound(format!("friend request {}", id)))
    }

    async fn delete_friend_request(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM friend_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("friend request {}", id)));
        }
        Ok(())
    }

    async fn incoming_requests(&self, user_id: UserId) -> Result<Vec<FriendRequest>, StoreError> {
        let query = format!(
            "SELECT {} FROM friend_requests WHERE to_user_id = $1 AND status = $2 ORDER BY id",
            FRIEND_REQUEST_COLUMNS
        );

        let requests = sqlx::query_as(&query)
            .bind(user_id)
            .bind(FriendStatus::Pending)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    async fn requests_involving(&self, user_id: UserId) -> Result<Vec<FriendRequest>, StoreError> {
        let query = format!(
            "SELECT {} FROM friend_requests WHERE from_user_id = $1 OR to_user_id = $1 ORDER BY id",
            FRIEND_REQUEST_COLUMNS
        );

        let requests = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    async fn count_accepted(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM friend_requests WHERE status = $1")
            .bind(FriendStatus::Accepted)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl LfgRepository for PostgresStore {
    async fn create_post(&self, user_id: UserId, content: &str) -> Result<LfgPost, StoreError> {
        let post = sqlx::query_as(
            "INSERT INTO lfg_posts (user_id, content) VALUES ($1, $2) RETURNING id, user_id, content, created_at",
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<LfgPost>, StoreError> {
        let posts = sqlx::query_as(
            "SELECT id, user_id, content, created_at FROM lfg_posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }
}

#[async_trait]
impl GameProfileRepository for PostgresStore {
    async fn upsert_game_profile(
        &self,
        user_id: UserId,
        game_type: &str,
        fields: &GameProfileFields,
    ) -> Result<GameProfile, StoreError> {
        let query = format!(
            r#"
            INSERT INTO game_profiles
                (user_id, game_type, playstyle, communication_preference, role_preference, rank, additional_preferences)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, game_type)
            DO UPDATE SET
                playstyle = EXCLUDED.playstyle,
                communication_preference = EXCLUDED.communication_preference,
                role_preference = EXCLUDED.role_preference,
                rank = EXCLUDED.rank,
                additional_preferences = EXCLUDED.additional_preferences
            RETURNING {}
            "#,
            GAME_PROFILE_COLUMNS
        );

        let row: GameProfileRow = sqlx::query_as(&query)
            .bind(user_id)
            .bind(game_type)
            .bind(&fields.playstyle)
            .bind(&fields.communication_preference)
            .bind(&fields.role_preference)
            .bind(fields.rank.as_deref())
            .bind(fields.additional_preferences.as_ref().map(Json))
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn get_game_profile(
        &self,
        user_id: UserId,
        game_type: &str,
    ) -> Result<Option<GameProfile>, StoreError> {
        let query = format!(
            "SELECT {} FROM game_profiles WHERE user_id = $1 AND game_type = $2",
            GAME_PROFILE_COLUMNS
        );

        let row: Option<GameProfileRow> = sqlx::query_as(&query)
            .bind(user_id)
            .bind(game_type)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(GameProfile::from))
    }

    async fn list_game_profiles(&self, user_id: UserId) -> Result<Vec<GameProfile>, StoreError> {
        let query = format!(
            "SELECT {} FROM game_profiles WHERE user_id = $1 ORDER BY id",
            GAME_PROFILE_COLUMNS
        );

        let rows: Vec<GameProfileRow> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(GameProfile::from).collect())
    }

    async fn delete_game_profile(&self, user_id: UserId, game_type: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM game_profiles WHERE user_id = $1 AND game_type = $2")
            .bind(user_id)
            .bind(game_type)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn profiles_for_game(&self, game_type: &str) -> Result<Vec<ProfileCandidate>, StoreError> {
        let rows: Vec<ProfileCandidateRow> = sqlx::query_as(
            r#"
            SELECT gp.id, gp.user_id, gp.game_type, gp.playstyle, gp.communication_preference,
                   gp.role_preference, gp.rank, gp.additional_preferences,
                   u.username, u.is_private
            FROM game_profiles gp
            JOIN users u ON u.id = gp.user_id
            WHERE gp.game_type = $1
            ORDER BY gp.id
            "#,
        )
        .bind(game_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ProfileCandidate {
                profile: row.profile.into(),
                username: row.username,
                is_private: row.is_private,
            })
            .collect())
    }
}

#[async_trait]
impl Store for PostgresStore {
    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
