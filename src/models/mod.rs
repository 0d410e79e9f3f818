// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Answers, FriendRequest, FriendStatus, GameProfile, GameProfileFields, LfgPost,
    MatchmakingFilters, NewUser, ProfileCandidate, ProfileChanges, ProfileMatch, ProfileWeights,
    ScoredSuggestion, ScoringWeights, SuggestionFilters, User, UserId, UserProfile,
};
pub use requests::{
    FeedbackRequest, GameProfileRequest, LfgCreateRequest, LoginRequest, ProfileEditRequest,
    QuizUpdateRequest, SignupRequest,
};
pub use responses::{
    DashboardStats, DetailResponse, ErrorResponse, HealthResponse, TokenResponse, UserResponse,
};
