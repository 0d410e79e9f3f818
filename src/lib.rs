//! Tomolink - matchmaking backend for a gaming companion platform
//!
//! Users register, fill in a preference quiz and per-game profiles, manage
//! friends and receive ranked teammate suggestions. The ranking core in
//! [`core`] is pure and synchronous; everything else is actix-web handlers
//! over a [`services::Store`].

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_compatibility, profile_match_score, Matcher};
pub use error::ApiError;
pub use models::{ScoredSuggestion, ScoringWeights, UserProfile};
pub use routes::{configure_routes, AppState};
