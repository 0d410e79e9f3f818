// Core algorithm exports
pub mod feedback;
pub mod filters;
pub mod matcher;
pub mod matchmaking;
pub mod scoring;

pub use feedback::{apply_rating, MAX_FEEDBACK_SCORE};
pub use filters::{is_admissible, is_profile_admissible, matches_profile_filters, matches_suggestion_filters};
pub use matcher::Matcher;
pub use matchmaking::profile_match_score;
pub use scoring::{calculate_compatibility, matching_answer_count, roles_complement, shared_game_count, ROLE_GAME};
