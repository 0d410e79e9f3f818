// Route exports
pub mod auth;
pub mod dashboard;
pub mod extract;
pub mod feedback;
pub mod friends;
pub mod health;
pub mod lfg;
pub mod matchmaking;
pub mod profiles;
pub mod suggestions;
pub mod user;

use actix_web::web;
use std::sync::Arc;

use crate::core::Matcher;
use crate::error::{handle_form_error, handle_json_payload_error, handle_path_error, handle_query_payload_error};
use crate::services::{PasswordHasher, Store, TokenService};

pub use extract::{current_user, AuthenticatedUser};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
    pub passwords: PasswordHasher,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error))
        .app_data(web::FormConfig::default().error_handler(handle_form_error))
        .configure(health::configure)
        .configure(auth::configure)
        .configure(user::configure)
        .configure(suggestions::configure)
        .configure(friends::configure)
        .configure(lfg::configure)
        .configure(feedback::configure)
        .configure(dashboard::configure)
        .configure(profiles::configure)
        .configure(matchmaking::configure);
}
