use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tomolink::config::{LoggingSettings, Settings, DEV_SECRET_KEY};
use tomolink::core::Matcher;
use tomolink::models::{ProfileWeights, ScoringWeights};
use tomolink::routes::{configure_routes, AppState};
use tomolink::services::{PasswordHasher, PostgresStore, TokenService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_tracing(&settings.logging);

    info!("Starting Tomolink API...");

    if settings.auth.secret_key == DEV_SECRET_KEY {
        warn!("SECRET_KEY is not set, tokens are signed with the development key");
    }

    let store = PostgresStore::from_settings(&settings.database)
        .await
        .map_err(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?;

    info!(
        "PostgreSQL store initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let profile_weights = ProfileWeights::from(&settings.scoring.profile_weights);
    let matcher = Matcher::new(weights, profile_weights);

    info!("Matcher initialized with weights: {:?} {:?}", weights, profile_weights);

    let app_state = AppState {
        store: Arc::new(store),
        tokens: TokenService::new(
            &settings.auth.secret_key,
            settings.auth.access_token_expire_minutes,
        ),
        passwords: PasswordHasher::new(settings.auth.bcrypt_cost),
        matcher,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let origins = settings.server.cors_origins.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(build_cors(&origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

/// `LOG_LEVEL` and `LOG_FORMAT` take precedence over `[logging]`
fn init_tracing(logging: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}
