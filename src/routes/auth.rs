use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{LoginRequest, NewUser, SignupRequest, TokenResponse, UserResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login_form))
            .route("/login/json", web::post().to(login_json)),
    );
}

/// POST /auth/signup
async fn signup(
    state: web::Data<AppState>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let req = req.into_inner();

    if state
        .store
        .find_by_username_or_email(&req.username, &req.email)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request("Username or email already registered"));
    }

    let passwords = state.passwords;
    let password = req.password;
    let hashed_password = web::block(move || passwords.hash(&password)).await??;

    let user = state
        .store
        .create_user(NewUser {
            username: req.username,
            email: req.email,
            hashed_password,
        })
        .await?;

    tracing::info!("Registered user {} ({})", user.id, user.username);

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// POST /auth/login (form-encoded, OAuth2 password style)
async fn login_form(
    state: web::Data<AppState>,
    form: web::Form<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    issue_token(&state, form.into_inner()).await
}

/// POST /auth/login/json
async fn login_json(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    issue_token(&state, req.into_inner()).await
}

async fn issue_token(state: &AppState, req: LoginRequest) -> Result<HttpResponse, ApiError> {
    let invalid = || ApiError::unauthorized("Invalid username or password");

    req.validate().map_err(|_| invalid())?;

    let user = state
        .store
        .find_by_username(&req.username)
        .await?
        .ok_or_else(invalid)?;

    let passwords = state.passwords;
    let hashed = user.hashed_password.clone();
    let password = req.password;
    let verified = web::block(move || passwords.verify(&password, &hashed))
        .await?
        // a malformed stored hash is treated like a wrong password
        .unwrap_or(false);

    if !verified {
        tracing::debug!("Failed login for {}", req.username);
        return Err(invalid());
    }

    let token = state.tokens.issue(user.id)?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}
