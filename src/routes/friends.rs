use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::{DetailResponse, FriendRequest, FriendStatus, UserId, UserResponse};
use crate::routes::{current_user, AppState, AuthenticatedUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/friends")
            .route("", web::get().to(list_friends))
            .route("/requests", web::get().to(incoming_requests))
            .route("/requests/{user_id}", web::post().to(send_request))
            .route("/requests/{request_id}/accept", web::post().to(accept_request))
            .route("/requests/{request_id}/reject", web::post().to(reject_request)),
    );
}

/// POST /friends/requests/{user_id}
async fn send_request(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<UserId>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    let target_id = path.into_inner();

    if target_id == user.id {
        return Err(ApiError::bad_request("Cannot send friend request to yourself"));
    }

    if state.store.get_user(target_id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    if let Some(existing) = state.store.find_request_between(user.id, target_id).await? {
        return Err(match existing.status {
            FriendStatus::Pending => ApiError::bad_request("Friend request already pending between you"),
            FriendStatus::Accepted => ApiError::bad_request("You are already friends with this user"),
        });
    }

    let request = state.store.create_friend_request(user.id, target_id).await?;
    tracing::info!("Friend request {} from {} to {}", request.id, user.id, target_id);

    Ok(HttpResponse::Created().json(request))
}

/// GET /friends/requests
///
/// Pending requests addressed to the caller.
async fn incoming_requests(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    let requests = state.store.incoming_requests(user.id).await?;

    Ok(HttpResponse::Ok().json(requests))
}

async fn accept_request(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    let request = pending_request_for(&state, path.into_inner(), user.id, "accept").await?;

    let accepted = state
        .store
        .set_request_status(request.id, FriendStatus::Accepted)
        .await?;

    Ok(HttpResponse::Ok().json(accepted))
}

async fn reject_request(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;
    let request = pending_request_for(&state, path.into_inner(), user.id, "reject").await?;

    state.store.delete_friend_request(request.id).await?;

    Ok(HttpResponse::Ok().json(DetailResponse::new("Friend request rejected")))
}

/// Look up a request that `receiver` may still act on
async fn pending_request_for(
    state: &AppState,
    request_id: i64,
    receiver: UserId,
    action: &str,
) -> Result<FriendRequest, ApiError> {
    let request = state
        .store
        .get_friend_request(request_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Friend request not found"))?;

    if request.to_user_id != receiver {
        return Err(ApiError::forbidden(format!(
            "Not authorized to {} this request",
            action
        )));
    }

    if request.status != FriendStatus::Pending {
        return Err(ApiError::bad_request("Friend request is not pending"));
    }

    Ok(request)
}

/// GET /friends
async fn list_friends(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, auth).await?;

    let friend_ids: Vec<UserId> = state
        .store
        .requests_involving(user.id)
        .await?
        .iter()
        .filter(|request| request.status == FriendStatus::Accepted)
        .map(|request| request.counterpart(user.id))
        .collect();

    let friends: Vec<UserResponse> = state
        .store
        .list_users_by_ids(&friend_ids)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(friends))
}
