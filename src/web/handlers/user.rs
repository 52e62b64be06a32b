//! User handlers for the Web API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::user::{CreateUser, UserService};
use crate::web::dto::{ApiResponse, CreateUserRequest, UserListQuery, UserResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/users - Register an address for the caller.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = UserService::new(state.db.pool(), state.provision.clone())
        .create(
            &claims.identity(),
            &CreateUser {
                username: request.username,
                domain: request.domain,
                display_name: request.display_name,
                bio: request.bio,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(UserResponse::from(user))),
    ))
}

/// POST /api/users/ensure - Resolve the caller to a user, provisioning one
/// under the configured domain when absent.
pub async fn ensure_user(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = UserService::new(state.db.pool(), state.provision.clone())
        .ensure(&claims.identity())
        .await?;

    Ok(Json(ApiResponse::new(UserResponse::from(user))))
}

/// GET /api/users/me - The caller's registered user, or `null`.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<Option<UserResponse>>>, ApiError> {
    let user = UserService::new(state.db.pool(), state.provision.clone())
        .current(&claims.identity())
        .await?;

    Ok(Json(ApiResponse::new(user.map(UserResponse::from))))
}

/// GET /api/users - List users, optionally filtered by `?q=` substring.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Query(query): Query<UserListQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    let svc = UserService::new(state.db.pool(), state.provision.clone());
    let users = match query.q.as_deref() {
        Some(q) => svc.search(q).await?,
        None => svc.list().await?,
    };

    Ok(Json(ApiResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/users/:username/:domain - Look up a user by address pair.
///
/// The body data is `null` when no user owns the address.
pub async fn get_by_address(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path((username, domain)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Option<UserResponse>>>, ApiError> {
    let user = UserService::new(state.db.pool(), state.provision.clone())
        .get_by_address(&username, &domain)
        .await?;

    Ok(Json(ApiResponse::new(user.map(UserResponse::from))))
}
