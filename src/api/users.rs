//! User endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Router,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CreateUserApiRequest, Json, MessageResponse, UpdateAgeApiRequest, UserResponse,
};

/// Create the user router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{user_id}", get(get_user).delete(delete_user))
        .route("/users/{user_id}/age", patch(update_user_age))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!("Listing users");

    let users = state.user_service.list_users().await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(email = %request.email, "Creating user");

    let user = state.user_service.create_user(request.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Getting user");

    let user = state.user_service.get_user_by_id(&user_id).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(user_id = %user_id, "Deleting user");

    state.user_service.delete_user(&user_id).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// PATCH /users/{user_id}/age
pub async fn update_user_age(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateAgeApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, age = request.age, "Updating user age");

    let user = state
        .user_service
        .update_user_age(&user_id, request.age)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}
