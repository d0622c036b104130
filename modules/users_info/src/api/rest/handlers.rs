use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use tracing::info;

use crate::api::rest::body::UserBody;
use crate::api::rest::dto::{ErrorDto, UserDto, UserReq};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

/// Lenient integer parse of a path id: leading whitespace is skipped, a `+`
/// sign is allowed and the leading run of digits is used, so `"12abc"` is 12.
/// Anything that does not start with a positive integer names no user.
pub fn parse_user_id(raw: &str) -> Option<u64> {
    let s = raw.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().ok().filter(|id| *id > 0)
}

fn user_id(raw: &str) -> Result<u64, ApiError> {
    parse_user_id(raw).ok_or(ApiError::NotFound)
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    operation_id = "users_info.list_users",
    responses(
        (status = 200, description = "All users in insertion order", body = [UserDto]),
        (status = 500, description = "Internal Server Error", body = ErrorDto)
    )
)]
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    info!("Listing users");

    let users = svc.list_users().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    operation_id = "users_info.get_user",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal Server Error", body = ErrorDto)
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserDto>, ApiError> {
    info!("Getting user with id: {}", raw_id);

    let id = user_id(&raw_id)?;
    let user = svc.get_user(id).await?;
    Ok(Json(UserDto::from(user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    operation_id = "users_info.create_user",
    request_body = UserReq,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 400, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal Server Error", body = ErrorDto)
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    UserBody(draft): UserBody,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    info!("Creating user");

    let user = svc.create_user(draft).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Replace an existing user's name, email and age
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    operation_id = "users_info.update_user",
    params(("id" = u64, Path, description = "User ID")),
    request_body = UserReq,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Validation failed", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal Server Error", body = ErrorDto)
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
    UserBody(draft): UserBody,
) -> Result<Json<UserDto>, ApiError> {
    info!("Updating user {}", raw_id);

    let id = user_id(&raw_id)?;
    let user = svc.update_user(id, draft).await?;
    Ok(Json(UserDto::from(user)))
}

/// Delete a user by ID
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    operation_id = "users_info.delete_user",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal Server Error", body = ErrorDto)
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("Deleting user: {}", raw_id);

    let id = user_id(&raw_id)?;
    svc.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
