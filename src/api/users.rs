//! User resource handlers.
//!
//! ```text
//! POST   /api/users/      {"username","email","password","role"}
//! GET    /api/users/{id}
//! PUT    /api/users/{id}  any subset of the create fields
//! DELETE /api/users/{id}
//! ```
//!
//! Each handler makes exactly one store call and maps its outcome to one
//! response. Not-found paths return immediately.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::error::{ApiError, MessageBody, MsgBody};
use crate::api::server::AppState;
use crate::db::error::StoreError;
use crate::db::models::{User, UserFields};

pub const CREATE_FAILED: &str = "Error while creating the user!!";
pub const USER_NOT_FOUND: &str = "User not found";
pub const DELETE_NOT_FOUND: &str = "Error while deleting the user";
pub const USER_DELETED: &str = "User deleted successfully";

/// Why a create failed. Both kinds render the same generic body.
#[derive(Debug)]
enum CreateFailure {
    Validation(String),
    Store(StoreError),
}

impl From<StoreError> for CreateFailure {
    fn from(e: StoreError) -> Self {
        if e.is_validation() {
            Self::Validation(e.to_string())
        } else {
            Self::Store(e)
        }
    }
}

impl From<CreateFailure> for ApiError {
    fn from(failure: CreateFailure) -> Self {
        match &failure {
            CreateFailure::Validation(reason) => warn!(%reason, "Rejected user creation"),
            CreateFailure::Store(e) => error!(error = %e, "Failed to create user"),
        }
        ApiError::BadRequest(CREATE_FAILED.to_string())
    }
}

/// Create a new user and add it to the store.
#[utoipa::path(
    post,
    path = "/api/users/",
    request_body = UserFields,
    responses(
        (status = 201, description = "User created successfully.", body = User),
        (status = 400, description = "Bad request.", body = MsgBody),
    ),
    tag = "users",
    operation_id = "createUser"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserFields>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(fields) =
        payload.map_err(|rejection| CreateFailure::Validation(rejection.body_text()))?;

    let user = state
        .users
        .create(fields)
        .await
        .map_err(CreateFailure::from)?;

    info!(id = %user.id, "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Retrieve a user by id.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "ID of the user to retrieve.")),
    responses(
        (status = 200, description = "The requested user.", body = User),
        (status = 404, description = "User not found.", body = MessageBody),
        (status = 500, description = "Internal server error.", body = MsgBody),
    ),
    tag = "users",
    operation_id = "getUserById"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    match state.users.find_by_id(&id).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => {
            warn!(%id, "User not found");
            Err(ApiError::NotFound(USER_NOT_FOUND))
        }
        Err(e) => {
            error!(%id, error = %e, "Failed to get user");
            Err(ApiError::Internal(e.to_string()))
        }
    }
}

/// Update an existing user by id. Fields left out of the body keep their
/// stored values.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "ID of the user to update.")),
    request_body = UserFields,
    responses(
        (status = 200, description = "User updated successfully.", body = User),
        (status = 400, description = "Bad request.", body = MsgBody),
        (status = 404, description = "User not found.", body = MessageBody),
    ),
    tag = "users",
    operation_id = "updateUser"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UserFields>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(patch) = payload.map_err(|rejection| {
        warn!(%id, error = %rejection, "Rejected update body");
        ApiError::BadRequest(rejection.body_text())
    })?;

    match state.users.update_by_id(&id, patch).await {
        Ok(Some(user)) => {
            info!(%id, "Updated user");
            Ok(Json(user))
        }
        Ok(None) => {
            warn!(%id, "User not found for update");
            Err(ApiError::NotFound(USER_NOT_FOUND))
        }
        Err(e) => {
            error!(%id, error = %e, "Failed to update user");
            Err(ApiError::BadRequest(e.to_string()))
        }
    }
}

/// Delete a user by id.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "ID of the user to delete.")),
    responses(
        (status = 200, description = "User deleted successfully.", body = MsgBody),
        (status = 404, description = "User not found.", body = MessageBody),
        (status = 500, description = "Internal server error.", body = MsgBody),
    ),
    tag = "users",
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MsgBody>, ApiError> {
    match state.users.delete_by_id(&id).await {
        Ok(Some(user)) => {
            info!(id = %user.id, username = %user.username, "Deleted user");
            Ok(Json(MsgBody {
                msg: USER_DELETED.to_string(),
            }))
        }
        Ok(None) => {
            warn!(%id, "User not found for delete");
            Err(ApiError::NotFound(DELETE_NOT_FOUND))
        }
        Err(e) => {
            error!(%id, error = %e, "Failed to delete user");
            Err(ApiError::Internal(e.to_string()))
        }
    }
}
