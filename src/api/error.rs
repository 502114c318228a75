use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body carrying raw error text, or a confirmation, under `msg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MsgBody {
    pub msg: String,
}

/// Body carrying a fixed human-readable string under `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// Terminal failure of a user operation. Each variant renders exactly one
/// status and JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(MessageBody {
                    message: message.to_string(),
                }),
            )
                .into_response(),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(MsgBody { msg })).into_response(),
            Self::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(MsgBody { msg })).into_response()
            }
        }
    }
}
