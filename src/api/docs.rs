//! OpenAPI document for the user API, assembled from the `#[utoipa::path]`
//! annotations on the handlers. Served as JSON at [`DOCS_PATH`] and behind
//! Swagger UI.

use axum::Json;
use utoipa::OpenApi;

use crate::api::error::{MessageBody, MsgBody};
use crate::db::models::{User, UserFields};

pub const DOCS_PATH: &str = "/api-docs";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        version = "1.0.0",
        description = "API documentation for the User Management Backend System"
    ),
    paths(
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(schemas(User, UserFields, MsgBody, MessageBody)),
    tags((name = "users", description = "User record lifecycle"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
