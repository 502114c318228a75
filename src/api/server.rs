use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::docs::{self, ApiDoc, DOCS_PATH, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use crate::api::users;
use crate::config::Config;
use crate::db::repo::{SqliteUserStore, UserStore, connect_pool};

/// Shared handler state. The store handle is built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/users", post(users::create_user))
        .route("/api/users/", post(users::create_user))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(DOCS_PATH, get(docs::openapi_json))
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let pool = connect_pool(&config.database_url, config.max_connections).await?;
    let store = SqliteUserStore::init(pool).await?;
    info!(url = %config.database_url, "Database connected");

    let state = Arc::new(AppState {
        users: Arc::new(store.clone()),
    });
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.pool().close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
