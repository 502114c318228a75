use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

use crate::db::error::StoreError;
use crate::db::models::{User, UserFields};

/// Persistence port for user documents.
///
/// Lookups by id return `Ok(None)` when nothing matches, including when the
/// id is not a well-formed identifier for this store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new document and return it with its assigned id.
    async fn create(&self, fields: UserFields) -> Result<User, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
    /// Apply the supplied fields and return the document after the update.
    async fn update_by_id(
        &self,
        id: &str,
        patch: UserFields,
    ) -> Result<Option<User>, StoreError>;
    /// Remove the document and return it as it was before deletion.
    async fn delete_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
}

/// Open a pool for `db_url`.
///
/// In-memory databases live and die with their connection, so they get a
/// single connection that is never recycled.
pub async fn connect_pool(db_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);
    let pool_options = if is_in_memory(db_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };
    pool_options.connect_with(options).await
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

pub async fn create_user_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL,
            email TEXT NOT NULL,
            password TEXT NOT NULL,
            role TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// SQLite-backed store. Every operation is a single statement.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Ensure the `users` table exists, then wrap the pool.
    pub async fn init(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        create_user_table(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Canonical form of `id`, or `None` if it cannot name a stored document.
fn parse_id(id: &str) -> Option<String> {
    Uuid::parse_str(id).ok().map(|id| id.hyphenated().to_string())
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create(&self, fields: UserFields) -> Result<User, StoreError> {
        if let Some(field) = fields.missing_required() {
            return Err(StoreError::Validation(field));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password, role)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, email, password, role
            "#,
        )
        .bind(Uuid::new_v4().hyphenated().to_string())
        .bind(fields.username)
        .bind(fields.email)
        .bind(fields.password)
        .bind(fields.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, role FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: UserFields,
    ) -> Result<Option<User>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        // NULL binds leave the column untouched.
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                username = COALESCE(?, username),
                email = COALESCE(?, email),
                password = COALESCE(?, password),
                role = COALESCE(?, role)
            WHERE id = ?
            RETURNING id, username, email, password, role
            "#,
        )
        .bind(patch.username)
        .bind(patch.email)
        .bind(patch.password)
        .bind(patch.role)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, User>(
            "DELETE FROM users WHERE id = ? RETURNING id, username, email, password, role",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
