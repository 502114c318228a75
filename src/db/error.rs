use thiserror::Error;

/// Failures surfaced by a [`UserStore`](crate::db::repo::UserStore).
///
/// A missing document is not an error; lookups report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user validation failed: `{0}` is required")]
    Validation(&'static str),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
