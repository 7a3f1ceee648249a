//! Persistence seams for posts and user accounts.

mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{NewPost, Post, User};

pub use memory::{MemoryPostStore, MemoryUserDirectory};

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Validate and persist a new post, assigning its id and creation time.
    async fn create(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Every post, newest first.
    async fn find_all_newest_first(&self) -> Result<Vec<Post>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    /// Overwrite an existing post. Fails with [`StoreError::NotFound`] when
    /// the post was removed in the meantime.
    async fn save(&self, post: Post) -> Result<Post, StoreError>;

    /// Returns `false` when there was nothing to remove.
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fails with [`StoreError::Duplicate`] when the email is taken.
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Display names for the given ids. Unknown ids are absent from the map.
    async fn names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, StoreError>;
}

/// Required-field checks applied on every write.
pub(crate) fn validate_post(title: &str, body: &str) -> Result<(), StoreError> {
    let missing: Vec<&str> = [("title", title), ("body", body)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let reasons: Vec<String> = missing.iter().map(|f| format!("{f} is required")).collect();
    Err(StoreError::Validation(format!(
        "Post validation failed: {}",
        reasons.join(", ")
    )))
}
