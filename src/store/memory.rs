use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use uuid::Uuid;

use super::{PostStore, UserDirectory, validate_post};
use crate::errors::StoreError;
use crate::models::{NewPost, Post, User};

/// `DashMap`-backed post store.
///
/// Each post carries an insertion sequence number so posts sharing a
/// timestamp still list newest-insertion first.
#[derive(Default)]
pub struct MemoryPostStore {
    posts: DashMap<Uuid, (u64, Post)>,
    seq: AtomicU64,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, new: NewPost) -> Result<Post, StoreError> {
        validate_post(&new.title, &new.body)?;

        let post = Post {
            id: Uuid::new_v4(),
            title: new.title,
            body: new.body,
            tags: new.tags,
            image_url: new.image_url,
            author: new.author,
            created_at: Utc::now(),
        };
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.posts.insert(post.id, (seq, post.clone()));
        Ok(post)
    }

    async fn find_all_newest_first(&self) -> Result<Vec<Post>, StoreError> {
        let mut entries: Vec<(u64, Post)> = self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        entries.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| seq_b.cmp(seq_a))
        });

        Ok(entries.into_iter().map(|(_, post)| post).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.get(&id).map(|entry| entry.value().1.clone()))
    }

    async fn save(&self, post: Post) -> Result<Post, StoreError> {
        validate_post(&post.title, &post.body)?;

        let mut entry = self
            .posts
            .get_mut(&post.id)
            .ok_or(StoreError::NotFound)?;
        entry.1 = post.clone();
        Ok(post)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.posts.remove(&id).is_some())
    }
}

/// `DashMap`-backed user accounts with an email index.
#[derive(Default)]
pub struct MemoryUserDirectory {
    users: DashMap<Uuid, User>,
    email_index: DashMap<String, Uuid>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        match self.email_index.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(user.email)),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let Some(id) = self.email_index.get(email).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, StoreError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|user| (*id, user.name.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str, author: Uuid) -> NewPost {
        NewPost {
            title: title.to_string(),
            body: "body".to_string(),
            tags: vec![],
            image_url: None,
            author,
        }
    }

    fn user(email: &str, name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            hashed_password: "x".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_keeps_fields() {
        let store = MemoryPostStore::new();
        let author = Uuid::new_v4();
        let post = store.create(new_post("hello", author)).await.unwrap();

        assert_eq!(post.title, "hello");
        assert_eq!(post.author, author);
        let found = store.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(found.id, post.id);
    }

    #[tokio::test]
    async fn create_rejects_missing_title_and_body() {
        let store = MemoryPostStore::new();
        let mut post = new_post("", Uuid::new_v4());
        post.body.clear();

        let err = store.create(post).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(err.to_string().contains("title"));
        assert!(err.to_string().contains("body"));
        assert!(store.find_all_newest_first().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryPostStore::new();
        let author = Uuid::new_v4();
        for title in ["first", "second", "third"] {
            store.create(new_post(title, author)).await.unwrap();
        }

        let titles: Vec<String> = store
            .find_all_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn save_overwrites_existing_post() {
        let store = MemoryPostStore::new();
        let mut post = store.create(new_post("old", Uuid::new_v4())).await.unwrap();
        post.title = "new".to_string();
        store.save(post.clone()).await.unwrap();

        assert_eq!(store.find_by_id(post.id).await.unwrap().unwrap().title, "new");
    }

    #[tokio::test]
    async fn save_rejects_emptied_title() {
        let store = MemoryPostStore::new();
        let mut post = store.create(new_post("old", Uuid::new_v4())).await.unwrap();
        post.title.clear();

        assert!(store.save(post).await.is_err());
    }

    #[tokio::test]
    async fn save_after_remove_is_not_found() {
        let store = MemoryPostStore::new();
        let post = store.create(new_post("gone", Uuid::new_v4())).await.unwrap();
        store.remove(post.id).await.unwrap();

        let err = store.save(post).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn remove_reports_whether_anything_was_removed() {
        let store = MemoryPostStore::new();
        let post = store.create(new_post("gone", Uuid::new_v4())).await.unwrap();

        assert!(store.remove(post.id).await.unwrap());
        assert!(!store.remove(post.id).await.unwrap());
        assert!(store.find_by_id(post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let users = MemoryUserDirectory::new();
        users.insert(user("a@example.com", "Ann")).await.unwrap();

        let err = users.insert(user("a@example.com", "Other")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn names_skips_unknown_ids() {
        let users = MemoryUserDirectory::new();
        let ann = users.insert(user("a@example.com", "Ann")).await.unwrap();
        let ghost = Uuid::new_v4();

        let names = users.names(&[ann.id, ghost]).await.unwrap();
        assert_eq!(names.get(&ann.id).map(String::as_str), Some("Ann"));
        assert!(!names.contains_key(&ghost));
    }
}
