use crate::models::{Post, split_tags};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Validate, Deserialize)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
    #[validate(length(min = 8, max = 100, message = "Password must be 8-100 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Text fields and optional image collected from a multipart create request.
#[derive(Debug, Default)]
pub struct CreatePostForm {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<String>,
    pub image: Option<Vec<u8>>,
}

/// Tags on update may be sent as a JSON array or as a CSV string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagsInput::List(tags) => tags,
            TagsInput::Csv(csv) => split_tags(Some(&csv)),
        }
    }
}

/// Partial update of a post.
///
/// Only these fields can change. Anything else in the body, including
/// `author`, `id` and `createdAt`, is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<TagsInput>,
    pub image_url: Option<String>,
}

impl UpdatePostRequest {
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
        if let Some(tags) = self.tags {
            post.tags = tags.into_tags();
        }
        if let Some(image_url) = self.image_url {
            post.image_url = Some(image_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn post() -> Post {
        Post {
            id: Uuid::new_v4(),
            title: "title".into(),
            body: "body".into(),
            tags: vec!["old".into()],
            image_url: None,
            author: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn present_fields_overwrite() {
        let mut post = post();
        let update: UpdatePostRequest = serde_json::from_value(serde_json::json!({
            "title": "new title",
            "imageUrl": "/uploads/abc"
        }))
        .unwrap();

        update.apply_to(&mut post);
        assert_eq!(post.title, "new title");
        assert_eq!(post.body, "body");
        assert_eq!(post.tags, vec!["old"]);
        assert_eq!(post.image_url.as_deref(), Some("/uploads/abc"));
    }

    #[test]
    fn protected_fields_are_ignored() {
        let mut post = post();
        let (id, author, created_at) = (post.id, post.author, post.created_at);
        let update: UpdatePostRequest = serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "author": Uuid::new_v4(),
            "createdAt": "2001-01-01T00:00:00Z",
            "body": "changed"
        }))
        .unwrap();

        update.apply_to(&mut post);
        assert_eq!(post.id, id);
        assert_eq!(post.author, author);
        assert_eq!(post.created_at, created_at);
        assert_eq!(post.body, "changed");
    }

    #[test]
    fn tags_accept_list_or_csv() {
        let list: UpdatePostRequest =
            serde_json::from_value(serde_json::json!({ "tags": ["a", "b"] })).unwrap();
        let csv: UpdatePostRequest =
            serde_json::from_value(serde_json::json!({ "tags": "a, b" })).unwrap();

        let (mut p1, mut p2) = (post(), post());
        list.apply_to(&mut p1);
        csv.apply_to(&mut p2);
        assert_eq!(p1.tags, vec!["a", "b"]);
        assert_eq!(p2.tags, vec!["a", "b"]);
    }

    #[test]
    fn signup_validation_rejects_short_password() {
        let req = SignupRequest {
            email: "ann@example.com".into(),
            name: "Ann".into(),
            password: "short".into(),
        };
        assert!(req.validate().is_err());
    }
}
