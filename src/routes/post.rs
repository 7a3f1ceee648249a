use crate::{
    AppState,
    auth::Caller,
    dto::{CreatePostForm, MessageResponse, PostResponse, UpdatePostRequest},
    errors::ApiError,
    models::{NewPost, Post, split_tags},
    uploads::UploadStore,
};
use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::Field, rejection::JsonRejection},
};
use tracing::{info, warn};
use uuid::Uuid;

/// POST /api/posts
/// Headers: Authorization: Bearer <token>
/// Body: multipart form with `title`, `body`, `tags` (CSV) and optional `image`
pub async fn create_post(
    State(state): State<AppState>,
    caller: Caller,
    multipart: Multipart,
) -> Result<Json<Post>, ApiError> {
    let form = read_create_form(multipart).await?;

    let image_name = match form.image {
        Some(data) => Some(
            state
                .uploads
                .save(&data)
                .await
                .map_err(|e| ApiError::Store(e.to_string()))?,
        ),
        None => None,
    };

    let new_post = NewPost {
        title: form.title.unwrap_or_default(),
        body: form.body.unwrap_or_default(),
        tags: split_tags(form.tags.as_deref()),
        image_url: image_name.as_deref().map(UploadStore::url_for),
        author: caller.id,
    };

    let post = match state.posts.create(new_post).await {
        Ok(post) => post,
        Err(e) => {
            if let Some(name) = &image_name {
                if let Err(io) = state.uploads.discard(name).await {
                    warn!("Failed to discard orphaned upload {}: {}", name, io);
                }
            }
            return Err(e.into());
        }
    };

    info!("Post created: {} by user {}", post.id, caller.id);

    Ok(Json(post))
}

/// GET /api/posts
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = state.posts.find_all_newest_first().await?;

    let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let names = state.users.names(&author_ids).await?;

    Ok(Json(
        posts
            .into_iter()
            .map(|post| {
                let name = names.get(&post.author).cloned();
                PostResponse::new(post, name)
            })
            .collect(),
    ))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = find_post(&state, &id).await?;
    let name = state
        .users
        .find_by_id(post.author)
        .await?
        .map(|user| user.name);

    Ok(Json(PostResponse::new(post, name)))
}

/// PUT /api/posts/{id}
/// Headers: Authorization: Bearer <token>
/// Body: any of { "title", "body", "tags", "imageUrl" }
pub async fn update_post(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let mut post = find_post(&state, &id).await?;
    ensure_author(&post, &caller)?;

    // Existence and ownership are reported before any body error.
    let Json(payload) = payload?;
    payload.apply_to(&mut post);
    let post = state.posts.save(post).await?;

    info!("Post updated: {} by user {}", post.id, caller.id);

    Ok(Json(post))
}

/// DELETE /api/posts/{id}
/// Headers: Authorization: Bearer <token>
pub async fn delete_post(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let post = find_post(&state, &id).await?;
    ensure_author(&post, &caller)?;

    // A concurrent delete may have won since the lookup.
    if !state.posts.remove(post.id).await? {
        return Err(ApiError::NotFound);
    }

    info!("Post deleted: {} by user {}", post.id, caller.id);

    Ok(Json(MessageResponse::new("Deleted")))
}

/// A malformed id cannot name any post, so it is reported as not found.
async fn find_post(state: &AppState, id: &str) -> Result<Post, ApiError> {
    let id = Uuid::parse_str(id).map_err(|_| ApiError::NotFound)?;
    state.posts.find_by_id(id).await?.ok_or(ApiError::NotFound)
}

fn ensure_author(post: &Post, caller: &Caller) -> Result<(), ApiError> {
    if post.author != caller.id {
        warn!("User {} is not the author of post {}", caller.id, post.id);
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

async fn read_create_form(mut multipart: Multipart) -> Result<CreatePostForm, ApiError> {
    let mut form = CreatePostForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Store(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => form.title = Some(field_text(field).await?),
            "body" => form.body = Some(field_text(field).await?),
            "tags" => form.tags = Some(field_text(field).await?),
            "image" => {
                let data = field.bytes().await.map_err(|e| ApiError::Store(e.to_string()))?;
                // Browsers send an empty part when no file was picked.
                if !data.is_empty() {
                    form.image = Some(data.to_vec());
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn field_text(field: Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(|e| ApiError::Store(e.to_string()))
}
