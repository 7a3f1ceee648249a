//! Blog posts REST API: image upload, tagging, and author-only mutation.
//!
//! - `POST   /api/posts`        create (auth, multipart)
//! - `GET    /api/posts`        list, newest first
//! - `GET    /api/posts/{id}`   read one
//! - `PUT    /api/posts/{id}`   update (auth, author only)
//! - `DELETE /api/posts/{id}`   delete (auth, author only)
//! - `POST   /api/auth/signup`, `POST /api/auth/login`, `GET /api/users/me`
//! - `GET    /uploads/{name}`   stored images
//! - `GET    /health`

pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod states;
pub mod store;
pub mod uploads;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub use config::Config;
pub use states::AppState;

/// Build the application router around `state`.
pub fn create_app(state: AppState) -> Router {
    let posts = Router::new()
        .route("/", post(routes::create_post).get(routes::list_posts))
        .route(
            "/{id}",
            get(routes::get_post)
                .put(routes::update_post)
                .delete(routes::delete_post),
        )
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Public routes (no auth required)
        .route("/health", get(routes::health_check))
        .route("/api/auth/signup", post(routes::signup))
        .route("/api/auth/login", post(routes::login))
        // Protected routes (auth required)
        .route("/api/users/me", get(routes::get_current_user))
        .nest("/api/posts", posts)
        .nest_service("/uploads", ServeDir::new(state.uploads.dir()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_writes,
        ))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
