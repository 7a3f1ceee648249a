use posts_api::{AppState, Config, create_app};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,posts_api=debug,tower_http=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run().await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let addr = config.addr();

    let state = AppState::new(config);
    state.uploads.ensure_dir().await?;

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("API Endpoints:");
    info!("  GET    /health              - Health check");
    info!("  POST   /api/auth/signup     - Create account");
    info!("  POST   /api/auth/login      - Login");
    info!("  GET    /api/users/me        - Get current user (auth)");
    info!("  POST   /api/posts           - Create post (auth, multipart)");
    info!("  GET    /api/posts           - List posts, newest first");
    info!("  GET    /api/posts/{{id}}      - Get specific post");
    info!("  PUT    /api/posts/{{id}}      - Update post (auth, author only)");
    info!("  DELETE /api/posts/{{id}}      - Delete post (auth, author only)");
    info!("  GET    /uploads/{{name}}      - Uploaded images");

    axum::serve(listener, app).await?;
    Ok(())
}
