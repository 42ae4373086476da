use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use mooligai_api::{AppState, AppStateInner, auth, notify::Mailer, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mooligai=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("MOOLIGAI_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("MOOLIGAI_DB_PATH").unwrap_or_else(|_| "mooligai.db".into());
    let host = std::env::var("MOOLIGAI_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("MOOLIGAI_PORT")
        .unwrap_or_else(|_| "5000".into())
        .parse()?;
    let admin_email = std::env::var("MOOLIGAI_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@mooligai.example".into());
    let admin_password =
        std::env::var("MOOLIGAI_ADMIN_PASSWORD").unwrap_or_else(|_| "change-me-on-first-run".into());

    // Init database and the privileged account
    let db = mooligai_db::Database::open(&PathBuf::from(&db_path))?;
    auth::ensure_admin_account(&db, &admin_email, &admin_password)?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret,
        mailer: Arc::new(Mailer::from_env()),
    });

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Mooligai server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
