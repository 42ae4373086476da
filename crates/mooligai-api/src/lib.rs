pub mod auth;
pub mod contact;
pub mod error;
pub mod feedback;
pub mod notify;
pub mod remedies;
pub mod response;

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    Router,
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};

use mooligai_db::Database;
use notify::Mailer;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    pub mailer: Arc<Mailer>,
}

/// The full route table. The binary serves it; integration tests drive it
/// directly with `tower::ServiceExt::oneshot`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/users", get(auth::list_users))
        .route("/auth/users/{id}", get(auth::get_user))
        .route("/contact", post(contact::submit).get(contact::list))
        .route("/feedback", post(feedback::submit).get(feedback::list))
        .route("/remedies", post(remedies::create).get(remedies::list))
        .route(
            "/remedies/{id}",
            get(remedies::get_one).put(remedies::update).delete(remedies::remove),
        )
        .route("/remedies/{id}/status", put(remedies::set_status))
        .with_state(state)
}

/// Timestamps are stored as RFC 3339 text; a row that fails to parse is
/// corrupt and surfaces as an internal error.
pub(crate) fn parse_instant(s: &str) -> anyhow::Result<DateTime<Utc>> {
    s.parse()
        .map_err(|e| anyhow!("corrupt timestamp '{}': {}", s, e))
}
