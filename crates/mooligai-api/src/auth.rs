use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mooligai_db::Database;
use mooligai_db::models::UserRow;
use mooligai_types::api::{AuthData, LoginRequest, RegisterRequest};
use mooligai_types::models::{Role, UserView};

use crate::error::ApiError;
use crate::response::Envelope;
use crate::{AppState, parse_instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub exp: usize,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if [&req.name, &req.email, &req.password].iter().any(|f| f.trim().is_empty()) {
        return Err(ApiError::Validation("All fields are required"));
    }

    if state.db.get_user_by_email(&req.email)?.is_some() {
        return Err(ApiError::Conflict("Email already exists"));
    }

    let row = UserRow {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
        password: hash_password(&req.password)?,
        role: Role::User.as_str().to_string(),
        created_at: Utc::now().to_rfc3339(),
    };
    state.db.create_user(&row)?;

    let user = user_view(row)?;
    let token = create_token(&state.jwt_secret, &user)?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(AuthData { user, token })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .db
        .get_user_by_email(&req.email)?
        .ok_or(ApiError::InvalidCredentials)?;

    let parsed_hash = PasswordHash::new(&row.password)
        .map_err(|e| anyhow!("stored credential unreadable: {}", e))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::InvalidCredentials)?;

    let user = user_view(row)?;
    let token = create_token(&state.jwt_secret, &user)?;

    Ok(Json(Envelope::data(AuthData { user, token })))
}

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state
        .db
        .list_users()?
        .into_iter()
        .map(user_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Envelope::data(users)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .db
        .get_user_by_id(&id.to_string())?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(Envelope::data(user_view(row)?)))
}

/// Seeds the privileged account on startup. Replaces the old hardcoded
/// credential shortcut: the admin is an ordinary row, and login takes the
/// same lookup path as everyone else.
pub fn ensure_admin_account(db: &Database, email: &str, password: &str) -> anyhow::Result<()> {
    db.seed_admin(&UserRow {
        id: Uuid::new_v4().to_string(),
        name: "Site Admin".to_string(),
        email: email.to_string(),
        password: hash_password(password)?,
        role: Role::Admin.as_str().to_string(),
        created_at: Utc::now().to_rfc3339(),
    })
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {}", e))?;
    Ok(hash.to_string())
}

/// The password hash stays behind in the row; everything else becomes the
/// public view.
fn user_view(row: UserRow) -> anyhow::Result<UserView> {
    Ok(UserView {
        id: row.id.parse()?,
        name: row.name,
        email: row.email,
        role: Role::parse(&row.role).ok_or_else(|| anyhow!("corrupt role '{}'", row.role))?,
        created_at: parse_instant(&row.created_at)?,
    })
}

fn create_token(secret: &str, user: &UserView) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
