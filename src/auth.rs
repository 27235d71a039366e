use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode};
use tokio::sync::broadcast;
use tower_sessions::Session;
use tracing::{info, warn};
use uuid::Uuid;

use crate::AppState;
use crate::constants::*;
use crate::database::Db;
use crate::error::AppError;
use crate::models::{LoginPayload, PublicUser, RegisterPayload, User};

/// Authentication state changes, published on login and logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn { user_id: String },
    SignedOut { user_id: String },
}

#[derive(Clone)]
pub struct AuthEvents {
    sender: broadcast::Sender<AuthEvent>,
}

impl Default for AuthEvents {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(AUTH_EVENTS_CAPACITY);
        Self { sender }
    }
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: AuthEvent) {
        // No subscribers is fine.
        let _ = self.sender.send(event);
    }
}

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

async fn create_user(db: &Db, username: &str, password: &str) -> anyhow::Result<PublicUser> {
    let hash = hash_password(password)?;
    let id = Uuid::new_v4().to_string();
    let conn = db.write().await;

    conn.execute(
        "INSERT INTO users (id, name, password_hash) VALUES (?, ?, ?)",
        (id.as_str(), username, hash.as_str()),
    )
    .await?;

    Ok(PublicUser {
        id,
        username: username.to_string(),
    })
}

async fn get_user_by_username(db: &Db, username: &str) -> anyhow::Result<Option<User>> {
    let conn = db.read().await;
    let mut rows = conn
        .query(
            "SELECT id, name, password_hash FROM users WHERE name = ?",
            [username],
        )
        .await?;

    if let Some(row) = rows.next().await? {
        Ok(Some(User {
            id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
        }))
    } else {
        Ok(None)
    }
}

pub fn validate_username(username: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::BadRequest("Username cannot be empty".to_string()));
    }
    if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Username must be between {} and {} characters",
            MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::BadRequest(
            "Username can only contain alphanumeric characters, underscores, and hyphens"
                .to_string(),
        ));
    }
    Ok(())
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    validate_username(&payload.username)?;
    if payload.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }

    let user = create_user(&state.db, &payload.username, &payload.password)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                AppError::Conflict("Username already exists".to_string())
            } else {
                AppError::Internal(e.to_string())
            }
        })?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username cannot be empty".to_string()));
    }
    if payload.password.is_empty() {
        return Err(AppError::BadRequest("Password cannot be empty".to_string()));
    }

    let user = get_user_by_username(&state.db, &payload.username)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !is_valid {
        warn!(username = %payload.username, "failed login attempt");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, &user.id).await?;
    session.insert(SESSION_USERNAME_KEY, &user.username).await?;

    state.auth_events.publish(AuthEvent::SignedIn {
        user_id: user.id.clone(),
    });

    Ok((
        StatusCode::OK,
        Json(PublicUser {
            id: user.id,
            username: user.username,
        }),
    ))
}

pub async fn get_current_user(session: &Session) -> Result<Option<PublicUser>, AppError> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    let username: Option<String> = session.get(SESSION_USERNAME_KEY).await?;

    Ok(match (user_id, username) {
        (Some(id), Some(username)) => Some(PublicUser { id, username }),
        _ => None,
    })
}

pub async fn current_user_id(session: &Session) -> Result<Option<String>, AppError> {
    Ok(get_current_user(session).await?.map(|user| user.id))
}

pub async fn require_user(session: &Session) -> Result<PublicUser, AppError> {
    get_current_user(session)
        .await?
        .ok_or_else(|| AppError::Unauthorized(ERR_UNAUTHORIZED.to_string()))
}

pub async fn me(session: Session) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let user = require_user(&session).await?;
    Ok((StatusCode::OK, Json(user)))
}

pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<StatusCode, AppError> {
    let user_id = current_user_id(&session).await?;
    session.flush().await?;

    if let Some(user_id) = user_id {
        info!(user_id = %user_id, "user signed out");
        state.auth_events.publish(AuthEvent::SignedOut { user_id });
    }

    Ok(StatusCode::NO_CONTENT)
}
