//! Token issuance and the authenticated-user extractor.

use crate::domain::user::User;
use crate::error::{Error, Result};
use crate::ports::repository::UserRepository;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "student".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password) == password_hash
}

/// Stateless HS256 tokens. No refresh or revocation; the demo's token
/// lifetime is the whole session.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    secret: String,
    expiry_mins: i64,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, secret: String, expiry_mins: i64) -> Self {
        Self {
            users,
            secret,
            expiry_mins,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<TokenResponse> {
        if !email_pattern().is_match(&request.email) {
            return Err(Error::InvalidRequest(format!(
                "not a valid email address: {}",
                request.email
            )));
        }
        if request.password.is_empty() {
            return Err(Error::InvalidRequest("password must not be empty".into()));
        }

        let user = User::new(
            request.username,
            request.email,
            hash_password(&request.password),
            request.role,
        );
        self.users.insert(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");
        self.token_response(&user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .filter(|u| u.is_active && verify_password(&request.password, &u.password_hash))
            .ok_or_else(|| Error::Unauthorized("incorrect email or password".into()))?;
        self.token_response(&user)
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| Error::Unauthorized(format!("invalid token: {}", e)))
    }

    pub async fn user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.users.find_by_id(id).await
    }

    fn token_response(&self, user: &User) -> Result<TokenResponse> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::minutes(self.expiry_mins)).timestamp() as usize,
        };
        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| Error::Unauthorized(format!("token encoding failed: {}", e)))?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: UserProfile::from(user),
        })
    }
}

/// Extractor for routes behind bearer authentication.
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<super::AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &super::AppState,
    ) -> Result<Self> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Unauthorized("missing authorization header".into()))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| Error::Unauthorized("expected a bearer token".into()))?;

        let claims = state.auth.verify(token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| Error::Unauthorized("malformed token subject".into()))?;
        let user = state
            .auth
            .user_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| Error::Unauthorized("user not found".into()))?;

        Ok(CurrentUser(user))
    }
}
