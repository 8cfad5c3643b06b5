//! Registration and login

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{AuthResponse, Claims, LoginRequest, NewUser, RegisterRequest},
    repository::{users::USER_EXISTS, Repository},
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user and log them in
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        if self.repository.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict(USER_EXISTS.to_string()));
        }

        let password_hash = hash_password(&request.password)?;

        let user = self
            .repository
            .users
            .create(NewUser {
                name: request.name,
                email: request.email,
                password_hash,
            })
            .await?;

        tracing::info!("Registered user {}", user.id);

        Ok(AuthResponse {
            token: self.issue_token(user.id)?,
            user_id: user.id,
        })
    }

    /// Check email and password, then issue a fresh credential
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = self
            .repository
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&user.password, &request.password)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(AuthResponse {
            token: self.issue_token(user.id)?,
            user_id: user.id,
        })
    }

    fn issue_token(&self, user_id: Uuid) -> AppResult<String> {
        Claims::new(user_id, self.config.jwt_expiration_secs)
            .encode(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

/// Hash a password using Argon2 with a random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
