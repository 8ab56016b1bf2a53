//! Password hashing and signed session tokens

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tasty_core::{Result, TastyError};
use uuid::Uuid;

pub struct AuthService {
    jwt_secret: String,
    session_ttl_secs: i64,
}

impl AuthService {
    pub fn new(jwt_secret: String, session_ttl_secs: i64) -> Self {
        Self {
            jwt_secret,
            session_ttl_secs,
        }
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_secs
    }

    /// Salted argon2 hash in PHC string form. Runs off the async workers.
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| TastyError::Internal(format!("Failed to hash password: {}", e)))
        })
        .await
        .map_err(|e| TastyError::Internal(format!("Hashing task failed: {}", e)))?
    }

    /// Signed session token for `username`, valid for the session TTL
    pub fn issue_session(&self, username: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            exp: (now + Duration::seconds(self.session_ttl_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| TastyError::Internal(format!("Failed to sign session: {}", e)))
    }

    /// Username carried by a valid, unexpired session token
    pub fn validate_session(&self, token: &str) -> Result<String> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| TastyError::Unauthorized(format!("Invalid session: {}", e)))?;

        Ok(token_data.claims.sub)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // username
    exp: i64,
    iat: i64,
    jti: String,
}
