use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::state::AppState;
use crate::user::model::User;

/// Payload embedded in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub exp: usize, // unix timestamp
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Holds the HS256 signing and verification keys with the token TTL.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        TokenKeys::new(&state.config.secret_key, state.config.token_ttl_minutes)
    }
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn encode(&self, claims: &Claims) -> anyhow::Result<String> {
        Ok(encode(&Header::default(), claims, &self.encoding)?)
    }

    /// Issue a token for a user, expiring TTL from now.
    pub fn sign(&self, user: &User) -> anyhow::Result<String> {
        let exp = OffsetDateTime::now_utc() + self.ttl;
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            exp: exp.unix_timestamp() as usize,
        };
        let token = self.encode(&claims)?;
        debug!(user_id = user.id, "token signed");
        Ok(token)
    }

    /// Verify signature and expiry. Expiry is checked with zero leeway.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;
        debug!(user_id = data.claims.id, "token verified");
        Ok(data.claims)
    }
}
