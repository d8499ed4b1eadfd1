use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                    // unique user ID, assigned by the store
    pub username: String,           // unique username
    pub email: String,              // unique email
    #[serde(skip_serializing)]
    pub password: String,           // argon2 hash, not exposed in JSON
    pub created_on: OffsetDateTime, // creation timestamp, immutable
    pub is_admin: bool,
    pub access_token: Option<String>, // stored but unused by current flows
}

/// Fields needed to insert a new user; everything else is store-assigned.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String, // already hashed
}
