use axum::http::StatusCode;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::response::{ApiResponse, FieldError, Message};
use crate::user::directory::UserDirectory;
use crate::user::dto::{LoginRequest, PublicUser, SignupRequest};
use crate::user::model::{NewUser, User};
use crate::user::password;
use crate::user::token::TokenKeys;

/// Everything that can go wrong inside the account service. All variants are
/// recovered at the handler boundary and become the uniform envelope.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for ApiResponse {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Validation(errors) => {
                ApiResponse::failure(Message::Errors(errors), StatusCode::BAD_REQUEST)
            }
            ServiceError::Conflict(message) | ServiceError::Unauthorized(message) => {
                ApiResponse::failure(Message::Text(message), StatusCode::BAD_REQUEST)
            }
            ServiceError::Internal(error) => {
                warn!(error = %error, "request failed internally");
                ApiResponse::failure(
                    Message::Text("Internal server error".into()),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        }
    }
}

/// Signup: validate, check uniqueness, hash, persist. The success payload is
/// the input minus the plaintext password.
pub async fn create_user(
    directory: &dyn UserDirectory,
    input: SignupRequest,
) -> Result<ApiResponse, ServiceError> {
    let valid = input.validate().map_err(ServiceError::Validation)?;

    if directory.find_by_username(&valid.username).await?.is_some() {
        warn!(username = %valid.username, "signup username taken");
        return Err(ServiceError::Conflict("Username already exist".into()));
    }
    // The stray double space is part of the published API contract.
    if directory.find_by_email(&valid.email).await?.is_some() {
        warn!(email = %valid.email, "signup email taken");
        return Err(ServiceError::Conflict("Email  already taken".into()));
    }

    let hash = password::hash_password(&valid.password)?;
    let user = directory
        .create(NewUser {
            username: valid.username.clone(),
            email: valid.email.clone(),
            password: hash,
        })
        .await?;

    info!(user_id = user.id, username = %user.username, "user created");
    Ok(ApiResponse::created(
        json!({ "username": valid.username, "email": valid.email }),
        "User Created",
    ))
}

/// Login: validate, look up by email, verify password, issue a token. Unknown
/// email and wrong password are deliberately indistinguishable to the caller.
pub async fn login_user(
    directory: &dyn UserDirectory,
    keys: &TokenKeys,
    input: LoginRequest,
) -> Result<ApiResponse, ServiceError> {
    let valid = input.validate().map_err(ServiceError::Validation)?;

    let user = directory.find_by_email(&valid.email).await?;
    let user = match user {
        Some(user) if password::verify_password(&valid.password, &user.password) => user,
        _ => {
            warn!(email = %valid.email, "login rejected");
            return Err(ServiceError::Unauthorized(
                "Invalid username or password".into(),
            ));
        }
    };

    let access_token = keys.sign(&user)?;
    info!(user_id = user.id, "user logged in");
    Ok(ApiResponse::created(
        json!({ "access_token": access_token }),
        "User login successfully",
    ))
}

/// Current-identity query: a resolved user serializes to their public form,
/// no identity serializes to the all-null user. Both are 200s.
pub fn get_current_user(identity: Option<&User>) -> ApiResponse {
    let public = match identity {
        Some(user) => PublicUser::from(user),
        None => PublicUser::guest(),
    };
    let data = serde_json::to_value(public).unwrap_or(Value::Null);
    ApiResponse::ok(data)
}

/// Resolve an authorization header to a persisted user. The header must split
/// into exactly two whitespace-separated tokens (the scheme is otherwise
/// ignored); any decode failure or unknown email is "no identity", never an
/// error to the caller.
pub async fn resolve_identity(
    header: Option<&str>,
    keys: &TokenKeys,
    directory: &dyn UserDirectory,
) -> Option<User> {
    let parts: Vec<&str> = header?.split_whitespace().collect();
    let [_scheme, token] = parts.as_slice() else {
        return None;
    };
    let claims = match keys.decode(token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(error = %e, "bearer token rejected");
            return None;
        }
    };
    match directory.find_by_email(&claims.email).await {
        Ok(user) => user,
        Err(e) => {
            warn!(error = %e, "identity lookup failed");
            None
        }
    }
}
