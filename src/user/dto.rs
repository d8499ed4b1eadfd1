use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::response::FieldError;
use crate::user::model::User;

const MISSING: &str = "Missing data for required field.";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for signup. Every field is optional at the wire level so a
/// missing field becomes a validation message rather than a deserialize error.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Signup input that passed validation.
#[derive(Debug, Clone)]
pub struct ValidSignup {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<ValidSignup, Vec<FieldError>> {
        let mut errors = Vec::new();
        match &self.username {
            None => errors.push(FieldError::new("username", MISSING)),
            Some(u) if u.chars().count() < 4 => {
                errors.push(FieldError::new("username", "Shorter than minimum length 4."))
            }
            _ => {}
        }
        match &self.email {
            None => errors.push(FieldError::new("email", MISSING)),
            Some(e) if !is_valid_email(e) => {
                errors.push(FieldError::new("email", "Not a valid email address."))
            }
            _ => {}
        }
        match &self.password {
            None => errors.push(FieldError::new("password", MISSING)),
            Some(p) if p.chars().count() < 6 => {
                errors.push(FieldError::new("password", "Shorter than minimum length 6."))
            }
            _ => {}
        }
        match (&self.username, &self.email, &self.password) {
            (Some(username), Some(email), Some(password)) if errors.is_empty() => Ok(ValidSignup {
                username: username.clone(),
                email: email.clone(),
                password: password.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidLogin {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<ValidLogin, Vec<FieldError>> {
        let mut errors = Vec::new();
        match &self.email {
            None => errors.push(FieldError::new("email", MISSING)),
            Some(e) if !is_valid_email(e) => {
                errors.push(FieldError::new("email", "Not a valid email address."))
            }
            _ => {}
        }
        match &self.password {
            None => errors.push(FieldError::new("password", MISSING)),
            Some(p) if p.chars().count() < 6 => {
                errors.push(FieldError::new("password", "Shorter than minimum length 6."))
            }
            _ => {}
        }
        match (&self.email, &self.password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(ValidLogin {
                email: email.clone(),
                password: password.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Public part of the user returned to the client. The creation timestamp is
/// rendered under the `modified_at` key as a `[date, time]` pair, the shape
/// the original API exposed and its clients depend on.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub modified_at: Option<(String, String)>,
}

impl PublicUser {
    /// All-null user, returned instead of an error for unauthenticated calls.
    pub fn guest() -> Self {
        Self {
            id: None,
            username: None,
            email: None,
            modified_at: None,
        }
    }
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id),
            username: Some(user.username.clone()),
            email: Some(user.email.clone()),
            modified_at: dump_datetime(user.created_on),
        }
    }
}

fn dump_datetime(value: OffsetDateTime) -> Option<(String, String)> {
    let date = value.format(format_description!("[year]-[month]-[day]")).ok()?;
    let time = value.format(format_description!("[hour]:[minute]:[second]")).ok()?;
    Some((date, time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn signup_missing_username_is_flagged() {
        let request = SignupRequest {
            username: None,
            email: Some("test@test.com".into()),
            password: Some("abcd1234".into()),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(
                "username",
                "Missing data for required field."
            )]
        );
    }

    #[test]
    fn signup_short_username_is_flagged() {
        let request = SignupRequest {
            username: Some("abc".into()),
            email: Some("test@test.com".into()),
            password: Some("abcd1234".into()),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(
                "username",
                "Shorter than minimum length 4."
            )]
        );
    }

    #[test]
    fn signup_bad_email_and_short_password_are_both_flagged() {
        let request = SignupRequest {
            username: Some("testusername".into()),
            email: Some("not-an-email".into()),
            password: Some("abc".into()),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[1].field, "password");
    }

    #[test]
    fn signup_valid_input_passes() {
        let request = SignupRequest {
            username: Some("testusername".into()),
            email: Some("test@test.com".into()),
            password: Some("abcd1234".into()),
        };
        let valid = request.validate().expect("should validate");
        assert_eq!(valid.username, "testusername");
    }

    #[test]
    fn login_missing_password_is_flagged() {
        let request = LoginRequest {
            email: Some("test@test.com".into()),
            password: None,
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(
                "password",
                "Missing data for required field."
            )]
        );
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        // "paßs1" is five characters but six bytes; still too short.
        let request = LoginRequest {
            email: Some("test@test.com".into()),
            password: Some("pa\u{00df}s1".into()),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(
                "password",
                "Shorter than minimum length 6."
            )]
        );

        // "täst" is four characters despite being five bytes.
        let request = SignupRequest {
            username: Some("t\u{00e4}st".into()),
            email: Some("test@test.com".into()),
            password: Some("abcd1234".into()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn public_user_serializes_created_on_as_date_time_pair() {
        let user = User {
            id: 1,
            username: "test_username".into(),
            email: "test@test.com".into(),
            password: "hash".into(),
            created_on: datetime!(2023-01-01 10:30:45 UTC),
            is_admin: false,
            access_token: None,
        };
        let value = serde_json::to_value(PublicUser::from(&user)).expect("serialize");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "username": "test_username",
                "email": "test@test.com",
                "modified_at": ["2023-01-01", "10:30:45"]
            })
        );
    }

    #[test]
    fn guest_user_serializes_all_null() {
        let value = serde_json::to_value(PublicUser::guest()).expect("serialize");
        assert_eq!(
            value,
            json!({"id": null, "username": null, "email": null, "modified_at": null})
        );
    }
}
