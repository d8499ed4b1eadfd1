use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// A single failed validation: rendered as `"field: reason"` in the error list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// What goes into the envelope's `message` slot before shaping.
#[derive(Debug, Clone)]
pub enum Message {
    Empty,
    Text(String),
    Errors(Vec<FieldError>),
}

/// The uniform `{data, message, status}` response wrapper used by every
/// endpoint. `status` is true iff the HTTP status is 200 or 201; on failure
/// `message` is always a list of `{"error": "..."}` objects, on success a
/// plain string (or `[]` when there is nothing to say).
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub data: Value,
    pub message: Message,
}

impl ApiResponse {
    pub fn new(data: Value, message: Message, status: StatusCode) -> Self {
        Self {
            status,
            data,
            message,
        }
    }

    pub fn ok(data: Value) -> Self {
        Self::new(data, Message::Empty, StatusCode::OK)
    }

    pub fn created(data: Value, message: impl Into<String>) -> Self {
        Self::new(data, Message::Text(message.into()), StatusCode::CREATED)
    }

    pub fn failure(message: Message, status: StatusCode) -> Self {
        Self::new(Value::Null, message, status)
    }

    fn succeeded(&self) -> bool {
        matches!(self.status.as_u16(), 200 | 201)
    }

    /// The JSON body this response serializes to.
    pub fn envelope(&self) -> Value {
        let message = match &self.message {
            Message::Empty => json!([]),
            Message::Text(text) if self.succeeded() => json!(text),
            Message::Text(text) => json!([{ "error": text }]),
            Message::Errors(errors) => Value::Array(
                errors
                    .iter()
                    .map(|e| json!({ "error": format!("{}: {}", e.field, e.reason) }))
                    .collect(),
            ),
        };
        json!({
            "data": self.data,
            "message": message,
            "status": self.succeeded(),
        })
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let body = self.envelope();
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_empty_message_is_empty_list() {
        let response = ApiResponse::ok(json!({"id": 1}));
        assert_eq!(
            response.envelope(),
            json!({"data": {"id": 1}, "message": [], "status": true})
        );
    }

    #[test]
    fn success_message_passes_through_as_string() {
        let response = ApiResponse::created(json!({"username": "abcd"}), "User Created");
        assert_eq!(
            response.envelope(),
            json!({"data": {"username": "abcd"}, "message": "User Created", "status": true})
        );
    }

    #[test]
    fn failure_text_is_wrapped_in_error_list() {
        let response = ApiResponse::failure(
            Message::Text("Username already exist".into()),
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(
            response.envelope(),
            json!({
                "data": null,
                "message": [{"error": "Username already exist"}],
                "status": false
            })
        );
    }

    #[test]
    fn field_errors_render_as_field_colon_reason() {
        let response = ApiResponse::failure(
            Message::Errors(vec![FieldError::new(
                "username",
                "Missing data for required field.",
            )]),
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(
            response.envelope(),
            json!({
                "data": null,
                "message": [{"error": "username: Missing data for required field."}],
                "status": false
            })
        );
    }
}
