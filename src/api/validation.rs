use std::borrow::Cow;
use std::sync::LazyLock;

use actix_multipart::form::MultipartFormConfig;
use actix_web::HttpResponse;
use regex::Regex;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

impl ErrorResponse {
    /// Form-level error carrying a single message
    pub fn message(error: &str, message: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.to_string(),
            fields: serde_json::json!({ "message": message.into() }),
        }
    }
}

static LETTERS_AND_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid regex"));
static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s,]+$").expect("valid regex"));

const PASSWORD_SPECIALS: &str = "!@#$%^&*";

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Names and company names: letters and whitespace only
pub fn validate_letters_and_spaces(value: &str) -> Result<(), ValidationError> {
    if LETTERS_AND_SPACES.is_match(value) {
        Ok(())
    } else {
        Err(invalid("letters_and_spaces", "Should only contain letters and spaces."))
    }
}

pub fn validate_location(value: &str) -> Result<(), ValidationError> {
    if LOCATION.is_match(value) {
        Ok(())
    } else {
        Err(invalid(
            "location",
            "Location should only contain letters, spaces, and commas.",
        ))
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("blank", "Value cannot be empty."))
    } else {
        Ok(())
    }
}

/// At least 8 characters drawn from letters, digits and `!@#$%^&*`,
/// with at least one digit and one special character.
pub fn validate_password_strength(value: &str) -> Result<(), ValidationError> {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if value.chars().count() >= 8 && allowed && has_digit && has_special {
        Ok(())
    } else {
        Err(invalid(
            "password_strength",
            "Password must be at least 8 characters long, contain at least one number, and one special character.",
        ))
    }
}

/// Flattens validator errors into `{"<field>": {"errors": [..]}}`
pub fn field_errors_json(errors: &ValidationErrors) -> serde_json::Value {
    let mut fields = serde_json::Map::new();

    for (field, errors) in errors.field_errors() {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation error in field: {}", field))
            })
            .collect();
        fields.insert(field.to_string(), serde_json::json!({"errors": messages}));
    }

    serde_json::Value::Object(fields)
}

fn bad_request(error_response: ErrorResponse) -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        "",
        HttpResponse::BadRequest().json(error_response),
    )
    .into()
}

/// Maps a body parsing failure to a message a form can show
fn classify_body_error(err_string: &str) -> &'static str {
    if err_string.contains("EOF while parsing") {
        "Request body is empty. Expected JSON payload"
    } else if err_string.contains("unknown variant") {
        "Invalid enum value. Check allowed values for this field"
    } else if err_string.contains("missing field") {
        "Required field is missing"
    } else {
        "Invalid JSON format"
    }
}

/// Creates a configured JsonConfig with standardized error handling for the entire project
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default().error_handler(|err, _req| match err {
        actix_web_validator::Error::Validate(validation_errors) => bad_request(ErrorResponse {
            error: "Validation failed".to_string(),
            fields: field_errors_json(&validation_errors),
        }),
        actix_web_validator::Error::Deserialize(de_err) => {
            bad_request(ErrorResponse::message(
                "Request validation failed",
                classify_body_error(&de_err.to_string()),
            ))
        }
        actix_web_validator::Error::JsonPayloadError(payload_err) => {
            bad_request(ErrorResponse::message(
                "Request validation failed",
                classify_body_error(&payload_err.to_string()),
            ))
        }
        _ => bad_request(ErrorResponse::message("Validation failed", "Validation error")),
    })
}

/// Multipart limits plus the same error body the JSON extractor produces
pub fn multipart_config(total_limit: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(total_limit)
        .error_handler(|err, _req| {
            bad_request(ErrorResponse::message(
                "Request validation failed",
                err.to_string(),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_spaces_rejects_digits() {
        assert!(validate_letters_and_spaces("Acme Labs").is_ok());
        assert!(validate_letters_and_spaces("Acme 42").is_err());
        assert!(validate_letters_and_spaces("").is_err());
    }

    #[test]
    fn location_allows_commas() {
        assert!(validate_location("Berlin, Germany").is_ok());
        assert!(validate_location("Berlin; Germany").is_err());
    }

    #[test]
    fn password_strength_requires_digit_and_special() {
        assert!(validate_password_strength("hunter2!x").is_ok());
        assert!(validate_password_strength("short1!").is_err());
        assert!(validate_password_strength("nodigits!!").is_err());
        assert!(validate_password_strength("nospecial12").is_err());
        assert!(validate_password_strength("spaces 12!x").is_err());
    }

    #[derive(Debug, serde::Deserialize, validator::Validate)]
    struct SampleForm {
        #[validate(length(min = 1))]
        name: String,
        kind: SampleKind,
    }

    #[derive(Debug, serde::Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum SampleKind {
        Small,
    }

    async fn echo(body: actix_web_validator::Json<SampleForm>) -> HttpResponse {
        let SampleForm { name, kind: SampleKind::Small } = body.into_inner();
        HttpResponse::Ok().body(name)
    }

    #[actix_web::test]
    async fn malformed_json_bodies_get_specific_messages() {
        use actix_web::{test, web, App};

        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .route("/", web::post().to(echo)),
        )
        .await;

        let cases = [
            (r#"{"name": "a", "kind": "huge"}"#, "Invalid enum value. Check allowed values for this field"),
            (r#"{"kind": "small"}"#, "Required field is missing"),
            ("", "Request body is empty. Expected JSON payload"),
            (r#"{"name": 7}"#, "Invalid JSON format"),
        ];

        for (payload, expected) in cases {
            let req = test::TestRequest::post()
                .uri("/")
                .insert_header(("content-type", "application/json"))
                .set_payload(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST, "{payload}");

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["fields"]["message"], expected, "{payload}");
        }
    }

    #[test]
    fn field_errors_json_uses_custom_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("email", invalid("email", "Please enter a valid email address."));

        let json = field_errors_json(&errors);
        assert_eq!(
            json["email"]["errors"][0],
            "Please enter a valid email address."
        );
    }
}
