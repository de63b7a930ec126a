use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::api::validation::{
    validate_letters_and_spaces, validate_not_blank, validate_password_strength,
};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub password: String,
}

fn validate_terms_accepted(accepted: &bool) -> Result<(), ValidationError> {
    if *accepted {
        Ok(())
    } else {
        Err(ValidationError::new("terms").with_message(Cow::Borrowed(
            "You must accept the terms and conditions.",
        )))
    }
}

/// Sign-up form; validated and acknowledged, never stored
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        length(min = 1, message = "Full name is required."),
        custom(function = "validate_letters_and_spaces")
    )]
    pub full_name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub confirm_password: String,
    #[serde(default)]
    #[validate(custom(function = "validate_terms_accepted"))]
    pub terms_accepted: bool,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
}

impl AuthResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
