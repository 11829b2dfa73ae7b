//! Input normalization and validation for account payloads.

use std::sync::LazyLock;

use regex::{Regex, RegexSet};

use crate::prelude::*;
use crate::user::{PasswordChange, RegisterRequest};

pub const INVALID_EMAIL: &str = "invalid email address.";
pub const WEAK_PASSWORD: &str =
    "Password must have upperLetter, lowerLetter, number, specialChar, and longer than 8.";
pub const INVALID_CONFIRM_PASSWORD: &str = "invalid confirm password.";
pub const PASSWORDS_DO_NOT_MATCH: &str = "passwords does not match.";

const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$").expect("email pattern compiles")
});

/// Trims and lower-cases an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Expects an already normalized address.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_REGEX.is_match(email)
}

/// Upper-case letter, lower-case letter, number, punctuation or symbol.
static PASSWORD_CLASSES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([r"\p{Lu}", r"\p{Ll}", r"\p{N}", r"[\p{P}\p{S}]"])
        .expect("password classes compile")
});

/// At least eight bytes containing every class in [`PASSWORD_CLASSES`].
pub fn is_strong_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN && PASSWORD_CLASSES.matches(password).matched_all()
}

fn check_password_pair(password: &mut String, confirm: &mut String) -> Result<()> {
    *password = password.trim().to_string();
    if password.is_empty() || !is_strong_password(password) {
        return Err(Error::bad_request(WEAK_PASSWORD));
    }

    *confirm = confirm.trim().to_string();
    if confirm.is_empty() {
        return Err(Error::bad_request(INVALID_CONFIRM_PASSWORD));
    }

    if password != confirm {
        return Err(Error::bad_request(PASSWORDS_DO_NOT_MATCH));
    }
    Ok(())
}

/// Normalizes a registration payload in place and validates it.
pub fn validate_registration(request: &mut RegisterRequest) -> Result<()> {
    request.first_name = request.first_name.trim().to_string();
    request.last_name = request.last_name.trim().to_string();

    request.email = normalize_email(&request.email);
    if !is_valid_email(&request.email) {
        return Err(Error::bad_request(INVALID_EMAIL));
    }

    check_password_pair(&mut request.password, &mut request.confirm_password)
}

pub fn validate_password_change(request: &mut PasswordChange) -> Result<()> {
    check_password_pair(&mut request.password, &mut request.confirm_password)
}
