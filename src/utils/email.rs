use crate::error::{AppError, AppResult};
use regex::Regex;

/// Lower-cases and trims an address. Applied before every store lookup
/// or insert so the same mailbox always maps to the same rows.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Syntax check used at voter registration. OTP issuance deliberately
/// accepts any non-blank address.
pub fn validate_email(email: &str) -> AppResult<()> {
    let email_regex = Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();

    if !email_regex.is_match(email) {
        return Err(AppError::ValidationError(
            "Invalid email address".to_string(),
        ));
    }

    Ok(())
}
