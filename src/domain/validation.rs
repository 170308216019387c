//! Pure validation rules for link fields.
//!
//! Both functions trim their input before checking it. Callers are expected to
//! store the trimmed value.

use url::Url;

use crate::error::AppError;

pub const SHORT_NAME_MIN_LEN: usize = 4;
pub const SHORT_NAME_MAX_LEN: usize = 32;

/// Checks that `raw` is an absolute `http` or `https` URL with a host.
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] for empty input, unparseable or relative
/// URLs, and any other scheme.
pub fn validate_original_url(raw: &str) -> Result<(), AppError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::InvalidUrl);
    }

    let parsed = Url::parse(value).map_err(|_| AppError::InvalidUrl)?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::InvalidUrl);
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::InvalidUrl);
    }

    Ok(())
}

/// Checks that `raw` is 4 to 32 ASCII letters or digits.
///
/// # Errors
///
/// Returns [`AppError::InvalidShortName`] when the rule is violated.
pub fn validate_short_name(raw: &str) -> Result<(), AppError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::InvalidShortName);
    }

    if !(SHORT_NAME_MIN_LEN..=SHORT_NAME_MAX_LEN).contains(&value.len()) {
        return Err(AppError::InvalidShortName);
    }

    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::InvalidShortName);
    }

    Ok(())
}
