//! Filename checks applied before any filesystem access.

use crate::errors::AppError;

pub const ALLOWED_EXTENSIONS: [&str; 2] = [".log", ".txt"];

pub fn has_allowed_extension(name: &str) -> bool {
    ALLOWED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Literal substring check, not a resolved-path comparison: any `..`, `/`
/// or `\` in the requested name is rejected outright.
pub fn is_traversal_attempt(name: &str) -> bool {
    name.contains("..") || name.contains('/') || name.contains('\\')
}

pub fn validate_filename(name: &str) -> Result<(), AppError> {
    if is_traversal_attempt(name) {
        return Err(AppError::InvalidFilename);
    }
    if !has_allowed_extension(name) {
        return Err(AppError::InvalidFileType);
    }
    Ok(())
}
