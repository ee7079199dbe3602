//! Shared request field checks

use std::borrow::Cow;

use validator::ValidationError;

/// Rejects values that are empty once trimmed, since every write trims
/// before it reaches the sheet.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}
