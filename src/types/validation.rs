use thiserror::Error;

/// Checks a deserialized request and converts it into a record
/// that is ready to be handed to the database.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidateError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),
    #[error("Field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("Field `{0}` must be at most {1} characters long")]
    TooLong(&'static str, usize),
}

/// Requires the field to be present and to have at least
/// one character in it.
pub fn required(field: &'static str, value: Option<String>) -> Result<String, ValidateError> {
    match value {
        Some(value) if value.is_empty() => Err(ValidateError::EmptyField(field)),
        Some(value) => Ok(value),
        None => Err(ValidateError::MissingField(field)),
    }
}

/// Rejects values with more than `max` characters (not bytes).
pub fn max_chars(field: &'static str, value: String, max: usize) -> Result<String, ValidateError> {
    if value.chars().count() > max {
        Err(ValidateError::TooLong(field, max))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("name", Some("Alice".into())), Ok("Alice".into()));
        assert_eq!(
            required("name", Some(String::new())),
            Err(ValidateError::EmptyField("name"))
        );
        assert_eq!(
            required("email", None),
            Err(ValidateError::MissingField("email"))
        );
    }

    #[test]
    fn test_max_chars_counts_characters() {
        assert_eq!(max_chars("name", "a".repeat(100), 100), Ok("a".repeat(100)));
        assert_eq!(
            max_chars("name", "a".repeat(101), 100),
            Err(ValidateError::TooLong("name", 100))
        );
        // 100 characters but 200 bytes
        assert!(max_chars("name", "é".repeat(100), 100).is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidateError::MissingField("name").to_string(),
            "Missing required field `name`"
        );
        assert_eq!(
            ValidateError::EmptyField("email").to_string(),
            "Field `email` must not be empty"
        );
        assert_eq!(
            ValidateError::TooLong("name", 100).to_string(),
            "Field `name` must be at most 100 characters long"
        );
    }
}
