use serde::{ser::SerializeStruct, Serialize};
use thiserror::Error;

/// Kinds of errors that can be shown to the client.
///
/// Every kind serializes into `{"error": "<message>"}` where the
/// message is the [`Display`](std::fmt::Display) output of the kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Failed to perform request")]
    Internal,
    #[error("Not found")]
    RouteNotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("User not found")]
    UserNotFound,
    #[error("User with this email already exists")]
    EmailExists,
    #[error("User violates a storage constraint")]
    ConstraintViolation,
    #[error("{0}")]
    InvalidFormBody(String),
    #[error("Storage is unavailable")]
    StorageUnavailable,
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Error", 1)?;
        state.serialize_field("error", &self.to_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::Token;

    #[track_caller]
    fn assert_message(value: &Error, message: &'static str) {
        serde_test::assert_ser_tokens(
            value,
            &[
                Token::Struct {
                    name: "Error",
                    len: 1,
                },
                Token::Str("error"),
                Token::Str(message),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_serde_impl() {
        assert_message(&Error::Internal, "Failed to perform request");
        assert_message(&Error::RouteNotFound, "Not found");
        assert_message(&Error::MethodNotAllowed, "Method not allowed");
        assert_message(&Error::UserNotFound, "User not found");
        assert_message(&Error::EmailExists, "User with this email already exists");
        assert_message(&Error::StorageUnavailable, "Storage is unavailable");
        assert_message(
            &Error::InvalidFormBody("Missing required field `name`".into()),
            "Missing required field `name`",
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Error::UserNotFound).unwrap();
        assert_eq!(json, r#"{"error":"User not found"}"#);
    }
}
