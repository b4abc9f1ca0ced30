use serde::Deserialize;

use crate::schema::NewUser;
use crate::types::validation::{max_chars, required, Validate, ValidateError};

/// Body of `POST /users`.
///
/// Both fields are optional at this stage so a missing field
/// can be reported with a readable message instead of a
/// generic JSON deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct Request {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Validate for Request {
    type Output = NewUser;

    fn validate(self) -> Result<NewUser, ValidateError> {
        let name = required("name", self.name)?;
        let email = required("email", self.email)?;
        Ok(NewUser {
            name: max_chars("name", name, NewUser::MAX_NAME_LEN)?,
            email: max_chars("email", email, NewUser::MAX_EMAIL_LEN)?,
        })
    }
}
