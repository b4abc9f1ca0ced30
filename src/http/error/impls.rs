use actix_web::{body::BoxBody, error::JsonPayloadError, http::StatusCode, HttpResponse};
use error_stack::Report;
use thiserror::Error;

use super::Error;
use crate::{
    database,
    types::{validation::ValidateError, Error as ErrorType},
};

impl actix_web::ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.as_type() {
            ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::RouteNotFound | ErrorType::UserNotFound => StatusCode::NOT_FOUND,
            ErrorType::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorType::EmailExists => StatusCode::CONFLICT,
            ErrorType::ConstraintViolation | ErrorType::InvalidFormBody(..) => {
                StatusCode::BAD_REQUEST
            }
            ErrorType::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                report = ?self.report,
                trace = %self.trace,
                "Request failed"
            );
        } else {
            tracing::debug!(error = %self, report = ?self.report, "Request rejected");
        }
        HttpResponse::build(status).json(self.as_type())
    }
}

impl From<Report<database::Error>> for Error {
    fn from(value: Report<database::Error>) -> Self {
        let error_type = match value.current_context() {
            database::Error::UniqueViolation => ErrorType::EmailExists,
            database::Error::ConstraintViolation => ErrorType::ConstraintViolation,
            database::Error::UnhealthyPool | database::Error::Timeout => {
                ErrorType::StorageUnavailable
            }
            database::Error::InvalidUrl | database::Error::Internal => ErrorType::Internal,
        };
        Error::from_report(error_type, value)
    }
}

impl From<ValidateError> for Error {
    fn from(value: ValidateError) -> Self {
        Error::from_context(ErrorType::InvalidFormBody(value.to_string()), value)
    }
}

#[derive(Debug, Error)]
#[error("Could not parse JSON body")]
struct InvalidJsonBody;

impl From<JsonPayloadError> for Error {
    fn from(value: JsonPayloadError) -> Self {
        let message = match &value {
            JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
            JsonPayloadError::Deserialize(error) => format!("Invalid JSON body: {error}"),
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                "Request body is too large".to_string()
            }
            _ => "Could not read request body".to_string(),
        };

        let report = Report::new(InvalidJsonBody).attach_printable(value.to_string());
        Error::from_report(ErrorType::InvalidFormBody(message), report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[track_caller]
    fn status_of(error: database::Error) -> StatusCode {
        Error::from(Report::new(error)).status_code()
    }

    #[test]
    fn database_errors_to_status() {
        assert_eq!(status_of(database::Error::UniqueViolation), StatusCode::CONFLICT);
        assert_eq!(
            status_of(database::Error::ConstraintViolation),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(database::Error::UnhealthyPool),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(database::Error::Timeout),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(database::Error::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_error_is_bad_request() {
        let error = Error::from(ValidateError::MissingField("name"));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.as_type(),
            &ErrorType::InvalidFormBody("Missing required field `name`".into())
        );
        assert!(error.report.downcast_ref::<ValidateError>().is_some());
    }

    #[test]
    fn content_type_rejection_is_bad_request() {
        let error = Error::from(JsonPayloadError::ContentType);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn display_is_single_line() {
        let error = Error::from(Report::new(database::Error::Internal))
            .report
            .attach_printable("first line\nsecond line");
        let error = Error::from_report(ErrorType::Internal, error);

        assert_eq!(error.to_string(), "Failed to perform request");
        assert!(format!("{error:?}").contains("second line"));
    }

    #[test]
    fn database_report_is_kept() {
        let error = Error::from(Report::new(database::Error::Internal));
        assert_eq!(error.as_type(), &ErrorType::Internal);
        assert!(error.report.downcast_ref::<database::Error>().is_some());
    }
}
