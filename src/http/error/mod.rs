use error_stack::{Context, Report};
use tracing_error::SpanTrace;

use crate::types;

mod impls;

pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by request handlers.
///
/// The client only sees the [API error kind](types::Error), the
/// report and the span trace are kept for the logs.
pub struct Error {
    report: Report<types::Error>,
    trace: SpanTrace,
}

impl Error {
    #[must_use]
    pub fn from_context(error_type: types::Error, context: impl Context) -> Self {
        Self::from_report(error_type, Report::new(context))
    }

    #[must_use]
    pub fn from_report(error_type: types::Error, report: Report<impl Context>) -> Self {
        Self {
            report: report.change_context(error_type),
            trace: SpanTrace::capture(),
        }
    }
}

impl Error {
    #[must_use]
    pub fn as_type(&self) -> &types::Error {
        self.report.current_context()
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("type", self.as_type())
            .field("report", &self.report)
            .field("trace", &self.trace)
            .finish()
    }
}

// Single line; the report and the span trace go into their own log fields.
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_type(), f)
    }
}
