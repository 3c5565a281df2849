use std::fmt;

/// Error produced by an external cost predictor.
///
/// The core never inspects or retries these; they are carried to the caller
/// as-is and remain reachable through [`std::error::Error::source`].
pub type PredictorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the analytics routines
#[derive(Debug)]
pub enum AnalyticsError {
    /// Arguments the caller must fix: mismatched lengths, empty mandatory
    /// series, unknown field names, values that do not fit their parameter
    InvalidInput {
        operation: &'static str,
        reason: String,
    },
    /// A what-if request named a parameter outside `PredictionInput`
    UnknownParameter(String),
    /// The injected predictor failed
    Predictor(PredictorError),
}

impl AnalyticsError {
    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        AnalyticsError::InvalidInput {
            operation,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsError::InvalidInput { operation, reason } => {
                write!(f, "invalid input to {operation}: {reason}")
            }
            AnalyticsError::UnknownParameter(name) => write!(f, "unknown parameter '{name}'"),
            AnalyticsError::Predictor(e) => write!(f, "cost predictor failed: {e}"),
        }
    }
}

impl std::error::Error for AnalyticsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyticsError::Predictor(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<PredictorError> for AnalyticsError {
    fn from(e: PredictorError) -> Self {
        AnalyticsError::Predictor(e)
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[derive(Debug)]
    struct Timeout;

    impl fmt::Display for Timeout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "prediction service timed out")
        }
    }

    impl std::error::Error for Timeout {}

    #[test]
    fn test_predictor_error_keeps_source() {
        let err = AnalyticsError::from(Box::new(Timeout) as PredictorError);

        assert_eq!(
            err.to_string(),
            "cost predictor failed: prediction service timed out"
        );
        let source = err.source().unwrap();
        assert!(source.downcast_ref::<Timeout>().is_some());
    }

    #[test]
    fn test_invalid_input_display() {
        let err = AnalyticsError::invalid("correlate", "xs has 3 values, ys has 2");
        assert_eq!(
            err.to_string(),
            "invalid input to correlate: xs has 3 values, ys has 2"
        );
        assert!(err.source().is_none());
    }
}
