use derive_more::Display;

/// Error taxonomy for the dashboard pipeline.
///
/// Fetch-side variants never reach the user: the fetcher masks them with
/// fallback data and only records them as provenance.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    /// Transport failure or non-2xx status.
    #[display(fmt = "Fetch failure: {}", _0)]
    FetchFailure(String),
    /// Body arrived but could not be decoded into the expected shape.
    #[display(fmt = "Malformed response: {}", _0)]
    MalformedResponse(String),
    /// A metal, currency or year referenced by the pipeline is missing.
    #[display(fmt = "Data unavailable: {}", _0)]
    DataUnavailable(String),
    #[display(fmt = "Rendering error: {}", _0)]
    Rendering(String),
}

impl AppError {
    /// Whether the error came from the network side of the pipeline.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, AppError::FetchFailure(_) | AppError::MalformedResponse(_))
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_count_as_fetch_failures() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(err.is_fetch_failure());
        assert!(err.to_string().starts_with("Malformed response:"));
    }

    #[test]
    fn data_unavailable_is_not_a_fetch_failure() {
        let err = AppError::DataUnavailable("palladium history".into());
        assert!(!err.is_fetch_failure());
        assert_eq!(err.to_string(), "Data unavailable: palladium history");
    }
}
