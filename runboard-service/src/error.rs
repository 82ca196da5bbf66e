use thiserror::Error;

/// Transient failures surfaced by the run service.
///
/// Every variant means "nothing happened, try again": no partial data is
/// returned and no record was written. Retrying is the caller's job.
/// A missing record is not an error; lookups return `Ok(None)` for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Unable to load runs from mock service. Please retry.")]
    ListUnavailable,
    #[error("Unable to load run details from mock service. Please retry.")]
    DetailUnavailable,
    #[error("Unable to create run in mock service. Please retry.")]
    CreateUnavailable,
}

impl ServiceError {
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::ListUnavailable
            | ServiceError::DetailUnavailable
            | ServiceError::CreateUnavailable => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_failures_are_retryable() {
        for err in [
            ServiceError::ListUnavailable,
            ServiceError::DetailUnavailable,
            ServiceError::CreateUnavailable,
        ] {
            assert!(err.is_retryable());
            assert!(err.to_string().ends_with("Please retry."));
        }
    }
}
