use thiserror::Error;

/// Failure of a call to the user service.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("config error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("request failed ({status}){}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Http { status: u16, detail: Option<String> },
    #[error("response error: {0}")]
    Parse(String),
    #[error("request error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Server-provided reason, when the response carried one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_decode() {
            Self::Parse(error.to_string())
        } else if error.is_builder() {
            Self::Serialization(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_exposes_detail_and_status() {
        let error = ApiError::Http {
            status: 404,
            detail: Some("unknown account".to_string()),
        };
        assert_eq!(error.detail(), Some("unknown account"));
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.to_string(), "request failed (404): unknown account");
    }

    #[test]
    fn http_error_without_detail() {
        let error = ApiError::Http {
            status: 500,
            detail: None,
        };
        assert_eq!(error.detail(), None);
        assert_eq!(error.to_string(), "request failed (500)");
    }

    #[test]
    fn transport_errors_have_no_detail() {
        let error = ApiError::Network("connection refused".to_string());
        assert_eq!(error.detail(), None);
        assert_eq!(error.status(), None);
    }
}
