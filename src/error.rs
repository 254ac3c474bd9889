use thiserror::Error;

/// Coarse classification callers map onto their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    UserInput,
    NotFound,
    Upstream,
    Configuration,
    Internal,
}

/// Errors surfaced by the export pipeline and its collaborators.
///
/// Every external call is attempted exactly once; whatever fails is carried
/// here with the upstream message intact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream query failed ({source_name}): {detail}")]
    UpstreamQuery {
        source_name: &'static str,
        detail: String,
    },

    #[error("service unavailable: {0} is not configured")]
    ServiceUnavailable(&'static str),

    #[error("archive encoding failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub fn upstream(source_name: &'static str, detail: impl Into<String>) -> Self {
        Self::UpstreamQuery {
            source_name,
            detail: detail.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::UserInput,
            Self::NotFound(_) => ErrorClass::NotFound,
            Self::UpstreamQuery { .. } => ErrorClass::Upstream,
            Self::ServiceUnavailable(_) => ErrorClass::Configuration,
            Self::Archive(_) | Self::Io(_) => ErrorClass::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_keeps_detail_verbatim() {
        let err = ExportError::upstream("subgraph", "indexing_error: block not found");
        assert_eq!(err.class(), ErrorClass::Upstream);
        assert_eq!(
            err.to_string(),
            "upstream query failed (subgraph): indexing_error: block not found"
        );
    }

    #[test]
    fn test_service_unavailable_is_configuration_class() {
        let err = ExportError::ServiceUnavailable("ai");
        assert_eq!(err.class(), ErrorClass::Configuration);
        assert_eq!(err.to_string(), "service unavailable: ai is not configured");
    }
}
