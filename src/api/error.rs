use thiserror::Error;

/// Failures from the RepoHealth HTTP collaborator.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response (DNS, refused
    /// connection, closed socket).
    #[error("connection failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(reqwest::StatusCode),

    /// The server answered with something other than JSON, typically an
    /// HTML login page when the session cookie has expired.
    #[error("unexpected response content type: {0}")]
    UnexpectedContentType(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Status(_) => ErrorKind::Status,
            ApiError::UnexpectedContentType(_) => ErrorKind::ContentType,
        }
    }
}

/// Coarse error category, kept alongside the message in view state so the
/// UI can pick a presentation without re-parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Status,
    ContentType,
}

/// Cloneable error snapshot stored in component state.
///
/// `ApiError` wraps `reqwest::Error`, which is not `Clone`; the view layer
/// only needs the category and the rendered message.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_errors_render_the_code() {
        let err = ApiError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "server responded with status 502 Bad Gateway");
        assert_eq!(err.kind(), ErrorKind::Status);
    }

    #[test]
    fn content_type_errors_name_what_arrived() {
        let err = ApiError::UnexpectedContentType("text/html".to_string());
        let fetch: FetchError = err.into();

        assert_eq!(fetch.kind, ErrorKind::ContentType);
        assert!(fetch.message.contains("unexpected response content type"));
        assert!(fetch.message.contains("text/html"));
    }
}
