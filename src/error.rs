/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Movie \"{query}\" not found in database")]
    NotFound { query: String },

    #[error("Server error: {status}")]
    Server { status: u16 },

    #[error("Backend server not running. Please start the backend.")]
    BackendUnavailable,

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{0}")]
    DetailFetch(String),

    #[error("Preference store error: {0}")]
    Store(String),

    #[error("Failed to load config: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Classifies a transport failure from the HTTP client
    ///
    /// Connection-level failures mean the backend is not reachable at all;
    /// everything else is passed through untouched.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() {
            AppError::BackendUnavailable
        } else {
            AppError::HttpClient(err)
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Store(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Store(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = AppError::NotFound {
            query: "Nonexistent Film".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Movie \"Nonexistent Film\" not found in database"
        );
    }

    #[test]
    fn test_server_error_message() {
        let err = AppError::Server { status: 500 };
        assert_eq!(err.to_string(), "Server error: 500");
    }

    #[test]
    fn test_backend_unavailable_message() {
        assert_eq!(
            AppError::BackendUnavailable.to_string(),
            "Backend server not running. Please start the backend."
        );
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = AppError::Validation("Please enter a movie title.".to_string());
        assert_eq!(err.to_string(), "Please enter a movie title.");
    }

    #[test]
    fn test_io_error_maps_to_store() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(AppError::from(io), AppError::Store(_)));
    }
}
