/// Failure classes surfaced by [`crate::ApiClient`].
///
/// `Network` means no usable response arrived; `Server` means the backend
/// answered and reported failure, either as a non-2xx status or as a
/// non-zero envelope code under HTTP 200. Stale-response handling is not an
/// error: superseded completions are discarded by the feed layer before
/// they reach the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("server error ({status}): {message}")]
    Server {
        status: u16,
        /// Envelope `code` when the error body carried one.
        code: Option<i64>,
        message: String,
    },

    /// A 2xx body that did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// A token-requiring call was made while logged out.
    #[error("not logged in")]
    NotAuthenticated,
}

impl ApiError {
    /// Worth retrying: transport failures and 5xx answers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_display_status_and_message() {
        let err = ApiError::Server {
            status: 401,
            code: Some(1102),
            message: "token expired".to_string(),
        };
        assert_eq!(err.to_string(), "server error (401): token expired");
    }

    #[test]
    fn only_network_and_5xx_are_transient() {
        let five_hundred = ApiError::Server {
            status: 502,
            code: None,
            message: "bad gateway".to_string(),
        };
        let four_hundred = ApiError::Server {
            status: 404,
            code: Some(2001),
            message: "not found".to_string(),
        };
        assert!(five_hundred.is_transient());
        assert!(!four_hundred.is_transient());
        assert!(!ApiError::NotAuthenticated.is_transient());
        assert!(!ApiError::Decode("bad json".to_string()).is_transient());
    }
}
