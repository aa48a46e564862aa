use thiserror::Error;

/// Failure of a request against the dashboard backend.
///
/// Both variants end up in front of the user the same way (a toast), the
/// split only matters for which message gets shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, refused, TLS, aborted).
    #[error("{0}")]
    Transport(String),
    /// The server answered, but with a failure payload or an unusable body.
    #[error("{message}")]
    Application { status: u16, message: String },
}

impl FetchError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        FetchError::Transport(err.to_string())
    }

    pub fn application(status: u16, message: impl Into<String>) -> Self {
        FetchError::Application {
            status,
            message: message.into(),
        }
    }

    /// Text for a notification: the server's own message when there is one,
    /// `fallback` when the request never got an answer.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FetchError::Transport(_) => fallback.to_string(),
            FetchError::Application { message, .. } => message.clone(),
        }
    }

    #[cfg(test)]
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}
