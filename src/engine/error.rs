use thiserror::Error;

/// Everything that can go wrong between asking for a scene and showing it.
///
/// Authentication failures are fatal; transport and throttling failures may
/// be retried by the player; malformed scenes are handled inside the
/// controller (one silent regeneration, then a graceful ending).
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("network failure talking to the story service: {0}")]
    Transport(String),

    #[error("the story service is throttling requests, try again in a moment")]
    RateLimit,

    #[error("story service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("the story service returned no usable completion: {0}")]
    EmptyCompletion(String),

    #[error("malformed scene: {0}")]
    MalformedResponse(String),

    #[error("choice {0} is not available")]
    InvalidChoice(usize),
}

impl StoryError {
    /// Whether the player may usefully re-attempt the same turn. Client
    /// errors (4xx) are excluded: re-sending the identical request cannot
    /// succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoryError::Transport(_) | StoryError::RateLimit | StoryError::EmptyCompletion(_) => {
                true
            }
            StoryError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, StoryError::Authentication(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_throttling_are_retryable() {
        assert!(StoryError::Transport("connection reset".into()).is_retryable());
        assert!(StoryError::RateLimit.is_retryable());
        assert!(StoryError::Api {
            status: 500,
            message: String::new()
        }
        .is_retryable());
    }

    #[test]
    fn an_unusable_completion_is_retryable() {
        assert!(StoryError::EmptyCompletion("no choices".into()).is_retryable());
    }

    #[test]
    fn client_side_api_errors_are_not_retryable() {
        let err = StoryError::Api {
            status: 400,
            message: "bad request".into(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn auth_is_fatal_not_retryable() {
        let err = StoryError::Authentication("key rejected".into());
        assert!(err.is_fatal());
        assert!(!err.is_retryable());
    }

    #[test]
    fn malformed_is_neither_fatal_nor_retryable() {
        let err = StoryError::MalformedResponse("no choices".into());
        assert!(!err.is_fatal());
        assert!(!err.is_retryable());
    }
}
