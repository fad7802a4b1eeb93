use common::subscription::FieldErrors;
use thiserror::Error;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected before anything was sent.
    #[error("Please fix the highlighted fields: {0}")]
    Validation(FieldErrors),

    /// The server answered 404 for this row.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server answered with any other non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never got an answer, or the answer was unreadable.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid API address: {0}")]
    Url(#[from] url::ParseError),

    /// A workflow step was called in a state that does not allow it.
    #[error("{0}")]
    InvalidState(&'static str),
}

impl From<FieldErrors> for ClientError {
    fn from(errors: FieldErrors) -> Self {
        ClientError::Validation(errors)
    }
}

impl ClientError {
    /// Failures that came from talking to the server rather than from local input.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::NotFound(_) | ClientError::Status { .. } | ClientError::Transport(_)
        )
    }
}
