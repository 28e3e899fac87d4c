use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("No response within the link timeout")]
    Timeout,
    #[error("Command was not acknowledged")]
    NotAcknowledged,
    #[error("Expected {expected} response bytes, got {actual}")]
    MalformedResponse { expected: usize, actual: usize },
}

pub type LinkResult<T> = Result<T, LinkError>;
