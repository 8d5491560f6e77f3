use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("A generation request is already in progress")]
    Busy,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Errors the user can fix by changing their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::Service { status: 502, message: "Bad Gateway".to_string() };
        assert_eq!(err.to_string(), "Service error (502): Bad Gateway");

        let err = Error::Validation("Topic and creator name are required".to_string());
        assert_eq!(err.to_string(), "Topic and creator name are required");
        assert!(err.is_validation());
        assert!(!Error::Busy.is_validation());
    }
}
