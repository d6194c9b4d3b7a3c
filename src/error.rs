//! memfs Error Types

use thiserror::Error;

/// Result type alias for memfs operations
pub type Result<T> = std::result::Result<T, Error>;

/// memfs error types
#[derive(Error, Debug)]
pub enum Error {
    // Namespace errors
    #[error("Path {0} does not exist.")]
    PathNotFound(String),

    #[error("{0}")]
    ImproperArguments(String),

    #[error("Filesystem item with name {0} already exists.")]
    NodeAlreadyExists(String),

    #[error("Directory {0} isn't empty.")]
    DirectoryNonEmpty(String),

    // Virtual disk errors
    #[error("Out of virtual disk space.")]
    OutOfDisk,

    #[error("Extent {start}..{end} references cleared disk slots")]
    CorruptExtent { start: usize, end: usize },

    #[error("Payload codec error: {0}")]
    Codec(#[from] bincode::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for an `ImproperArguments` error
    pub fn usage(message: impl Into<String>) -> Self {
        Error::ImproperArguments(message.into())
    }

    /// Check if the driver should report this error and keep going
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::PathNotFound(_)
                | Error::ImproperArguments(_)
                | Error::NodeAlreadyExists(_)
                | Error::DirectoryNonEmpty(_)
                | Error::OutOfDisk
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::PathNotFound("a/b".into()).to_string(),
            "Path a/b does not exist."
        );
        assert_eq!(
            Error::NodeAlreadyExists("/a".into()).to_string(),
            "Filesystem item with name /a already exists."
        );
        assert_eq!(
            Error::DirectoryNonEmpty("/test1".into()).to_string(),
            "Directory /test1 isn't empty."
        );
        assert_eq!(Error::OutOfDisk.to_string(), "Out of virtual disk space.");
        assert_eq!(Error::usage("Usage: cd target").to_string(), "Usage: cd target");
    }

    #[test]
    fn test_recoverable_set() {
        assert!(Error::OutOfDisk.is_recoverable());
        assert!(Error::usage("x").is_recoverable());
        assert!(!Error::Config("bad".into()).is_recoverable());
        assert!(!Error::CorruptExtent { start: 0, end: 1 }.is_recoverable());
    }
}
