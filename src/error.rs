use std::fmt;

/// Rejected sector or texture backing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataError {
    /// No header byte(s) at all.
    Empty,
    TooManyPoints { count: usize, max: usize },
    /// Fewer bytes than the header promises.
    Truncated { expected: usize, actual: usize },
    ZeroDimension,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Empty => write!(f, "data is empty"),
            DataError::TooManyPoints { count, max } => {
                write!(f, "sector has {count} points, at most {max} are supported")
            }
            DataError::Truncated { expected, actual } => {
                write!(f, "expected {expected} bytes of data, found {actual}")
            }
            DataError::ZeroDimension => write!(f, "texture width and height must be non-zero"),
        }
    }
}

impl std::error::Error for DataError {}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "could not read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
