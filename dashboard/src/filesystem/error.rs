use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum FileSystemError {
    ReadFile,
    BadToml,
}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::ReadFile => write!(f, "Failed to read dashboard config file"),
            FileSystemError::BadToml => write!(f, "Failed to parse dashboard config TOML"),
        }
    }
}
