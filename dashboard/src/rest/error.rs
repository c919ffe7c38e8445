use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum RestError {
    BuildClient,
    Request,
    /// Non-2xx response. Carries the raw body so the alert can show the
    /// server's own words.
    Rejected(String),
    Deserialize,
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BuildClient => write!(f, "Failed to create monitor server client"),
            RestError::Request => write!(f, "Failed to reach monitor server"),
            RestError::Rejected(body) => write!(f, "{body}"),
            RestError::Deserialize => write!(f, "Failed to deserialize monitor server response"),
        }
    }
}
