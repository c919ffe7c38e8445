use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    BuildClient,
    Request,
    BadCredentials,
    Deserialize,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::BuildClient => write!(f, "Failed to create login client"),
            SessionError::Request => write!(f, "Failed to reach monitor server"),
            SessionError::BadCredentials => write!(f, "Monitor server rejected the credentials"),
            SessionError::Deserialize => write!(f, "Failed to deserialize login response"),
        }
    }
}
