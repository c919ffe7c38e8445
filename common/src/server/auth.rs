use serde::{Deserialize, Serialize};

/// Credentials sent to `POST /login`. The deployed endpoint uses the short
/// field names `tk` (account) and `mk` (password).
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "tk")]
    pub account: String,
    #[serde(rename = "mk")]
    pub password: String,
}

/// Successful login response carrying the opaque session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "tk")]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::{LoginRequest, LoginResponse};

    #[test]
    fn test_login_request_wire_names() {
        let request = LoginRequest {
            account: String::from("operator"),
            password: String::from("hunter2"),
        };
        let body = serde_json::to_string(&request).unwrap();
        assert_eq!(body, r#"{"tk":"operator","mk":"hunter2"}"#);
    }

    #[test]
    fn test_login_response() {
        let response: LoginResponse = serde_json::from_str(r#"{"tk":"session-token"}"#).unwrap();
        assert_eq!(response.token, "session-token");
    }
}
