use super::error::SessionError;
use common::server::{
    auth::{LoginRequest, LoginResponse},
    config::DashboardConfig,
};
use log::error;
use reqwest::ClientBuilder;

/// Exchange credentials for a session token at `POST /login`. One attempt,
/// no retry; the caller shows a generic message on any failure.
pub(crate) async fn login(
    config: &DashboardConfig,
    account: &str,
    password: &str,
) -> Result<String, SessionError> {
    let client_result = ClientBuilder::new()
        .danger_accept_invalid_certs(!config.monitor_server.verify_ssl)
        .user_agent(format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
        .build();

    let client = match client_result {
        Ok(result) => result,
        Err(err) => {
            error!("[session] Could not create login client: {err:?}");
            return Err(SessionError::BuildClient);
        }
    };

    let request = LoginRequest {
        account: account.to_string(),
        password: password.to_string(),
    };

    let url = format!(
        "http://{}:{}/login",
        config.monitor_server.address, config.monitor_server.port
    );
    let response_result = client.post(&url).json(&request).send().await;
    let response = match response_result {
        Ok(result) => result,
        Err(err) => {
            error!("[session] Could not send login request: {err:?}");
            return Err(SessionError::Request);
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!("[session] Non-2xx login response {status}: {body}");
        return Err(SessionError::BadCredentials);
    }

    let data_result = response.json::<LoginResponse>().await;
    let data = match data_result {
        Ok(result) => result,
        Err(err) => {
            error!("[session] Could not deserialize login response: {err:?}");
            return Err(SessionError::Deserialize);
        }
    };

    Ok(data.token)
}

#[cfg(test)]
mod tests {
    use super::login;
    use crate::session::error::SessionError;
    use common::server::config::DashboardConfig;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    #[tokio::test]
    async fn test_login() {
        let server = MockServer::start();
        let config = DashboardConfig::with_address("127.0.0.1", server.port());

        let mock_me = server.mock(|when, then| {
            when.method(POST)
                .path("/login")
                .json_body(json!({"tk": "operator", "mk": "hunter2"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"tk": "session-token"}));
        });

        let token = login(&config, "operator", "hunter2").await.unwrap();
        assert_eq!(token, "session-token");
        mock_me.assert();
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let server = MockServer::start();
        let config = DashboardConfig::with_address("127.0.0.1", server.port());

        let mock_me = server.mock(|when, then| {
            when.method(POST).path("/login");
            then.status(401).body("bad account or password");
        });

        let result = login(&config, "operator", "wrong").await;
        assert_eq!(result.unwrap_err(), SessionError::BadCredentials);
        mock_me.assert();
    }

    #[tokio::test]
    async fn test_login_bad_body() {
        let server = MockServer::start();
        let config = DashboardConfig::with_address("127.0.0.1", server.port());

        let mock_me = server.mock(|when, then| {
            when.method(POST).path("/login");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"unexpected": "shape"}));
        });

        let result = login(&config, "operator", "hunter2").await;
        assert_eq!(result.unwrap_err(), SessionError::Deserialize);
        mock_me.assert();
    }

    #[tokio::test]
    async fn test_login_unreachable() {
        // Nothing listens on port 1.
        let config = DashboardConfig::with_address("127.0.0.1", 1);

        let result = login(&config, "operator", "hunter2").await;
        assert_eq!(result.unwrap_err(), SessionError::Request);
    }
}
