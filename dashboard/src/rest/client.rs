use super::error::RestError;
use crate::editor::buffer::EditBuffer;
use common::{
    machine::{MachineRecord, Registry},
    server::config::DashboardConfig,
};
use log::error;
use reqwest::{ClientBuilder, Response};

/// REST client for the monitor server. Cheap to clone; spawned mutation
/// tasks each take their own copy.
#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base: String,
}

impl RestClient {
    pub fn new(config: &DashboardConfig) -> Result<RestClient, RestError> {
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
                error!("[rest] Could not create client: {err:?}");
                return Err(RestError::BuildClient);
            }
        };

        Ok(RestClient {
            client,
            base: format!(
                "http://{}:{}",
                config.monitor_server.address, config.monitor_server.port
            ),
        })
    }

    /// One-time full registry pull, used to seed the view on startup.
    pub async fn fetch_clients(&self) -> Result<Registry, RestError> {
        let response = self.send(self.client.get(format!("{}/clients", self.base))).await?;

        let data_result = response.json::<Registry>().await;
        match data_result {
            Ok(result) => Ok(result),
            Err(err) => {
                error!("[rest] Could not deserialize registry: {err:?}");
                Err(RestError::Deserialize)
            }
        }
    }

    /// Persist the currently displayed record for `id`. The identity key
    /// travels in the path, never in the body.
    pub async fn save_client(&self, id: &str, record: &MachineRecord) -> Result<(), RestError> {
        self.send(
            self.client
                .post(format!("{}/save/{id}", self.base))
                .json(record),
        )
        .await?;
        Ok(())
    }

    /// Persist explicit edits for `id` as a partial patch of the editable
    /// fields.
    pub async fn update_client(&self, id: &str, buffer: &EditBuffer) -> Result<(), RestError> {
        self.send(
            self.client
                .put(format!("{}/update/{id}", self.base))
                .json(buffer),
        )
        .await?;
        Ok(())
    }

    pub async fn delete_client(&self, id: &str) -> Result<(), RestError> {
        self.send(self.client.delete(format!("{}/clients/{id}", self.base)))
            .await?;
        Ok(())
    }

    /// Send a request and fail any non-2xx response with its body text.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Response, RestError> {
        let response_result = builder.send().await;
        let response = match response_result {
            Ok(result) => result,
            Err(err) => {
                error!("[rest] Could not send request: {err:?}");
                return Err(RestError::Request);
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("[rest] Non-2xx response {status}: {body}");
            return Err(RestError::Rejected(body));
        }

        Ok(response)
    }
}
