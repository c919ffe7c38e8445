use crate::server::capabilities::Capabilities;
use serde::{Deserialize, Serialize};

/// Dashboard TOML configuration.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DashboardConfig {
    pub metadata: DashboardInfo,
    #[serde(default = "default_log_path")]
    pub log_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub monitor_server: MonitorServer,
    #[serde(default)]
    pub capabilities: Capabilities,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DashboardInfo {
    pub version: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MonitorServer {
    pub address: String,
    pub port: u16,
    #[serde(default)]
    pub verify_ssl: bool,
}

fn default_log_path() -> String {
    String::from("./vigil.log")
}

fn default_log_level() -> String {
    String::from("warn")
}

impl DashboardConfig {
    /// Config for a server address with everything else defaulted. Used
    /// when no TOML file is given and the address comes from the
    /// environment or the localhost fallback.
    pub fn with_address(address: &str, port: u16) -> DashboardConfig {
        DashboardConfig {
            metadata: DashboardInfo {
                version: env!("CARGO_PKG_VERSION").to_string(),
                name: String::from("vigil"),
            },
            log_path: default_log_path(),
            log_level: default_log_level(),
            monitor_server: MonitorServer {
                address: address.to_string(),
                port,
                verify_ssl: false,
            },
            capabilities: Capabilities::default(),
        }
    }
}
