use super::error::FileSystemError;
use common::server::config::DashboardConfig;
use log::error;
use std::{env, str::from_utf8};

/// Environment variable naming the monitor server when no config file is
/// given, as `host` or `host:port`.
const SERVER_ENV: &str = "VIGIL_SERVER";

const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4001;

/// Resolve the dashboard config. A TOML file wins; otherwise the server
/// address comes from the CLI override, then `VIGIL_SERVER`, then the
/// localhost fallback.
pub(crate) async fn load_config(
    path: Option<&str>,
    server: Option<&str>,
) -> Result<DashboardConfig, FileSystemError> {
    if let Some(path) = path {
        return read_config(path).await;
    }

    let target = server
        .map(String::from)
        .or_else(|| env::var(SERVER_ENV).ok());
    Ok(fallback_config(target.as_deref()))
}

/// Read the dashboard TOML config file
pub(crate) async fn read_config(path: &str) -> Result<DashboardConfig, FileSystemError> {
    let buffer_result = tokio::fs::read(path).await;
    let buffer = match buffer_result {
        Ok(result) => result,
        Err(err) => {
            error!("[dashboard] Failed to read dashboard config at {path}: {err:?}");
            return Err(FileSystemError::ReadFile);
        }
    };

    let config_result = toml::from_str(from_utf8(&buffer).unwrap_or_default());
    let config = match config_result {
        Ok(result) => result,
        Err(err) => {
            error!("[dashboard] Failed to parse dashboard config at {path}: {err:?}");
            return Err(FileSystemError::BadToml);
        }
    };

    Ok(config)
}

/// Build a default config around an optional `host` or `host:port` value.
fn fallback_config(target: Option<&str>) -> DashboardConfig {
    let Some(target) = target else {
        return DashboardConfig::with_address(DEFAULT_ADDRESS, DEFAULT_PORT);
    };

    match target.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.parse().unwrap_or(DEFAULT_PORT);
            DashboardConfig::with_address(host, port)
        }
        None => DashboardConfig::with_address(target, DEFAULT_PORT),
    }
}

#[cfg(test)]
mod tests {
    use super::{fallback_config, load_config, read_config};
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_read_config() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/dashboard.toml");

        let result = read_config(&test_location.display().to_string())
            .await
            .unwrap();
        assert_eq!(result.monitor_server.address, "127.0.0.1");
        assert_eq!(result.monitor_server.port, 4001);
        assert_eq!(result.log_level, "info");
        assert!(result.capabilities.save);
        assert!(!result.capabilities.delete);
    }

    #[tokio::test]
    async fn test_read_config_missing() {
        let result = read_config("./does/not/exist.toml").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_config_fallback() {
        let config = load_config(None, Some("10.1.2.3:9000")).await.unwrap();
        assert_eq!(config.monitor_server.address, "10.1.2.3");
        assert_eq!(config.monitor_server.port, 9000);
    }

    #[test]
    fn test_fallback_config_defaults() {
        let config = fallback_config(None);
        assert_eq!(config.monitor_server.address, "127.0.0.1");
        assert_eq!(config.monitor_server.port, 4001);
    }

    #[test]
    fn test_fallback_config_host_only() {
        let config = fallback_config(Some("monitor.internal"));
        assert_eq!(config.monitor_server.address, "monitor.internal");
        assert_eq!(config.monitor_server.port, 4001);
    }

    #[test]
    fn test_fallback_config_bad_port() {
        let config = fallback_config(Some("monitor.internal:not-a-port"));
        assert_eq!(config.monitor_server.port, 4001);
    }
}
