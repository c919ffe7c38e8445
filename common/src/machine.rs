use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full snapshot of the monitored fleet, keyed by machine id. The server
/// always sends the whole mapping; it is replaced, never merged.
pub type Registry = BTreeMap<String, MachineRecord>;

/// Telemetry and metadata for one monitored machine. Snapshots may be
/// sparse while an agent is still reporting, so every field tolerates
/// being absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MachineRecord {
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub cpu_count: u32,
    #[serde(default)]
    pub cpu_percent: f64,
    #[serde(default)]
    pub ram_used: f64,
    #[serde(default)]
    pub ram_total: f64,
    #[serde(default)]
    pub ram_percent: f64,
    #[serde(default)]
    pub disk_used: f64,
    #[serde(default)]
    pub disk_total: f64,
    #[serde(default)]
    pub disks: Vec<DiskUsage>,
    /// Server-set timestamp. Never written by the dashboard.
    #[serde(default)]
    pub last_update: String,
}

/// Usage for a single mounted volume, in GB.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DiskUsage {
    #[serde(default)]
    pub mount: String,
    #[serde(default)]
    pub used: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub percent: f64,
}
