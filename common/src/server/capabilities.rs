use serde::{Deserialize, Serialize};

/// Row actions the dashboard is allowed to offer. Actions that are
/// disabled here are hidden from the table and their key bindings are
/// ignored.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct Capabilities {
    #[serde(default = "enabled")]
    pub save: bool,
    #[serde(default = "enabled")]
    pub delete: bool,
}

fn enabled() -> bool {
    true
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            save: true,
            delete: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Capabilities;

    #[test]
    fn test_default_capabilities() {
        let caps = Capabilities::default();
        assert!(caps.save);
        assert!(caps.delete);
    }

    #[test]
    fn test_partial_capabilities() {
        let caps: Capabilities = serde_json::from_str(r#"{"delete":false}"#).unwrap();
        assert!(caps.save);
        assert!(!caps.delete);
    }
}
