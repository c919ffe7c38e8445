use crate::machine::Registry;
use serde::{Deserialize, Serialize};

/// Frame sent by the monitor server over the push channel. Frames are JSON
/// text tagged by event name; the only domain event is `update`, which
/// carries the full registry snapshot.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum PushMessage {
    Update(Registry),
}

/// Events delivered to the registry store. `Connected` and `Disconnected`
/// come from the transport lifecycle, `Update` from server frames.
#[derive(Debug, Clone)]
pub enum PushEvent {
    Connected,
    Disconnected,
    Update(Registry),
}

/// Parse one text frame from the push channel.
pub fn parse_frame(frame: &str) -> Result<PushMessage, serde_json::Error> {
    serde_json::from_str(frame)
}

#[cfg(test)]
mod tests {
    use super::{parse_frame, PushMessage};

    #[test]
    fn test_parse_update_frame() {
        let frame = r#"{
            "event": "update",
            "data": {
                "3c22fb11aa": {"hostname": "web01", "cpu_percent": 41.0}
            }
        }"#;
        let PushMessage::Update(registry) = parse_frame(frame).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry["3c22fb11aa"].hostname, "web01");
    }

    #[test]
    fn test_parse_unknown_event() {
        assert!(parse_frame(r#"{"event":"ping","data":{}}"#).is_err());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_frame("not json").is_err());
    }
}
