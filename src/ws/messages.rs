//! WebSocket message types: envelope, commands, and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
///
/// Channel frames use the same envelope with `type = "event"` and a
/// payload of `{"channel": name, "data": snapshot}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Response to the command with id `id`.
    #[must_use]
    pub fn response(id: String, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Response,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Error reply; `id` is empty when the request could not be parsed.
    #[must_use]
    pub fn error(id: String, code: u32, message: &str) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Error,
            timestamp: Utc::now(),
            payload: serde_json::json!({
                "code": code,
                "message": message,
            }),
        }
    }

    /// Renders the message as a JSON text frame.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client channel frame.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Attach to channels; each one sends its current snapshot.
    Subscribe {
        /// Channel names, e.g. `["matchTime", "arenaStatus"]`.
        channels: Vec<String>,
    },
    /// Detach from channels.
    Unsubscribe {
        /// Channel names.
        channels: Vec<String>,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscribe_command() {
        let text = r#"{
            "id": "req-1",
            "type": "command",
            "timestamp": "2026-03-01T12:00:00Z",
            "payload": {"command": "subscribe", "channels": ["matchTime", "reload"]}
        }"#;
        let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
            panic!("envelope did not parse");
        };
        assert_eq!(msg.msg_type, WsMessageType::Command);
        let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
            panic!("command did not parse");
        };
        assert_eq!(
            command,
            WsCommand::Subscribe {
                channels: vec!["matchTime".to_string(), "reload".to_string()],
            }
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        let payload = serde_json::json!({"command": "swap", "channels": []});
        assert!(serde_json::from_value::<WsCommand>(payload).is_err());
    }

    #[test]
    fn error_envelope_shape() {
        let Some(text) = WsMessage::error(String::new(), 400, "malformed JSON").to_text() else {
            panic!("render failed");
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
            panic!("not JSON");
        };
        assert_eq!(value["type"], "error");
        assert_eq!(value["payload"]["code"], 400);
    }
}
