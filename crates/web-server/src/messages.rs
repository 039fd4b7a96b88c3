use core_types::Year;
use dashboard::{ControlId, Update};
use serde::{Deserialize, Serialize};

/// A control change as sent by the browser, e.g.
/// `{"type": "ControlChanged", "payload": {"control": "year-slider", "value": 2015}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    ControlChanged(ControlChange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlChange {
    pub control: ControlId,
    pub value: Year,
}

/// Every message the server pushes over the socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// The refreshed outputs of one control change.
    Updates(Vec<Update>),
    /// The last client message could not be handled. The socket stays open.
    Error(ErrorMessage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error(ErrorMessage { message: message.into() })
    }
}
