use serde::{Deserialize, Serialize};

use crate::error::{ConnectionError, Result};

/// Protocol state of a connection whose handshake has finished.
pub const STATE_COMPLETED: &str = "completed";

/// State of a relationship with a peer.
///
/// Every field is a flat string; missing fields decode as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionRecord {
    #[serde(rename = "ConnectionID")]
    pub connection_id: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "ThreadID")]
    pub thread_id: String,
    #[serde(rename = "ParentThreadID")]
    pub parent_thread_id: String,
    #[serde(rename = "TheirLabel")]
    pub their_label: String,
    #[serde(rename = "TheirDID")]
    pub their_did: String,
    #[serde(rename = "MyDID")]
    pub my_did: String,
    #[serde(rename = "ServiceEndPoint")]
    pub service_endpoint: String,
    #[serde(rename = "InvitationID")]
    pub invitation_id: String,
    #[serde(rename = "InvitationDID")]
    pub invitation_did: String,
    #[serde(rename = "Namespace")]
    pub namespace: String,
}

impl ConnectionRecord {
    pub fn new(connection_id: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            thread_id: thread_id.into(),
            ..Default::default()
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Returns `true` once the handshake has finished.
    pub fn is_completed(&self) -> bool {
        self.state == STATE_COMPLETED
    }
}

/// Serialize a record for storage.
///
/// # Errors
/// [`ConnectionError::NilRecord`] when no record is given.
pub fn prepare_connection_record(record: Option<&ConnectionRecord>) -> Result<Vec<u8>> {
    let record = record.ok_or(ConnectionError::NilRecord)?;
    serde_json::to_vec(record).map_err(|e| ConnectionError::Serialization(e.to_string()))
}

pub(crate) fn decode_connection_record(key: &str, bytes: &[u8]) -> Result<ConnectionRecord> {
    serde_json::from_slice(bytes).map_err(|e| ConnectionError::Decode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
