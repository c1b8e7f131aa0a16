use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Default JSON-LD context for identity documents.
pub const DID_CONTEXT: &str = "https://w3id.org/did/v1";

/// A public key entry of an identity document.
///
/// `value` holds the raw key material; it is carried as lowercase hex in the
/// JSON form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub id: String,
    #[serde(rename = "type")]
    pub key_type: String,
    pub controller: String,
    #[serde(rename = "publicKeyHex", with = "hex_bytes")]
    pub value: Vec<u8>,
}

impl PublicKey {
    pub fn new(
        id: impl Into<String>,
        key_type: impl Into<String>,
        controller: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            id: id.into(),
            key_type: key_type.into(),
            controller: controller.into(),
            value: value.into(),
        }
    }
}

/// An authentication entry. Embeds the key it authenticates with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationMethod {
    #[serde(flatten)]
    pub public_key: PublicKey,
}

impl From<PublicKey> for VerificationMethod {
    fn from(public_key: PublicKey) -> Self {
        Self { public_key }
    }
}

/// A service endpoint advertised by the document owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(rename = "serviceEndpoint")]
    pub service_endpoint: String,
}

/// Identity document.
///
/// Before an identifier is assigned the document is a *genesis* document:
/// `id` is empty and everything else is the material the identifier is
/// derived from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    #[serde(rename = "@context", default)]
    pub context: Vec<String>,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "publicKey", default)]
    pub public_key: Vec<PublicKey>,
    #[serde(default)]
    pub authentication: Vec<VerificationMethod>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service: Vec<Service>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Doc {
    /// Start an empty genesis document carrying the default context.
    pub fn genesis() -> Self {
        Self {
            context: vec![DID_CONTEXT.to_string()],
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_public_key(mut self, key: PublicKey) -> Self {
        self.public_key.push(key);
        self
    }

    pub fn with_authentication(mut self, method: impl Into<VerificationMethod>) -> Self {
        self.authentication.push(method.into());
        self
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.service.push(service);
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Returns `true` if no identifier has been assigned yet.
    pub fn is_genesis(&self) -> bool {
        self.id.is_empty()
    }

    /// Returns `true` if the document carries at least one public key and
    /// one authentication method.
    pub fn has_key_material(&self) -> bool {
        !self.public_key.is_empty() && !self.authentication.is_empty()
    }

    /// Serialize the document to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>, TypeError> {
        serde_json::to_vec(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Parse a document from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, TypeError> {
        serde_json::from_slice(bytes).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}
