//! Identifier derivation and validation.
//!
//! Derivation and validation share [`canonical_bytes`] and the document
//! hasher, so any identifier that validates could have been produced by
//! [`derive_identifier`].

use chrono::{DateTime, Utc};
use peerlink_crypto::{ContentHasher, Multihash};
use peerlink_types::{Doc, PublicKey, Service, VerificationMethod};
use serde::Serialize;

use crate::did::PeerDid;
use crate::error::{DidError, DidResult};

/// Hashing view of a document. Field order is part of the identifier format
/// and must not change.
#[derive(Serialize)]
struct CanonicalDoc<'a> {
    #[serde(rename = "@context")]
    context: &'a [String],
    #[serde(rename = "publicKey")]
    public_key: &'a [PublicKey],
    authentication: &'a [VerificationMethod],
    service: &'a [Service],
    created: Option<&'a DateTime<Utc>>,
    updated: Option<&'a DateTime<Utc>>,
}

/// Canonical bytes of `doc` with its `id` excluded.
pub fn canonical_bytes(doc: &Doc) -> DidResult<Vec<u8>> {
    let view = CanonicalDoc {
        context: &doc.context,
        public_key: &doc.public_key,
        authentication: &doc.authentication,
        service: &doc.service,
        created: doc.created.as_ref(),
        updated: doc.updated.as_ref(),
    };
    serde_json::to_vec(&view).map_err(|e| DidError::Serialization(e.to_string()))
}

/// Digest of the document content, identifier excluded.
pub fn document_digest(doc: &Doc) -> DidResult<Multihash> {
    Ok(ContentHasher::DOCUMENT.hash(&canonical_bytes(doc)?)?)
}

/// Derive the peer DID of a genesis document.
///
/// # Errors
/// [`DidError::MissingKeyMaterial`] unless the document has at least one
/// public key and one authentication method.
pub fn derive_identifier(doc: &Doc) -> DidResult<String> {
    if !doc.has_key_material() {
        return Err(DidError::MissingKeyMaterial);
    }
    let digest = document_digest(doc)?;
    Ok(PeerDid::from_multihash(&digest).to_string())
}

/// Derive the identifier and assign it to the document.
pub fn assign_identifier(doc: &mut Doc) -> DidResult<PeerDid> {
    let id = derive_identifier(doc)?;
    let did: PeerDid = id.parse()?;
    doc.id = id;
    Ok(did)
}

/// Check that `doc.id` is a peer DID whose digest matches the document.
///
/// # Errors
/// [`DidError::Grammar`] when the identifier is malformed,
/// [`DidError::HashMismatch`] when the digest belongs to other content.
pub fn validate_identifier(doc: &Doc) -> DidResult<()> {
    let did: PeerDid = doc.id.parse()?;
    let computed = document_digest(doc)?;
    if !did.matches(&computed) {
        return Err(DidError::HashMismatch {
            embedded: did.suffix().to_string(),
            computed: computed.to_hex(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::did::PREFIX;
    use proptest::prelude::*;

    fn genesis_doc() -> Doc {
        Doc::genesis()
            .with_context("https://w3id.org/did/v2")
            .with_public_key(PublicKey::new(
                "did:example:123456789abcdefghi#keys-1",
                "Secp256k1VerificationKey2018",
                "did:example:123456789abcdefghi",
                b"H3C2AVvLMv6gmMNam3uVAjZpfkcJCwDwnZn6z3wXmqPV".to_vec(),
            ))
            .with_public_key(PublicKey::new(
                "did:example:123456789abcdefghw#key2",
                "RsaVerificationKey2018",
                "did:example:123456789abcdefghw",
                b"-----BEGIN PUBLIC KEY-----".to_vec(),
            ))
            .with_authentication(PublicKey::new(
                "did:example:123456789abcdefghs#key3",
                "RsaVerificationKey2018",
                "did:example:123456789abcdefghs",
                b"02b97c30de767f084ce3080168ee293053ba33b235d7116a3263d29f1450936b71".to_vec(),
            ))
            .with_created(DateTime::from_timestamp(0, 0).unwrap())
    }

    fn peer_did_doc() -> Doc {
        let mut doc = genesis_doc();
        assign_identifier(&mut doc).unwrap();
        doc
    }

    #[test]
    fn derive_identifier_has_method_prefix() {
        let did = derive_identifier(&genesis_doc()).unwrap();
        assert!(did.starts_with("did:peer:11"));
        assert!(did.starts_with(PREFIX));
    }

    #[test]
    fn derive_identifier_requires_key_material() {
        let doc = Doc {
            id: "did:peer:11".into(),
            ..Default::default()
        };
        let err = derive_identifier(&doc).unwrap_err();
        assert!(matches!(err, DidError::MissingKeyMaterial));
        assert_eq!(
            err.to_string(),
            "the genesis version must include public keys and authentication"
        );

        let mut no_auth = genesis_doc();
        no_auth.authentication.clear();
        assert!(matches!(derive_identifier(&no_auth), Err(DidError::MissingKeyMaterial)));

        let mut no_keys = genesis_doc();
        no_keys.public_key.clear();
        assert!(matches!(derive_identifier(&no_keys), Err(DidError::MissingKeyMaterial)));
    }

    #[test]
    fn derive_ignores_existing_identifier() {
        let genesis = genesis_doc();
        let mut with_id = genesis.clone();
        with_id.id = "did:peer:11-00".into();
        assert_eq!(
            derive_identifier(&genesis).unwrap(),
            derive_identifier(&with_id).unwrap()
        );
    }

    #[test]
    fn canonical_bytes_exclude_id_and_pin_field_order() {
        let doc = peer_did_doc();
        let bytes = canonical_bytes(&doc).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains(&doc.id));
        let positions: Vec<usize> = [
            "\"@context\"",
            "\"publicKey\"",
            "\"authentication\"",
            "\"service\"",
            "\"created\"",
            "\"updated\"",
        ]
        .iter()
        .map(|field| text.find(field).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn validate_derived_identifier() {
        validate_identifier(&peer_did_doc()).unwrap();
    }

    #[test]
    fn validate_rejects_bad_grammar() {
        for id in ["did:peer:22", "did:sidetree:22", "did:peer:1-*&$*|||", "did:peer:11-"] {
            let mut doc = genesis_doc();
            doc.id = id.to_string();
            assert!(
                matches!(validate_identifier(&doc), Err(DidError::Grammar { .. })),
                "{id} should fail the grammar"
            );
        }
    }

    #[test]
    fn validate_rejects_foreign_digest() {
        let doc = Doc {
            id: "did:peer:11-479cbc07c3f991725836a3aa2a581ca2029198aa420b9d99bc0e131d9f3e2cbe"
                .into(),
            ..Default::default()
        };
        let err = validate_identifier(&doc).unwrap_err();
        assert!(matches!(err, DidError::HashMismatch { .. }));
        assert!(err
            .to_string()
            .starts_with("hash of the doc doesn't match the computed hash"));
    }

    #[test]
    fn validate_detects_tampering() {
        let mut doc = peer_did_doc();
        doc.public_key[0].value.push(0);
        assert!(matches!(
            validate_identifier(&doc),
            Err(DidError::HashMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn derive_then_validate_succeeds(
            key_ids in proptest::collection::vec("[a-z0-9#:]{1,24}", 1..4),
            auth_value in proptest::collection::vec(any::<u8>(), 0..64),
            contexts in proptest::collection::vec("https://[a-z]{1,12}\\.org/v[0-9]", 0..3),
        ) {
            let mut doc = Doc { context: contexts, ..Default::default() };
            for id in &key_ids {
                doc.public_key.push(PublicKey::new(
                    id.clone(),
                    "Ed25519VerificationKey2018",
                    "did:example:1",
                    id.as_bytes().to_vec(),
                ));
            }
            doc.authentication.push(
                PublicKey::new("auth", "Ed25519VerificationKey2018", "did:example:1", auth_value)
                    .into(),
            );

            assign_identifier(&mut doc).unwrap();
            prop_assert!(validate_identifier(&doc).is_ok());
        }

        #[test]
        fn missing_material_always_fails(key_count in 0usize..3, auth_count in 0usize..3) {
            prop_assume!(key_count == 0 || auth_count == 0);
            let mut doc = Doc::genesis();
            for i in 0..key_count {
                doc.public_key.push(PublicKey::new(format!("k{i}"), "t", "c", vec![i as u8]));
            }
            for i in 0..auth_count {
                doc.authentication
                    .push(PublicKey::new(format!("a{i}"), "t", "c", vec![i as u8]).into());
            }
            prop_assert!(matches!(derive_identifier(&doc), Err(DidError::MissingKeyMaterial)));
        }
    }
}
