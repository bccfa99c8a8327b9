//! Record ids as read back from storage.
//!
//! # Invariants
//! - Canonical UUID text decodes to that UUID unchanged.
//! - Any other non-blank id text maps to the same UUID v5 on every load, so
//!   collections written before UUID ids keep their records and history.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Namespace for UUID v5 ids derived from non-UUID id text.
const LEGACY_ID_NAMESPACE: Uuid = Uuid::from_u128(0x5e7e_4e1d_7c2a_4f0b_9d3e_61a8_b4c2_f019);

/// Resolves stored id text to a record id.
pub fn resolve_record_id(raw: &str) -> Uuid {
    let raw = raw.trim();
    Uuid::parse_str(raw).unwrap_or_else(|_| Uuid::new_v5(&LEGACY_ID_NAMESPACE, raw.as_bytes()))
}

/// `deserialize_with` hook for persisted `id` fields.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.trim().is_empty() {
        return Err(D::Error::custom("record id cannot be empty"));
    }
    Ok(resolve_record_id(&raw))
}

#[cfg(test)]
mod tests {
    use super::resolve_record_id;
    use uuid::Uuid;

    #[test]
    fn uuid_text_is_kept() {
        let id = Uuid::new_v4();
        assert_eq!(resolve_record_id(&id.to_string()), id);
    }

    #[test]
    fn other_text_maps_to_stable_v5() {
        let first = resolve_record_id("2024-04-01T09:15:00.000Z");
        let second = resolve_record_id(" 2024-04-01T09:15:00.000Z ");
        assert_eq!(first, second);
        assert_eq!(first.get_version_num(), 5);
        assert_ne!(first, resolve_record_id("2024-04-01T09:15:00.001Z"));
    }

    #[test]
    fn blank_id_is_rejected_on_decode() {
        #[derive(serde::Deserialize)]
        struct Row {
            #[serde(deserialize_with = "super::deserialize")]
            #[allow(dead_code)]
            id: Uuid,
        }
        assert!(serde_json::from_str::<Row>(r#"{"id":"  "}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"id":"abc"}"#).is_ok());
    }
}
