//! Whole-collection JSON encoding over a key-value store.

use crate::repo::kv::{KeyValueStore, KvError, KvResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reads the collection stored under `key`.
///
/// A missing key, or a payload that does not decode, yields an empty
/// collection. Backend failures are returned.
pub fn load_collection<T, S>(kv: &S, key: &str) -> KvResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = kv.get(key)? else {
        debug!("event=collection_load module=repo status=empty key={key}");
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => {
            debug!(
                "event=collection_load module=repo status=ok key={key} count={}",
                items.len()
            );
            Ok(items)
        }
        Err(err) => {
            // Payload text may contain user content; log position only.
            warn!(
                "event=collection_load module=repo status=recovered key={key} error_code=malformed_payload line={} column={}",
                err.line(),
                err.column()
            );
            Ok(Vec::new())
        }
    }
}

/// Replaces the collection stored under `key`.
pub fn save_collection<T, S>(kv: &S, key: &str, items: &[T]) -> KvResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(items).map_err(KvError::Encode)?;
    kv.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::{load_collection, save_collection};
    use crate::repo::kv::{KeyValueStore, MemoryKvStore};

    #[test]
    fn malformed_payload_loads_as_empty() {
        let kv = MemoryKvStore::with_entry("numbers", "{not json");
        let items: Vec<u32> = load_collection(&kv, "numbers").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let kv = MemoryKvStore::new();
        save_collection(&kv, "numbers", &[3_u32, 1, 2]).unwrap();
        assert_eq!(kv.get("numbers").unwrap().as_deref(), Some("[3,1,2]"));
        let items: Vec<u32> = load_collection(&kv, "numbers").unwrap();
        assert_eq!(items, vec![3, 1, 2]);
    }
}
