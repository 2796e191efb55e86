//! Passing a generated image to the save view without a network round trip.
//!
//! Entries are data URLs stored under a fresh key in session storage. They are
//! never deleted; they live as long as the storage does.
//!
//! Keys are a millisecond timestamp plus a random suffix. That is enough to
//! avoid collisions inside one session, and no more: do not reuse them across
//! users or for long-lived storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::capability::{Capability, CapabilityKind, SessionStorage};
use crate::data_url;
use crate::error::{CapabilityError, HandoffError};

const KEY_PREFIX: &str = "qrimg";

pub fn generate_key() -> String {
    format!(
        "{}:{}:{:x}",
        KEY_PREFIX,
        Utc::now().timestamp_millis(),
        rand::random::<u64>()
    )
}

/// Key→image mapping over an injected [`SessionStorage`].
#[derive(Clone)]
pub struct HandoffStore {
    storage: Arc<dyn SessionStorage>,
}

impl HandoffStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Stores `png` as a data URL and returns its key.
    pub fn put_png(&self, png: &[u8]) -> Result<String, HandoffError> {
        if !self.storage.is_available() {
            return Err(HandoffError::Storage(CapabilityError::Unavailable(
                self.storage.kind(),
            )));
        }
        let key = generate_key();
        self.storage
            .set_item(&key, data_url::encode_png(png))
            .map_err(HandoffError::Storage)?;
        log::debug!("stored hand-off entry {} ({} bytes)", key, png.len());
        Ok(key)
    }

    /// The stored data URL for `key`.
    pub fn get_data_url(&self, key: &str) -> Result<String, HandoffError> {
        if key.is_empty() {
            return Err(HandoffError::MissingId);
        }
        if !self.storage.is_available() {
            return Err(HandoffError::Storage(CapabilityError::Unavailable(
                self.storage.kind(),
            )));
        }
        match self.storage.get_item(key).map_err(HandoffError::Storage)? {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(HandoffError::NotFound(key.to_string())),
        }
    }

    /// The stored PNG bytes for `key`.
    pub fn get_png(&self, key: &str) -> Result<Vec<u8>, HandoffError> {
        let url = self.get_data_url(key)?;
        Ok(data_url::decode_png(&url)?)
    }
}

/// In-process session storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Capability for MemoryStorage {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Storage
    }

    fn is_available(&self) -> bool {
        true
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, CapabilityError> {
        let items = self
            .items
            .lock()
            .map_err(|_| CapabilityError::Failed("storage poisoned".into()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: String) -> Result<(), CapabilityError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| CapabilityError::Failed("storage poisoned".into()))?;
        items.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Storage that refuses every call, like a sandbox with storage disabled.
    pub(crate) struct BlockedStorage;

    impl Capability for BlockedStorage {
        fn kind(&self) -> CapabilityKind {
            CapabilityKind::Storage
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    impl SessionStorage for BlockedStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, CapabilityError> {
            Err(CapabilityError::Denied("SecurityError".into()))
        }

        fn set_item(&self, _key: &str, _value: String) -> Result<(), CapabilityError> {
            Err(CapabilityError::Denied("QuotaExceededError".into()))
        }
    }

    fn store() -> (HandoffStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::default());
        (HandoffStore::new(storage.clone()), storage)
    }

    #[test]
    fn round_trip_is_byte_identical() {
        let (store, _) = store();
        let png: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let key = store.put_png(&png).unwrap();
        assert_eq!(store.get_png(&key).unwrap(), png);
    }

    #[test]
    fn keys_are_fresh() {
        let (store, storage) = store();
        let a = store.put_png(b"a").unwrap();
        let b = store.put_png(b"b").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("qrimg:"));
        assert_eq!(storage.len(), 2);
        assert_eq!(store.get_png(&a).unwrap(), b"a");
    }

    #[test]
    fn missing_key_is_not_found() {
        let (store, _) = store();
        assert!(matches!(
            store.get_png("qrimg:0:dead"),
            Err(HandoffError::NotFound(_))
        ));
        assert!(matches!(store.get_png(""), Err(HandoffError::MissingId)));
    }

    #[test]
    fn blocked_storage_is_reported() {
        let store = HandoffStore::new(Arc::new(BlockedStorage));
        assert!(matches!(store.put_png(b"x"), Err(HandoffError::Storage(_))));
        let err = store.get_png("qrimg:1:2").unwrap_err();
        assert_eq!(err.to_string(), "Storage blocked in this environment.");
    }

    #[test]
    fn corrupt_entries_do_not_panic() {
        let (store, storage) = store();
        storage.set_item("qrimg:1:bad", "not a data url".into()).unwrap();
        assert!(matches!(
            store.get_png("qrimg:1:bad"),
            Err(HandoffError::Corrupt(_))
        ));
    }
}
