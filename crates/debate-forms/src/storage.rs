// File: src/storage.rs
// Purpose: Persisting submissions in client-local key-value storage

use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{ParseError, StorageError, StoreError};
use crate::model::{RegistrationId, RegistrationRecord, Submission};

/// Minimal `localStorage`-shaped key-value store
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;

    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// In-process store for native hosts and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.items.keys().cloned().collect())
    }
}

/// Owns every persisted submission
///
/// `store` is `None` when the environment has no persistent storage at all
/// (private browsing modes, sandboxed frames); saves then fail with
/// [`StorageError::Unavailable`] and reads come back empty.
#[derive(Debug)]
pub struct StorageGateway<S> {
    store: Option<S>,
    key_prefix: String,
    id_prefix: String,
}

impl<S: KeyValueStore> StorageGateway<S> {
    pub fn new(store: Option<S>, config: &Config) -> Self {
        Self {
            store,
            key_prefix: config.storage.key_prefix.clone(),
            id_prefix: config.submission.id_prefix.clone(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub fn key_for(&self, id: &RegistrationId) -> String {
        format!("{}{}", self.key_prefix, id)
    }

    /// Store a submission and return its freshly generated identifier
    ///
    /// The identifier encodes the submission's timestamp. If that key is
    /// already taken the millisecond value is bumped until a free one is
    /// found, so identifiers stay unique within the store.
    pub fn save(&mut self, submission: &Submission) -> Result<RegistrationId, StorageError> {
        let store = self.store.as_mut().ok_or(StorageError::Unavailable)?;
        let value = serde_json::to_string(submission)?;

        let mut millis = submission.timestamp.timestamp_millis();
        let (id, key) = loop {
            let id = RegistrationId::from_millis(&self.id_prefix, millis);
            let key = format!("{}{}", self.key_prefix, id);
            if store.get_item(&key)?.is_none() {
                break (id, key);
            }
            debug!(%key, "registration key taken, bumping identifier");
            millis += 1;
        };

        store
            .set_item(&key, &value)
            .map_err(|err| StorageError::WriteFailed {
                key: key.clone(),
                reason: err.to_string(),
            })?;

        // Read back to make sure the write landed
        match store.get_item(&key)? {
            Some(stored) if !stored.is_empty() => {
                info!(registration_id = %id, "Registration stored successfully");
                Ok(id)
            }
            _ => Err(StorageError::WriteFailed {
                key,
                reason: "read-back returned no data".to_string(),
            }),
        }
    }

    /// Every readable registration, newest first
    ///
    /// Empty and unparsable entries are logged and skipped; one corrupt
    /// record never hides the rest.
    pub fn get_all(&self) -> Vec<RegistrationRecord> {
        let Some(store) = self.store.as_ref() else {
            error!("persistent storage is not available");
            return Vec::new();
        };

        let keys = match store.keys() {
            Ok(keys) => keys,
            Err(err) => {
                error!(error = %err, "Error retrieving responses");
                return Vec::new();
            }
        };

        let mut records: Vec<RegistrationRecord> = keys
            .iter()
            .filter_map(|key| {
                let id = key.strip_prefix(&self.key_prefix)?;
                self.read_record(store, key, id)
            })
            .collect();

        records.sort_by(|a, b| b.submission.timestamp.cmp(&a.submission.timestamp));
        debug!(count = records.len(), "Total responses retrieved");
        records
    }

    fn read_record(&self, store: &S, key: &str, id: &str) -> Option<RegistrationRecord> {
        let item = match store.get_item(key) {
            Ok(Some(item)) if !item.is_empty() => item,
            Ok(_) => {
                warn!(%key, "Empty item for key");
                return None;
            }
            Err(err) => {
                error!(%key, error = %err, "Failed to read response");
                return None;
            }
        };

        match serde_json::from_str::<Submission>(&item) {
            Ok(submission) => Some(RegistrationRecord {
                submission,
                registration_id: RegistrationId::new(id),
            }),
            Err(source) => {
                let err = ParseError {
                    key: key.to_string(),
                    source,
                };
                error!(error = %err, "Failed to parse response");
                None
            }
        }
    }

    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    /// Remove every registration entry, leaving unrelated keys alone
    pub fn clear(&mut self) -> Result<usize, StorageError> {
        let store = self.store.as_mut().ok_or(StorageError::Unavailable)?;
        let keys: Vec<String> = store
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(&self.key_prefix))
            .collect();

        for key in &keys {
            store.remove_item(key)?;
        }
        info!(removed = keys.len(), "Registrations cleared");
        Ok(keys.len())
    }
}
