//! `window.localStorage` as a [`KeyValueStore`]

use debate_forms::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// `None` when there is no window or storage is blocked (private mode, sandboxed iframe)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

fn store_error(value: JsValue) -> StoreError {
    StoreError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(store_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(store_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(store_error)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let length = self.storage.length().map_err(store_error)?;
        let mut keys = Vec::with_capacity(length as usize);
        for index in 0..length {
            if let Some(key) = self.storage.key(index).map_err(store_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
