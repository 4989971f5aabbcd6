use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous string key-value persistence, e.g. browser `localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Map-backed store. Clones share the same items, the way every page load
/// sees the same `localStorage`.
#[derive(Clone, Default, Debug)]
pub struct InMemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: Rc::new(RefCell::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            )),
        }
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Typed access on top of a [`KeyValueStore`]. Reads never fail: missing and
/// malformed values both come back as `None`.
pub struct StorageAdapter<S> {
    store: S,
}

impl<S> StorageAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get_item(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store.set_item(key, value)
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "ignoring malformed stored JSON");
                None
            }
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.store.set_item(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn get_json_falls_back_on_malformed_value() {
        let adapter =
            StorageAdapter::new(InMemoryStore::with_items([("personalData", "{not json")]));
        let parsed: Option<BTreeMap<String, String>> = adapter.get_json("personalData");
        assert!(parsed.is_none());
        assert_eq!(adapter.get("personalData").as_deref(), Some("{not json"));
    }

    #[test]
    fn json_roundtrip() -> anyhow::Result<()> {
        let adapter = StorageAdapter::new(InMemoryStore::default());
        let mut data = BTreeMap::new();
        data.insert("occupation".to_owned(), "Engineer".to_owned());
        adapter.set_json("personalData", &data)?;

        assert_eq!(
            adapter.get("personalData").as_deref(),
            Some(r#"{"occupation":"Engineer"}"#)
        );
        let loaded: BTreeMap<String, String> = adapter
            .get_json("personalData")
            .expect("stored mapping should parse");
        assert_eq!(loaded, data);
        Ok(())
    }

    #[test]
    fn clones_share_items() -> anyhow::Result<()> {
        let store = InMemoryStore::default();
        let adapter = StorageAdapter::new(store.clone());
        adapter.set("theme", "dark")?;
        assert_eq!(store.get_item("theme").as_deref(), Some("dark"));
        Ok(())
    }

    #[test]
    fn missing_key_is_absent() {
        let adapter = StorageAdapter::new(InMemoryStore::default());
        assert!(adapter.get("theme").is_none());
        assert!(adapter.get_json::<Vec<String>>("theme").is_none());
    }
}
