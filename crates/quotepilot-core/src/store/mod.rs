//! Key/value persistence and the entity repositories built on it.
//!
//! Entities are stored as JSON under `kind:{id}`. Secondary indexes are
//! JSON arrays of ids (e.g. `company:index`, `company:category:{label}`).

mod companies;
mod file;
mod invoices;
mod memory;
mod quotes;
pub mod seed;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{trace, warn};

pub use companies::CompanyRepository;
pub use file::JsonFileStore;
pub use invoices::InvoiceRepository;
pub use memory::MemoryStore;
pub use quotes::QuoteRequestRepository;

use crate::error::StoreError;

/// Result type for persistence operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Attempts made by [`add_to_index`] before reporting a conflict.
const MAX_INDEX_ATTEMPTS: usize = 5;

/// String key/value storage.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Keys starting with `prefix`, in ascending order.
    fn list(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Write `value` only if the current value equals `expected`
    /// (`None` meaning absent). Returns whether the write happened.
    ///
    /// The default is a plain read-then-write and can lose updates under
    /// concurrent writers. Implementations that can do better override it.
    fn compare_and_swap(&self, key: &str, expected: Option<&str>, value: &str) -> StoreResult<bool> {
        if self.get(key)?.as_deref() != expected {
            return Ok(false);
        }
        self.put(key, value)?;
        Ok(true)
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        (**self).list(prefix)
    }

    fn compare_and_swap(&self, key: &str, expected: Option<&str>, value: &str) -> StoreResult<bool> {
        (**self).compare_and_swap(key, expected, value)
    }
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        (**self).list(prefix)
    }

    fn compare_and_swap(&self, key: &str, expected: Option<&str>, value: &str) -> StoreResult<bool> {
        (**self).compare_and_swap(key, expected, value)
    }
}

/// Read and decode a JSON record.
pub(crate) fn get_json<S, T>(store: &S, key: &str) -> StoreResult<Option<T>>
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(None),
    }
}

/// Encode and write a JSON record.
pub(crate) fn put_json<S, T>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    S: KvStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.put(key, &raw)
}

/// Ids stored in an index; empty when the index does not exist.
pub(crate) fn read_index<S: KvStore + ?Sized>(store: &S, key: &str) -> StoreResult<Vec<String>> {
    Ok(get_json(store, key)?.unwrap_or_default())
}

/// Reject ids that are empty, equal to `index`, or start with one of the
/// repository's index prefixes.
pub(crate) fn check_id(id: &str, index_prefixes: &[&str]) -> StoreResult<()> {
    if id.is_empty() || id == "index" || index_prefixes.iter().any(|prefix| id.starts_with(prefix)) {
        return Err(StoreError::ReservedId { id: id.to_string() });
    }
    Ok(())
}

/// Append `id` to an index unless already present.
pub(crate) fn add_to_index<S: KvStore + ?Sized>(store: &S, key: &str, id: &str) -> StoreResult<()> {
    update_index(store, key, |ids| {
        if ids.iter().any(|existing| existing == id) {
            false
        } else {
            ids.push(id.to_string());
            true
        }
    })
}

/// Remove `id` from an index if present.
pub(crate) fn remove_from_index<S: KvStore + ?Sized>(store: &S, key: &str, id: &str) -> StoreResult<()> {
    update_index(store, key, |ids| {
        let before = ids.len();
        ids.retain(|existing| existing != id);
        ids.len() != before
    })
}

/// Compare-and-swap loop over an index. `change` returns whether it
/// modified the list.
fn update_index<S, F>(store: &S, key: &str, change: F) -> StoreResult<()>
where
    S: KvStore + ?Sized,
    F: Fn(&mut Vec<String>) -> bool,
{
    for attempt in 1..=MAX_INDEX_ATTEMPTS {
        let current = store.get(key)?;
        let mut ids: Vec<String> = match &current {
            Some(raw) => serde_json::from_str(raw).map_err(|e| StoreError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })?,
            None => Vec::new(),
        };

        if !change(&mut ids) {
            return Ok(());
        }

        let updated = serde_json::to_string(&ids).map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        if store.compare_and_swap(key, current.as_deref(), &updated)? {
            trace!("Index {} now holds {} ids", key, ids.len());
            return Ok(());
        }
        warn!("Index {} changed concurrently (attempt {})", key, attempt);
    }

    Err(StoreError::Conflict { key: key.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_index_append_is_idempotent() {
        let store = MemoryStore::new();
        add_to_index(&store, "x:index", "a").unwrap();
        add_to_index(&store, "x:index", "b").unwrap();
        add_to_index(&store, "x:index", "a").unwrap();
        assert_eq!(read_index(&store, "x:index").unwrap(), vec!["a".to_string(), "b".to_string()]);

        remove_from_index(&store, "x:index", "a").unwrap();
        assert_eq!(read_index(&store, "x:index").unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_corrupt_index() {
        let store = MemoryStore::new();
        store.put("x:index", "not json").unwrap();
        assert!(matches!(read_index(&store, "x:index"), Err(StoreError::Corrupt { .. })));
    }

    /// Store whose conditional writes always lose.
    struct Contended {
        inner: MemoryStore,
        swaps: AtomicUsize,
    }

    impl KvStore for Contended {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key)
        }
        fn put(&self, key: &str, value: &str) -> StoreResult<()> {
            self.inner.put(key, value)
        }
        fn delete(&self, key: &str) -> StoreResult<()> {
            self.inner.delete(key)
        }
        fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
            self.inner.list(prefix)
        }
        fn compare_and_swap(&self, _key: &str, _expected: Option<&str>, _value: &str) -> StoreResult<bool> {
            self.swaps.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
    }

    #[test]
    fn test_index_conflict_after_retries() {
        let store = Contended {
            inner: MemoryStore::new(),
            swaps: AtomicUsize::new(0),
        };
        let err = add_to_index(&store, "x:index", "a").unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(store.swaps.load(Ordering::SeqCst), MAX_INDEX_ATTEMPTS);
    }

    /// Only the required methods; exercises the default conditional write.
    struct Plain(MemoryStore);

    impl KvStore for Plain {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.0.get(key)
        }
        fn put(&self, key: &str, value: &str) -> StoreResult<()> {
            self.0.put(key, value)
        }
        fn delete(&self, key: &str) -> StoreResult<()> {
            self.0.delete(key)
        }
        fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
            self.0.list(prefix)
        }
    }

    #[test]
    fn test_default_compare_and_swap() {
        let store = Plain(MemoryStore::new());
        assert!(store.compare_and_swap("k", None, "1").unwrap());
        assert!(!store.compare_and_swap("k", None, "2").unwrap());
        assert!(store.compare_and_swap("k", Some("1"), "2").unwrap());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
    }
}
