//! Durable storage for the subscription collection.
//!
//! The engine reads the whole [`SubscriptionBook`] at the start of every
//! operation and writes it back after a mutation. There is no locking between
//! calls: two concurrent writers race and the last one wins.

use std::{
    fs,
    path::PathBuf,
    sync::Mutex,
};

use crate::{ResultEngine, SubscriptionBook};

const DEFAULT_STORE_PATH: &str = "data/subscriptions.json";

/// Keyed storage the engine loads from and saves to.
pub trait Store: Send + Sync {
    /// Reads the persisted collection, or an empty one when nothing usable is
    /// stored.
    fn load(&self) -> SubscriptionBook;

    /// Replaces the persisted collection.
    fn save(&self, book: &SubscriptionBook) -> ResultEngine<()>;
}

/// Pretty-printed JSON file `{ "subscriptions": { id: record } }`.
///
/// A missing file reads as empty. A corrupt file also reads as empty and is
/// overwritten by the next save, losing its content.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_PATH)
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> SubscriptionBook {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return SubscriptionBook::default();
            }
            Err(err) => {
                tracing::warn!("cannot read {}: {err}", self.path.display());
                return SubscriptionBook::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(book) => book,
            Err(err) => {
                tracing::warn!(
                    "ignoring unreadable store {}: {err}",
                    self.path.display()
                );
                SubscriptionBook::default()
            }
        }
    }

    fn save(&self, book: &SubscriptionBook) -> ResultEngine<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(book)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        if fs::rename(&tmp, &self.path).is_err() {
            fs::copy(&tmp, &self.path)?;
            let _ = fs::remove_file(&tmp);
        }
        tracing::debug!(
            "saved {} subscriptions to {}",
            book.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-process store, handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<SubscriptionBook>,
}

impl MemoryStore {
    pub fn new(book: SubscriptionBook) -> Self {
        Self {
            inner: Mutex::new(book),
        }
    }
}

impl Store for MemoryStore {
    fn load(&self) -> SubscriptionBook {
        match self.inner.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, book: &SubscriptionBook) -> ResultEngine<()> {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = book.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::{BillingCycle, Category, MoneyCents, Subscription};

    fn scratch_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_stores")
            .join(format!("{}/subscriptions.json", Uuid::new_v4()))
    }

    #[test]
    fn missing_file_loads_empty() {
        let store = JsonFileStore::new(scratch_path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_creates_directory_and_round_trips() {
        let path = scratch_path();
        let store = JsonFileStore::new(&path);
        let mut book = SubscriptionBook::default();
        book.insert(Subscription::new(
            "Netflix".to_string(),
            MoneyCents::new(1599),
            BillingCycle::Monthly,
            Category::Entertainment,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        ));

        store.save(&book).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(store.load(), book);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn reads_hand_written_file() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{
  "subscriptions": {
    "abc": {
      "id": "abc",
      "name": "AWS",
      "amount": 45,
      "currency": "€",
      "billingCycle": "monthly",
      "category": "cloud",
      "nextBilling": "2026-11-16",
      "autoRenew": true,
      "cancelled": true,
      "dateAdded": "2026-10-16",
      "dateCancelled": "2026-10-17"
    }
  }
}"#,
        )
        .unwrap();

        let book = JsonFileStore::new(&path).load();
        let sub = &book.subscriptions["abc"];
        assert_eq!(sub.amount.cents(), 4500);
        assert_eq!(sub.category, Category::Cloud);
        assert!(sub.cancelled);
        assert_eq!(sub.date_cancelled, NaiveDate::from_ymd_opt(2026, 10, 17));
    }
}
