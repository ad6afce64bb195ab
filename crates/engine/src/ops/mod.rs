use crate::{JsonFileStore, Store};

mod reports;
mod subscriptions;

pub use subscriptions::AddOutcome;

/// Entry point of every subscription operation.
///
/// Each call loads the whole collection from the store, works on it and, for
/// mutations, saves it back before returning.
pub struct Engine {
    store: Box<dyn Store>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Box<dyn Store>>,
}

impl EngineBuilder {
    /// Pass the store. Defaults to [`JsonFileStore::default`].
    pub fn store(mut self, store: impl Store + 'static) -> EngineBuilder {
        self.store = Some(Box::new(store));
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            store: self
                .store
                .unwrap_or_else(|| Box::new(JsonFileStore::default())),
        }
    }
}
