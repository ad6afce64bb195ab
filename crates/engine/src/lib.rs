//! Subscription tracking engine.
//!
//! The engine owns the domain: the [`Subscription`] model, the [`Store`] it
//! is persisted through, category detection and cost aggregation. It never
//! formats text; callers render the returned structures.

pub use aggregate::{
    CategoryCost, CategoryGroup, CostReport, Renewal, RenewalReport, StatsReport,
    monthly_equivalent,
};
pub use categories::{Category, detect_category};
pub use commands::AddCmd;
pub use currency::Currency;
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{AddOutcome, Engine, EngineBuilder};
pub use store::{JsonFileStore, MemoryStore, Store};
pub use subscriptions::{BillingCycle, Subscription, SubscriptionBook, normalize_name};

pub mod aggregate;
mod categories;
mod commands;
mod currency;
mod error;
mod money;
mod ops;
mod store;
mod subscriptions;

pub type ResultEngine<T> = Result<T, EngineError>;
