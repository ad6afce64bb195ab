use chrono::NaiveDate;

use crate::{AddCmd, EngineError, ResultEngine, Subscription, categories::detect_category};

use super::Engine;

/// Result of [`Engine::add`].
#[derive(Clone, Debug, PartialEq)]
pub enum AddOutcome {
    Added(Subscription),
    /// An active subscription with the same name is already tracked; nothing
    /// was written.
    AlreadyExists(Subscription),
}

impl Engine {
    /// Adds a subscription added on `today`.
    ///
    /// Only active subscriptions block the name: re-adding a cancelled one
    /// creates a second record next to it.
    pub fn add(&self, cmd: AddCmd, today: NaiveDate) -> ResultEngine<AddOutcome> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidName(
                "subscription name must not be empty".to_string(),
            ));
        }
        if cmd.amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must not be negative".to_string(),
            ));
        }

        let mut book = self.store.load();
        if let Some(existing) = book.find_active(name) {
            tracing::debug!("subscription {} already tracked", existing.name);
            return Ok(AddOutcome::AlreadyExists(existing.clone()));
        }

        let category = cmd.category.unwrap_or_else(|| detect_category(name));
        let subscription =
            Subscription::new(name.to_string(), cmd.amount, cmd.billing_cycle, category, today);

        book.insert(subscription.clone());
        self.store.save(&book)?;

        tracing::info!(
            "added subscription {} ({}, {})",
            subscription.name,
            subscription.billing_cycle,
            subscription.category
        );
        Ok(AddOutcome::Added(subscription))
    }

    /// Marks the subscription called `name` as cancelled on `today`.
    ///
    /// The record stays stored and still counts in the statistics. Cancelling
    /// an already cancelled subscription returns it unchanged, keeping its
    /// original cancellation date.
    pub fn cancel(&self, name: &str, today: NaiveDate) -> ResultEngine<Subscription> {
        let mut book = self.store.load();
        let id = book
            .find_id(name)
            .ok_or_else(|| EngineError::KeyNotFound(name.to_string()))?;
        let subscription = book
            .subscriptions
            .get_mut(&id)
            .ok_or_else(|| EngineError::KeyNotFound(name.to_string()))?;

        if !subscription.is_active() {
            tracing::debug!("subscription {} already cancelled", subscription.name);
            return Ok(subscription.clone());
        }
        subscription.cancel(today);
        let cancelled = subscription.clone();
        self.store.save(&book)?;

        tracing::info!("cancelled subscription {}", cancelled.name);
        Ok(cancelled)
    }

    /// Removes the subscription called `name` from storage.
    pub fn delete(&self, name: &str) -> ResultEngine<Subscription> {
        let mut book = self.store.load();
        let deleted = book
            .find_id(name)
            .and_then(|id| book.subscriptions.remove(&id))
            .ok_or_else(|| EngineError::KeyNotFound(name.to_string()))?;
        self.store.save(&book)?;

        tracing::info!("deleted subscription {}", deleted.name);
        Ok(deleted)
    }
}
