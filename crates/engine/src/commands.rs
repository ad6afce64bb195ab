//! Command structs for engine operations.
//!
//! These types group the parameters of write operations, keeping call sites
//! readable and avoiding long argument lists.

use crate::{BillingCycle, Category, MoneyCents};

/// Add a subscription.
///
/// Without an explicit category the engine detects one from the name.
#[derive(Clone, Debug, PartialEq)]
pub struct AddCmd {
    pub name: String,
    pub amount: MoneyCents,
    pub billing_cycle: BillingCycle,
    pub category: Option<Category>,
}

impl AddCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, amount: MoneyCents) -> Self {
        Self {
            name: name.into(),
            amount,
            billing_cycle: BillingCycle::Monthly,
            category: None,
        }
    }

    #[must_use]
    pub fn billing_cycle(mut self, billing_cycle: BillingCycle) -> Self {
        self.billing_cycle = billing_cycle;
        self
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}
