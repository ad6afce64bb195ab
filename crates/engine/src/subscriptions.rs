//! The module contains `Subscription` and the collection persisted by a
//! [`Store`](crate::Store).

use std::{collections::HashMap, fmt, str::FromStr};

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{Category, Currency, EngineError, MoneyCents};

/// How often a subscription charges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingCycle {
    /// Number of charges in a year.
    #[must_use]
    pub const fn yearly_occurrences(self) -> u32 {
        match self {
            BillingCycle::Weekly => 52,
            BillingCycle::Monthly => 12,
            BillingCycle::Quarterly => 4,
            BillingCycle::Yearly => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BillingCycle::Weekly => "weekly",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Quarterly => "quarterly",
            BillingCycle::Yearly => "yearly",
        }
    }

    /// Date of the charge following `from`.
    ///
    /// Month arithmetic clamps to the end of the month, so a monthly
    /// subscription added on Jan 31 renews on Feb 28 (or 29).
    #[must_use]
    pub fn next_after(self, from: NaiveDate) -> NaiveDate {
        let next = match self {
            BillingCycle::Weekly => from.checked_add_days(Days::new(7)),
            BillingCycle::Monthly => from.checked_add_months(Months::new(1)),
            BillingCycle::Quarterly => from.checked_add_months(Months::new(3)),
            BillingCycle::Yearly => from.checked_add_months(Months::new(12)),
        };
        next.unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingCycle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(BillingCycle::Weekly),
            "monthly" => Ok(BillingCycle::Monthly),
            "quarterly" => Ok(BillingCycle::Quarterly),
            "yearly" => Ok(BillingCycle::Yearly),
            other => Err(EngineError::KeyNotFound(format!("billing cycle {other}"))),
        }
    }
}

// Unknown cycles are treated as monthly.
impl<'de> Deserialize<'de> for BillingCycle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// A recurring charge tracked by the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub amount: MoneyCents,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    pub category: Category,
    pub next_billing: NaiveDate,
    #[serde(default = "default_auto_renew")]
    pub auto_renew: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub cancelled: bool,
    pub date_added: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_cancelled: Option<NaiveDate>,
}

fn default_auto_renew() -> bool {
    true
}

impl Subscription {
    /// Creates an active subscription added on `today`, first charged one
    /// cycle later.
    pub fn new(
        name: String,
        amount: MoneyCents,
        billing_cycle: BillingCycle,
        category: Category,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            amount,
            currency: Currency::Eur,
            billing_cycle,
            category,
            next_billing: billing_cycle.next_after(today),
            auto_renew: true,
            url: None,
            notes: None,
            cancelled: false,
            date_added: today,
            date_cancelled: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cancelled
    }

    /// Whether `name` refers to this subscription, ignoring case and spacing.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }

    pub fn cancel(&mut self, today: NaiveDate) {
        self.cancelled = true;
        self.date_cancelled = Some(today);
    }
}

/// Whole persisted state: subscriptions keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionBook {
    #[serde(default)]
    pub subscriptions: HashMap<String, Subscription>,
}

impl SubscriptionBook {
    pub fn insert(&mut self, subscription: Subscription) {
        self.subscriptions
            .insert(subscription.id.clone(), subscription);
    }

    pub fn active(&self) -> impl Iterator<Item = &Subscription> {
        self.subscriptions.values().filter(|s| s.is_active())
    }

    /// Active subscription with the given name, if any.
    #[must_use]
    pub fn find_active(&self, name: &str) -> Option<&Subscription> {
        self.active()
            .filter(|s| s.matches(name))
            .min_by(|a, b| added_order(a, b))
    }

    /// Id of the subscription `name` refers to.
    ///
    /// Several records can share a name once one of them is cancelled: the
    /// active one is preferred, then the oldest.
    #[must_use]
    pub fn find_id(&self, name: &str) -> Option<String> {
        self.subscriptions
            .values()
            .filter(|s| s.matches(name))
            .min_by(|a, b| a.cancelled.cmp(&b.cancelled).then_with(|| added_order(a, b)))
            .map(|s| s.id.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

fn added_order(a: &Subscription, b: &Subscription) -> std::cmp::Ordering {
    a.date_added
        .cmp(&b.date_added)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Lower-cases `name` and collapses whitespace runs.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
