//! Cost normalization and the report structures built from it.
//!
//! Normalized costs are fractional cents (`f64`); they are rounded only when
//! shown. Raw charge amounts stay in [`MoneyCents`].

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::{BillingCycle, Category, MoneyCents, Subscription};

/// Width of a full bar in the cost breakdown.
pub const BAR_WIDTH: f64 = 10.0;

/// How many categories the statistics ranking keeps.
pub const TOP_CATEGORIES: usize = 5;

/// Monthly rate of a charge, in fractional cents.
///
/// ```rust
/// use engine::{BillingCycle, MoneyCents, monthly_equivalent};
///
/// assert_eq!(monthly_equivalent(MoneyCents::new(1200), BillingCycle::Yearly), 100.0);
/// assert_eq!(monthly_equivalent(MoneyCents::new(1200), BillingCycle::Weekly), 5200.0);
/// ```
#[must_use]
pub fn monthly_equivalent(amount: MoneyCents, cycle: BillingCycle) -> f64 {
    amount.cents() as f64 * f64::from(cycle.yearly_occurrences()) / 12.0
}

/// Active subscriptions of one category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryGroup {
    pub category: Category,
    pub subscriptions: Vec<Subscription>,
}

/// Groups subscriptions by category, in category order, oldest first inside
/// each group.
pub fn group_by_category<'a>(subs: impl IntoIterator<Item = &'a Subscription>) -> Vec<CategoryGroup> {
    let mut groups: HashMap<Category, Vec<Subscription>> = HashMap::new();
    for sub in subs {
        groups.entry(sub.category).or_default().push(sub.clone());
    }

    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let mut subscriptions = groups.remove(&category)?;
            subscriptions.sort_by(|a, b| {
                a.date_added
                    .cmp(&b.date_added)
                    .then_with(|| a.name.cmp(&b.name))
            });
            Some(CategoryGroup {
                category,
                subscriptions,
            })
        })
        .collect()
}

/// Monthly spend of one category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryCost {
    pub category: Category,
    pub monthly_cents: f64,
    /// Bar length relative to the monthly total, out of [`BAR_WIDTH`].
    pub bar_len: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CostReport {
    pub monthly_cents: f64,
    pub yearly_cents: f64,
    /// Most expensive category first.
    pub by_category: Vec<CategoryCost>,
}

impl CostReport {
    /// Builds the report, or `None` when there is nothing to report.
    pub fn build<'a>(subs: impl IntoIterator<Item = &'a Subscription>) -> Option<Self> {
        let mut monthly_cents = 0.0;
        let mut per_category: HashMap<Category, f64> = HashMap::new();
        let mut any = false;

        for sub in subs {
            any = true;
            let monthly = monthly_equivalent(sub.amount, sub.billing_cycle);
            monthly_cents += monthly;
            *per_category.entry(sub.category).or_default() += monthly;
        }
        if !any {
            return None;
        }

        let by_category = sorted_desc(per_category)
            .into_iter()
            .map(|(category, cents)| CategoryCost {
                category,
                monthly_cents: cents,
                bar_len: bar_len(cents, monthly_cents),
            })
            .collect();

        Some(Self {
            monthly_cents,
            yearly_cents: monthly_cents * 12.0,
            by_category,
        })
    }
}

fn bar_len(part: f64, total: f64) -> usize {
    if total <= 0.0 {
        return 0;
    }
    (part / total * BAR_WIDTH).ceil() as usize
}

/// One charge inside the look-ahead window.
#[derive(Clone, Debug, PartialEq)]
pub struct Renewal {
    pub subscription: Subscription,
    pub days_until: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenewalReport {
    pub days: u32,
    /// Soonest first.
    pub renewals: Vec<Renewal>,
    pub total_due: MoneyCents,
}

impl RenewalReport {
    /// Charges falling in `[today, today + days]`, or `None` when there are
    /// none.
    pub fn build<'a>(
        subs: impl IntoIterator<Item = &'a Subscription>,
        days: u32,
        today: NaiveDate,
    ) -> Option<Self> {
        let until = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);

        let mut renewals: Vec<Renewal> = subs
            .into_iter()
            .filter(|s| s.next_billing >= today && s.next_billing <= until)
            .map(|s| Renewal {
                subscription: s.clone(),
                days_until: (s.next_billing - today).num_days(),
            })
            .collect();
        if renewals.is_empty() {
            return None;
        }

        renewals.sort_by(|a, b| {
            a.subscription
                .next_billing
                .cmp(&b.subscription.next_billing)
                .then_with(|| a.subscription.name.cmp(&b.subscription.name))
        });
        let total_due = renewals.iter().map(|r| r.subscription.amount).sum();

        Some(Self {
            days,
            renewals,
            total_due,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatsReport {
    pub total: usize,
    pub active: usize,
    pub cancelled: usize,
    pub monthly_cents: f64,
    /// Monthly spend per active subscription, 0 without active ones.
    pub average_cents: f64,
    /// Raw (not normalized) amounts per category, largest first, at most
    /// [`TOP_CATEGORIES`] entries.
    pub top_categories: Vec<(Category, MoneyCents)>,
}

impl StatsReport {
    /// Builds statistics over every stored subscription, cancelled included.
    /// Returns `None` when nothing is stored.
    pub fn build<'a>(subs: impl IntoIterator<Item = &'a Subscription>) -> Option<Self> {
        let mut total = 0;
        let mut active = 0;
        let mut monthly_cents = 0.0;
        let mut per_category: HashMap<Category, MoneyCents> = HashMap::new();

        for sub in subs {
            total += 1;
            if !sub.is_active() {
                continue;
            }
            active += 1;
            monthly_cents += monthly_equivalent(sub.amount, sub.billing_cycle);
            *per_category.entry(sub.category).or_default() += sub.amount;
        }
        if total == 0 {
            return None;
        }

        let average_cents = if active > 0 {
            monthly_cents / active as f64
        } else {
            0.0
        };

        let mut top_categories: Vec<(Category, MoneyCents)> = per_category.into_iter().collect();
        top_categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_categories.truncate(TOP_CATEGORIES);

        Some(Self {
            total,
            active,
            cancelled: total - active,
            monthly_cents,
            average_cents,
            top_categories,
        })
    }
}

fn sorted_desc(map: HashMap<Category, f64>) -> Vec<(Category, f64)> {
    let mut entries: Vec<(Category, f64)> = map.into_iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}
