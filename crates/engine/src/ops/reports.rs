use chrono::NaiveDate;

use crate::aggregate::{self, CategoryGroup, CostReport, RenewalReport, StatsReport};

use super::Engine;

impl Engine {
    /// Active subscriptions grouped by category. Empty when none is active.
    pub fn list(&self) -> Vec<CategoryGroup> {
        let book = self.store.load();
        aggregate::group_by_category(book.active())
    }

    /// Normalized spend of the active subscriptions, `None` without any.
    pub fn costs(&self) -> Option<CostReport> {
        let book = self.store.load();
        CostReport::build(book.active())
    }

    /// Active subscriptions charging within `days` days from `today`.
    pub fn upcoming(&self, days: u32, today: NaiveDate) -> Option<RenewalReport> {
        let book = self.store.load();
        RenewalReport::build(book.active(), days, today)
    }

    /// Statistics over every stored subscription, `None` when nothing is
    /// stored.
    pub fn stats(&self) -> Option<StatsReport> {
        let book = self.store.load();
        StatsReport::build(book.subscriptions.values())
    }
}
