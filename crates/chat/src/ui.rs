use std::fmt::Write;

use engine::{
    CategoryGroup, CostReport, Currency, MoneyCents, RenewalReport, StatsReport, Subscription,
};

/// Totals are shown symbol first, `€15.99`.
fn total(amount: MoneyCents) -> String {
    Currency::default().prefixed(amount)
}

fn total_f64(cents: f64) -> String {
    total(MoneyCents::from_cents_f64(cents))
}

fn charge(sub: &Subscription) -> String {
    sub.currency.suffixed(sub.amount)
}

fn price(sub: &Subscription) -> String {
    format!("{}/{}", charge(sub), sub.billing_cycle)
}

pub(crate) fn render_added(sub: &Subscription) -> String {
    format!(
        "✅ **Subscription added!**\n\n{} **{}**\n💰 {}\n📅 Next billing: {}\n📂 Category: {}",
        sub.category.icon(),
        sub.name,
        price(sub),
        sub.next_billing,
        sub.category
    )
}

pub(crate) fn render_duplicate(sub: &Subscription) -> String {
    format!(
        "⚠️ **Subscription already exists!**\n\n{} - {}\n\n*Use \"Update subscription: [Name]\" to modify.*",
        sub.name,
        price(sub)
    )
}

pub(crate) fn render_list(groups: &[CategoryGroup]) -> String {
    let count: usize = groups.iter().map(|g| g.subscriptions.len()).sum();
    if count == 0 {
        return "📋 **No subscriptions yet**\n\n*Use \"Add subscription: [Name] [Amount] [Cycle]\" to get started.*".to_string();
    }

    let mut text = format!("📋 **Your Subscriptions ({count})**\n");
    for group in groups {
        let _ = write!(
            text,
            "\n{} **{}**\n",
            group.category.icon(),
            group.category.title()
        );
        for sub in &group.subscriptions {
            let _ = writeln!(text, "   • {} - {}", sub.name, price(sub));
        }
    }
    text.trim_end().to_string()
}

pub(crate) fn render_costs(report: Option<&CostReport>) -> String {
    let Some(report) = report else {
        return "💰 **No subscriptions to calculate**\n\n*Add some subscriptions first.*"
            .to_string();
    };

    let mut text = format!(
        "💰 **Subscription Costs**\n\n📅 **Monthly:** {}\n📆 **Yearly:** {}\n\n**By Category (Monthly):**",
        total_f64(report.monthly_cents),
        total_f64(report.yearly_cents)
    );
    for cost in &report.by_category {
        let _ = write!(
            text,
            "\n{} {}: {} {}",
            cost.category.icon(),
            cost.category,
            total_f64(cost.monthly_cents),
            "█".repeat(cost.bar_len)
        );
    }
    text
}

pub(crate) fn render_upcoming(report: Option<&RenewalReport>, days: u32) -> String {
    let Some(report) = report else {
        return format!(
            "🔔 **No renewals in the next {days} days**\n\n*All clear! No upcoming charges.*"
        );
    };

    let mut text = format!("🔔 **Upcoming Renewals ({} days)**\n", report.days);
    for renewal in &report.renewals {
        let sub = &renewal.subscription;
        let _ = write!(
            text,
            "\n📅 **{}** - {}\n   Due: {} ({} days)\n",
            sub.name,
            charge(sub),
            sub.next_billing,
            renewal.days_until
        );
    }
    let _ = write!(text, "\n💰 **Total Due:** {}", total(report.total_due));
    text
}

pub(crate) fn render_cancelled(sub: &Subscription) -> String {
    format!(
        "🗑️ **Subscription cancelled**\n\n{} will be removed from active subscriptions.",
        sub.name
    )
}

pub(crate) fn render_deleted(sub: &Subscription) -> String {
    format!(
        "🗑️ **Subscription deleted**\n\n{} has been permanently removed.",
        sub.name
    )
}

pub(crate) fn render_not_found(name: &str) -> String {
    format!("⚠️ **Subscription not found:** {name}")
}

pub(crate) fn render_stats(report: Option<&StatsReport>) -> String {
    let Some(stats) = report else {
        return "📊 **No statistics available**\n\n*Add some subscriptions first.*".to_string();
    };

    let mut text = format!(
        "📊 **Subscription Statistics**\n\n\
         📈 **Total Subscriptions:** {}\n\
         ✅ **Active:** {}\n\
         ❌ **Cancelled:** {}\n\n\
         💰 **Monthly Spending:** {}\n\
         📊 **Avg per Subscription:** {}\n\n\
         **Top Categories:**",
        stats.total,
        stats.active,
        stats.cancelled,
        total_f64(stats.monthly_cents),
        total_f64(stats.average_cents)
    );
    for (rank, (category, amount)) in stats.top_categories.iter().enumerate() {
        let _ = write!(
            text,
            "\n{}. {} {}: {}",
            rank + 1,
            category.icon(),
            category,
            total(*amount)
        );
    }
    text
}

pub(crate) fn add_usage() -> &'static str {
    "📝 **Add Subscription**\n\n\
     Use: \"Add subscription: [Name] [Amount] [Cycle]\"\n\n\
     Examples:\n\
     • \"Add subscription: Netflix 15.99€ monthly\"\n\
     • \"Add subscription: Spotify 9.99€ monthly entertainment\"\n\
     • \"Add subscription: AWS 45€ monthly cloud\""
}

pub(crate) fn cancel_usage() -> &'static str {
    "🗑️ **Cancel Subscription**\n\nUse: \"Cancel subscription: [Name]\""
}

pub(crate) fn delete_usage() -> &'static str {
    "🗑️ **Delete Subscription**\n\nUse: \"Delete subscription: [Name]\""
}

pub(crate) fn invalid_amount(raw: &str) -> String {
    format!("⚠️ **Invalid amount:** {raw}\n\n*Use a plain number, e.g. 15.99*")
}

pub(crate) fn storage_failure() -> &'static str {
    "❌ **Could not save your subscriptions.** Please try again."
}

pub(crate) fn help_text() -> &'static str {
    "📊 **Subscription Tracker Commands**\n\n\
     • \"Add subscription: [Name] [Amount] [Cycle]\"\n\
     • \"Show my subscriptions\"\n\
     • \"Subscription costs\"\n\
     • \"Upcoming renewals\"\n\
     • \"Subscription stats\"\n\
     • \"Cancel subscription: [Name]\"\n\
     • \"Delete subscription: [Name]\""
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{BillingCycle, Category};

    use super::*;

    fn sub(name: &str, cents: i64, category: Category) -> Subscription {
        Subscription::new(
            name.to_string(),
            MoneyCents::new(cents),
            BillingCycle::Monthly,
            category,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
    }

    #[test]
    fn added_message_lists_details() {
        let text = render_added(&sub("Netflix", 1599, Category::Entertainment));
        assert_eq!(
            text,
            "✅ **Subscription added!**\n\n🎬 **Netflix**\n💰 15.99€/monthly\n📅 Next billing: 2026-11-16\n📂 Category: entertainment"
        );
    }

    #[test]
    fn list_groups_under_headers() {
        let groups = vec![
            CategoryGroup {
                category: Category::Entertainment,
                subscriptions: vec![sub("Netflix", 1599, Category::Entertainment)],
            },
            CategoryGroup {
                category: Category::Cloud,
                subscriptions: vec![sub("AWS", 4500, Category::Cloud)],
            },
        ];
        assert_eq!(
            render_list(&groups),
            "📋 **Your Subscriptions (2)**\n\n🎬 **Entertainment**\n   • Netflix - 15.99€/monthly\n\n☁️ **Cloud**\n   • AWS - 45.00€/monthly"
        );
    }

    #[test]
    fn costs_show_bars() {
        let subs = [
            sub("AWS", 4500, Category::Cloud),
            sub("Netflix", 1500, Category::Entertainment),
        ];
        let report = CostReport::build(&subs);
        let text = render_costs(report.as_ref());
        assert!(text.contains("📅 **Monthly:** €60.00"));
        assert!(text.contains("📆 **Yearly:** €720.00"));
        assert!(text.contains("☁️ cloud: €45.00 ████████\n"));
        assert!(text.ends_with("🎬 entertainment: €15.00 ███"));
    }

    #[test]
    fn totals_put_the_symbol_first() {
        let subs = [
            sub("AWS", 4500, Category::Cloud),
            sub("Netflix", 1599, Category::Entertainment),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let upcoming = render_upcoming(RenewalReport::build(&subs, 31, today).as_ref(), 31);
        assert!(upcoming.contains("📅 **AWS** - 45.00€\n   Due: 2026-11-16 (31 days)"));
        assert!(upcoming.ends_with("💰 **Total Due:** €60.99"));

        let stats = render_stats(StatsReport::build(&subs).as_ref());
        assert!(stats.contains("💰 **Monthly Spending:** €60.99"));
        assert!(stats.contains("📊 **Avg per Subscription:** €30.50"));
        assert!(stats.contains("1. ☁️ cloud: €45.00\n2. 🎬 entertainment: €15.99"));
    }

    #[test]
    fn empty_reports_use_fixed_messages() {
        assert!(render_costs(None).starts_with("💰 **No subscriptions to calculate**"));
        assert!(render_stats(None).starts_with("📊 **No statistics available**"));
        assert!(render_upcoming(None, 3).starts_with("🔔 **No renewals in the next 3 days**"));
        assert!(render_list(&[]).starts_with("📋 **No subscriptions yet**"));
    }
}
