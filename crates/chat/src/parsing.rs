use std::sync::LazyLock;

use engine::{AddCmd, BillingCycle, Category, MoneyCents};
use regex::Regex;

const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// What a message asks for, with its parameters already extracted.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Add(AddCmd),
    List,
    Costs,
    Upcoming { days: u32 },
    Cancel { name: String },
    Delete { name: String },
    Stats,
    Help,
}

/// A message matched an intent but its parameters are unusable.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("add needs a name and an amount")]
    AddUsage,
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("cancel needs a name")]
    CancelUsage,
    #[error("delete needs a name")]
    DeleteUsage,
}

/// One routing rule: when any keyword occurs in the lower-cased message the
/// parser decides the command.
struct Rule {
    keywords: &'static [&'static str],
    parse: fn(&str) -> Result<Command, ParseError>,
}

/// Evaluated top to bottom, first match wins.
const RULES: [Rule; 7] = [
    Rule {
        keywords: &["add subscription", "new subscription", "subscribe to"],
        parse: parse_add,
    },
    Rule {
        keywords: &[
            "show my subscriptions",
            "list subscriptions",
            "all subscriptions",
            "my subscriptions",
        ],
        parse: |_| Ok(Command::List),
    },
    Rule {
        keywords: &["subscription costs", "how much", "spending", "total cost"],
        parse: |_| Ok(Command::Costs),
    },
    Rule {
        keywords: &["upcoming", "renewals", "renewing", "next billing"],
        parse: parse_upcoming,
    },
    Rule {
        keywords: &["cancel subscription", "cancel my subscription"],
        parse: parse_cancel,
    },
    Rule {
        keywords: &["delete subscription", "remove subscription"],
        parse: parse_delete,
    },
    Rule {
        keywords: &[
            "subscription stats",
            "subscription statistics",
            "subscription overview",
        ],
        parse: |_| Ok(Command::Stats),
    },
];

// Patterns are literals, compiling them cannot fail.
#[allow(clippy::expect_used)]
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("invalid built-in pattern")
}

static ADD_FULL: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)(?:add|new|subscribe to)\s+(?:subscription:?\s+)?(.+?)\s+(\d+\.?\d*)\s*(€|EUR)?\s*(weekly|monthly|quarterly|yearly)?",
    )
});
static ADD_SHORT: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(?:add|new)\s+(?:subscription:?\s+)?(.+?)\s+(\d+\.?\d*)"));
static CYCLE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(weekly|monthly|quarterly|yearly)"));
static CATEGORY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(\w+)(?:\s*$|\s+category)"));
static CANCEL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)(?:cancel|cancellation)\s+(?:my\s+)?(?:subscriptions?:?\s*)?")
});
static DELETE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(?:delete|remove)\s+(?:subscriptions?:?\s*)?"));
static IN_DAYS: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)in\s+(\d+)\s+days?"));

/// Classifies a free-text message and extracts its parameters.
///
/// Messages matching no rule ask for help.
pub(crate) fn parse_command(message: &str) -> Result<Command, ParseError> {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lower.contains(kw)))
        .map_or(Ok(Command::Help), |rule| (rule.parse)(message))
}

/// `Add subscription: Netflix 15.99€ monthly [category]`
///
/// Cycle and category are looked up in the whole message, not only next to
/// the amount. A trailing word that is not a known category is ignored and the
/// category is detected from the name.
fn parse_add(message: &str) -> Result<Command, ParseError> {
    let caps = [&*ADD_FULL, &*ADD_SHORT]
        .into_iter()
        .find_map(|re| re.captures(message))
        .ok_or(ParseError::AddUsage)?;

    let name = caps.get(1).map_or("", |m| m.as_str()).trim();
    let raw_amount = caps.get(2).map_or("", |m| m.as_str());
    let amount: MoneyCents = raw_amount
        .parse()
        .map_err(|_| ParseError::InvalidAmount(raw_amount.to_string()))?;

    let cycle = CYCLE
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<BillingCycle>().ok())
        .unwrap_or_default();
    let category = CATEGORY_TOKEN
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<Category>().ok());

    let mut cmd = AddCmd::new(name, amount).billing_cycle(cycle);
    if let Some(category) = category {
        cmd = cmd.category(category);
    }
    Ok(Command::Add(cmd))
}

fn parse_upcoming(message: &str) -> Result<Command, ParseError> {
    let days = IN_DAYS
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(DEFAULT_UPCOMING_DAYS);
    Ok(Command::Upcoming { days })
}

fn parse_cancel(message: &str) -> Result<Command, ParseError> {
    strip_verb(&CANCEL_PREFIX, message)
        .map(|name| Command::Cancel { name })
        .ok_or(ParseError::CancelUsage)
}

fn parse_delete(message: &str) -> Result<Command, ParseError> {
    strip_verb(&DELETE_PREFIX, message)
        .map(|name| Command::Delete { name })
        .ok_or(ParseError::DeleteUsage)
}

/// Removes the first verb phrase and returns what is left, if anything.
fn strip_verb(prefix: &Regex, message: &str) -> Option<String> {
    let rest = prefix.replacen(message, 1, "");
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(message: &str) -> AddCmd {
        match parse_command(message).unwrap() {
            Command::Add(cmd) => cmd,
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn add_with_symbol_and_cycle() {
        let cmd = add("Add subscription: Netflix 15.99€ monthly");
        assert_eq!(cmd.name, "Netflix");
        assert_eq!(cmd.amount.cents(), 1599);
        assert_eq!(cmd.billing_cycle, BillingCycle::Monthly);
        assert_eq!(cmd.category, None);
    }

    #[test]
    fn add_with_trailing_category() {
        let cmd = add("Add subscription: AWS 45€ monthly cloud");
        assert_eq!(cmd.name, "AWS");
        assert_eq!(cmd.amount.cents(), 4500);
        assert_eq!(cmd.category, Some(Category::Cloud));
    }

    #[test]
    fn add_category_keyword_form() {
        let cmd = add("add subscription Gym 30 health category");
        assert_eq!(cmd.name, "Gym");
        assert_eq!(cmd.category, Some(Category::Health));
    }

    #[test]
    fn add_cycle_found_anywhere() {
        let cmd = add("subscribe to Yearly Planner 20");
        assert_eq!(cmd.name, "Yearly Planner");
        assert_eq!(cmd.billing_cycle, BillingCycle::Yearly);
    }

    #[test]
    fn add_defaults_to_monthly() {
        let cmd = add("new subscription Disney+ 8.99");
        assert_eq!(cmd.name, "Disney+");
        assert_eq!(cmd.billing_cycle, BillingCycle::Monthly);
    }

    #[test]
    fn add_without_amount_is_usage() {
        assert_eq!(
            parse_command("Add subscription: Netflix"),
            Err(ParseError::AddUsage)
        );
    }

    #[test]
    fn add_rounds_extra_decimals() {
        let cmd = add("Add subscription: Netflix 15.999 monthly");
        assert_eq!(cmd.name, "Netflix");
        assert_eq!(cmd.amount.cents(), 1600);
    }

    #[test]
    fn add_with_oversized_amount_is_invalid() {
        assert_eq!(
            parse_command("Add subscription: Netflix 99999999999999999999 monthly"),
            Err(ParseError::InvalidAmount("99999999999999999999".to_string()))
        );
    }

    #[test]
    fn routes_report_intents() {
        assert_eq!(parse_command("Show my subscriptions"), Ok(Command::List));
        assert_eq!(parse_command("How much am I paying?"), Ok(Command::Costs));
        assert_eq!(parse_command("subscription stats"), Ok(Command::Stats));
        assert_eq!(parse_command("hello"), Ok(Command::Help));
    }

    #[test]
    fn add_wins_over_later_rules() {
        // also contains "spending"
        let cmd = add("add subscription Spending Tracker 3");
        assert_eq!(cmd.name, "Spending Tracker");
    }

    #[test]
    fn upcoming_window() {
        assert_eq!(
            parse_command("Upcoming renewals"),
            Ok(Command::Upcoming { days: 7 })
        );
        assert_eq!(
            parse_command("What is renewing in 30 days?"),
            Ok(Command::Upcoming { days: 30 })
        );
        assert_eq!(
            parse_command("upcoming in 1 day"),
            Ok(Command::Upcoming { days: 1 })
        );
        assert_eq!(
            parse_command("upcoming in 99999999999 days"),
            Ok(Command::Upcoming { days: 7 })
        );
    }

    #[test]
    fn cancel_and_delete_strip_verb() {
        assert_eq!(
            parse_command("Cancel subscription: AWS"),
            Ok(Command::Cancel {
                name: "AWS".to_string()
            })
        );
        assert_eq!(
            parse_command("cancel my subscription Netflix"),
            Ok(Command::Cancel {
                name: "Netflix".to_string()
            })
        );
        assert_eq!(
            parse_command("Remove subscription Apple Music"),
            Ok(Command::Delete {
                name: "Apple Music".to_string()
            })
        );
    }

    #[test]
    fn cancel_without_name_is_usage() {
        assert_eq!(
            parse_command("Cancel subscription"),
            Err(ParseError::CancelUsage)
        );
        assert_eq!(
            parse_command("delete subscription:  "),
            Err(ParseError::DeleteUsage)
        );
    }
}
