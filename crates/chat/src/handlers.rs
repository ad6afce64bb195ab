use chrono::NaiveDate;
use engine::{AddOutcome, Engine, EngineError};

use crate::{
    parsing::{Command, ParseError},
    ui,
};

/// Runs a parsed command against the engine and renders the reply.
pub(crate) fn dispatch(engine: &Engine, command: Command, today: NaiveDate) -> String {
    match command {
        Command::Add(cmd) => match engine.add(cmd, today) {
            Ok(AddOutcome::Added(sub)) => ui::render_added(&sub),
            Ok(AddOutcome::AlreadyExists(sub)) => ui::render_duplicate(&sub),
            Err(err) => user_message_for_error(err),
        },
        Command::List => ui::render_list(&engine.list()),
        Command::Costs => ui::render_costs(engine.costs().as_ref()),
        Command::Upcoming { days } => {
            ui::render_upcoming(engine.upcoming(days, today).as_ref(), days)
        }
        Command::Cancel { name } => match engine.cancel(&name, today) {
            Ok(sub) => ui::render_cancelled(&sub),
            Err(err) => user_message_for_error(err),
        },
        Command::Delete { name } => match engine.delete(&name) {
            Ok(sub) => ui::render_deleted(&sub),
            Err(err) => user_message_for_error(err),
        },
        Command::Stats => ui::render_stats(engine.stats().as_ref()),
        Command::Help => ui::help_text().to_string(),
    }
}

pub(crate) fn user_message_for_parse_error(err: ParseError) -> String {
    match err {
        ParseError::AddUsage => ui::add_usage().to_string(),
        ParseError::InvalidAmount(raw) => ui::invalid_amount(&raw),
        ParseError::CancelUsage => ui::cancel_usage().to_string(),
        ParseError::DeleteUsage => ui::delete_usage().to_string(),
    }
}

fn user_message_for_error(err: EngineError) -> String {
    match err {
        EngineError::KeyNotFound(name) => ui::render_not_found(&name),
        EngineError::InvalidName(_) => ui::add_usage().to_string(),
        EngineError::InvalidAmount(message) => ui::invalid_amount(&message),
        EngineError::Io(_) | EngineError::Json(_) => {
            tracing::error!("failed to persist subscriptions: {err}");
            ui::storage_failure().to_string()
        }
    }
}
