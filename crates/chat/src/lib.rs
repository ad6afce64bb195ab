//! Free-text front end of the subscription tracker.
//!
//! A [`Handler`] turns one message into one reply. It keeps no conversation
//! state: every message is classified on its own, dispatched to the
//! [`engine::Engine`] and rendered as text. Every path ends in a reply, errors
//! included.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use engine::{Engine, Store};

mod handlers;
mod parsing;
mod ui;

const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Rome;

pub struct Handler {
    engine: Engine,
    timezone: Tz,
}

impl Handler {
    pub fn builder() -> HandlerBuilder {
        HandlerBuilder::default()
    }

    /// Answers `message`, using the current date in the handler time zone.
    pub async fn handle(&self, message: &str) -> String {
        self.handle_on(message, self.today()).await
    }

    /// Answers `message` as if it were received on `today`.
    pub async fn handle_on(&self, message: &str, today: NaiveDate) -> String {
        match parsing::parse_command(message) {
            Ok(command) => {
                tracing::debug!("routing {command:?}");
                handlers::dispatch(&self.engine, command, today)
            }
            Err(err) => {
                tracing::debug!("unusable command: {err}");
                handlers::user_message_for_parse_error(err)
            }
        }
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

#[derive(Default)]
pub struct HandlerBuilder {
    engine: Option<Engine>,
    timezone: Option<Tz>,
}

impl HandlerBuilder {
    pub fn engine(mut self, engine: Engine) -> HandlerBuilder {
        self.engine = Some(engine);
        self
    }

    /// Shortcut for an engine over `store`.
    pub fn store(self, store: impl Store + 'static) -> HandlerBuilder {
        self.engine(Engine::builder().store(store).build())
    }

    /// Time zone "today" is computed in. Defaults to Europe/Rome.
    pub fn timezone(mut self, timezone: Tz) -> HandlerBuilder {
        self.timezone = Some(timezone);
        self
    }

    pub fn build(self) -> Handler {
        tracing::info!("Initializing subscription handler...");
        Handler {
            engine: self
                .engine
                .unwrap_or_else(|| Engine::builder().build()),
            timezone: self.timezone.unwrap_or(DEFAULT_TIMEZONE),
        }
    }
}
