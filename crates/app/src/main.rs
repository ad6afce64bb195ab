use chrono_tz::Tz;
use engine::JsonFileStore;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{AppError, Result};

mod error;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = settings::load()?;

    // Replies go to stdout, logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "subtrack={level},chat={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let timezone: Tz = settings
        .app
        .timezone
        .parse()
        .map_err(|_| AppError::Timezone(settings.app.timezone.clone()))?;

    tracing::info!("Using subscriptions file {}", settings.store.path);
    let handler = chat::Handler::builder()
        .store(JsonFileStore::new(&settings.store.path))
        .timezone(timezone)
        .build();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        let reply = handler.handle(message).await;
        println!("{reply}\n");
    }

    tracing::info!("Input closed, bye");
    Ok(())
}
