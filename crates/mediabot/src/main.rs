use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use store::{CatalogService, MongoStore, SearchService, StoreConfig};
use ::telegram::{telegram, BotConfig};
use teloxide::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "mediabot=info,telegram=info,store=info,teloxide=warn";

/// Log to stdout and to the file served by /logger
fn init_logging(log_file: &Path) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (file_layer, file_error) = match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => (
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file))),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("Logging to stdout only, cannot open {}: {}", log_file.display(), e);
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    let bot_config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load bot configuration: {}", e);
            return;
        }
    };

    init_logging(&bot_config.log_file);

    let store_config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load storage configuration: {}", e);
            return;
        }
    };

    let store = match MongoStore::connect(&store_config).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Failed to connect to the database: {}", e);
            return;
        }
    };

    let search = SearchService::new(store.clone(), store_config.use_caption_filter);
    let catalog = CatalogService::new(store);

    // Initialize the bot from environment variables
    let bot = Bot::from_env();

    if let Err(e) = telegram::set_bot_commands(&bot).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }

    tracing::info!(
        "Bot started, indexing {} channel(s), caption filter {}",
        bot_config.channels.len(),
        if store_config.use_caption_filter { "on" } else { "off" }
    );

    Dispatcher::builder(bot, telegram::schema())
        .dependencies(dptree::deps![Arc::new(bot_config), search, catalog])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
