pub mod callbacks;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod indexer;
pub mod inline;
pub mod keyboards;
pub mod telegram;
pub mod types;
pub mod utils;

pub use config::{BotConfig, ChatRef};
pub use error::{BotError, BotResult};
pub use teloxide::prelude::Dispatcher;
pub use types::{Command, HandlerResult};
