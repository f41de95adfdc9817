//! Command handlers for the Telegram bot
//!
//! - `basic`: start, help and the fallback reply
//! - `admin`: channel list, file count, log file, delete
//! - `links`: link catalog management

mod admin;
mod basic;
mod links;

pub use admin::*;
pub use basic::*;
pub use links::*;
