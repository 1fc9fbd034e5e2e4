pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::HttpMatchApi, page::MemoryPage, terminal::TerminalDialogs};
pub use config::Settings;
pub use crate::core::{
    controller::{Outcome, UiController},
    dispatch::{dispatch, UiEvent},
};
pub use utils::error::{ClientError, Result};
