pub mod controller;
pub mod dispatch;
pub mod render;
pub mod tokens;

pub use crate::domain::model::{MatchResult, MatchesPage, SavedMatch};
pub use crate::domain::ports::{ConfigProvider, Dialogs, MatchApi, Page};
pub use crate::utils::error::Result;
