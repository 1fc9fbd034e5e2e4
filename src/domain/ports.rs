use crate::domain::model::{
    ListQuery, MatchId, MatchRequest, MatchResult, MatchesPage, SavedMatch, SelectedFile,
    UploadedResume,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Backend matching API.
#[async_trait]
pub trait MatchApi: Send + Sync {
    async fn upload_resume(&self, file: &SelectedFile) -> Result<UploadedResume>;
    async fn submit_match(&self, request: &MatchRequest) -> Result<MatchResult>;
    async fn list_matches(&self, query: &ListQuery) -> Result<MatchesPage>;
    async fn get_match(&self, id: MatchId) -> Result<SavedMatch>;
    async fn delete_match(&self, id: MatchId) -> Result<()>;
}

/// Label and enabled flag of a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub label: String,
    pub enabled: bool,
}

impl ControlState {
    pub fn idle(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }

    pub fn busy(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: false,
        }
    }
}

/// The page the controller renders into, addressed by element id.
///
/// Unknown ids read as empty/unchecked and writes to them are ignored, the
/// way optional elements behave on the page.
pub trait Page: Send + Sync {
    fn value(&self, id: &str) -> String;
    fn set_value(&self, id: &str, value: &str);
    fn is_checked(&self, id: &str) -> bool;
    fn set_text(&self, id: &str, text: &str);
    /// `html` must already be escaped where it carries server text.
    fn set_html(&self, id: &str, html: &str);
    fn set_visible(&self, id: &str, visible: bool);
    /// Smooth-scrolls the element into view.
    fn scroll_into_view(&self, id: &str);
    fn submit_control(&self, form_id: &str) -> ControlState;
    fn set_submit_control(&self, form_id: &str, state: ControlState);
    fn reset_form(&self, form_id: &str);
}

/// Blocking user notifications.
pub trait Dialogs: Send + Sync {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    /// `None` waits indefinitely.
    fn request_timeout(&self) -> Option<Duration>;
    fn timestamp_format(&self) -> &str;
    fn list_query(&self) -> ListQuery;
}
