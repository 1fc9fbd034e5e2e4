use crate::core::render::{self, DEFAULT_TIMESTAMP_FORMAT};
use crate::core::tokens::{Action, RequestToken, RequestTokens};
use crate::domain::elements as el;
use crate::domain::model::{
    ListQuery, MatchId, MatchRequest, MatchResult, MatchesPage, SavedMatch, SelectedFile,
    UploadedResume,
};
use crate::domain::ports::{ControlState, Dialogs, MatchApi, Page};
use crate::utils::error::ClientError;
use std::sync::{Mutex, MutexGuard};

pub const FILL_BOTH_MESSAGE: &str = "Please fill in both resume and job description";
pub const DELETE_CONFIRM_MESSAGE: &str = "Delete this match?";

/// What a handler did, for callers that need more than the page state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Nothing to do: no file picked, or the submit control was already busy.
    Skipped,
    /// Client-side validation failed; no request was sent.
    Rejected,
    /// The user declined a confirmation.
    Cancelled,
    /// An error was reported to the user.
    Failed,
    /// A newer request of the same action superseded this one.
    Stale,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Rejected | Outcome::Failed)
    }
}

/// Payloads of the most recently applied responses.
#[derive(Debug, Clone, Default)]
pub struct LatestResponses {
    pub upload: Option<UploadedResume>,
    pub result: Option<MatchResult>,
    pub detail: Option<SavedMatch>,
}

/// Restores the submit control when dropped, on every exit path.
struct SubmitControlGuard<'a, P: Page> {
    page: &'a P,
    original: ControlState,
}

impl<'a, P: Page> SubmitControlGuard<'a, P> {
    fn engage(page: &'a P, original: ControlState) -> Self {
        page.set_submit_control(el::MATCH_FORM, ControlState::busy(el::SUBMIT_BUSY_LABEL));
        Self { page, original }
    }
}

impl<P: Page> Drop for SubmitControlGuard<'_, P> {
    fn drop(&mut self) {
        self.page
            .set_submit_control(el::MATCH_FORM, self.original.clone());
    }
}

pub struct UiController<A: MatchApi, P: Page, D: Dialogs> {
    api: A,
    page: P,
    dialogs: D,
    tokens: RequestTokens,
    timestamp_format: String,
    list_query: ListQuery,
    latest: Mutex<LatestResponses>,
}

impl<A: MatchApi, P: Page, D: Dialogs> UiController<A, P, D> {
    pub fn new(api: A, page: P, dialogs: D) -> Self {
        Self {
            api,
            page,
            dialogs,
            tokens: RequestTokens::new(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            list_query: ListQuery::default(),
            latest: Mutex::new(LatestResponses::default()),
        }
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn with_list_query(mut self, query: ListQuery) -> Self {
        self.list_query = query;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    fn latest_mut(&self) -> MutexGuard<'_, LatestResponses> {
        self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn latest(&self) -> LatestResponses {
        self.latest_mut().clone()
    }

    /// Id the server assigned to the last rendered match, when it was saved.
    pub fn saved_match_id(&self) -> Option<MatchId> {
        self.latest_mut().result.as_ref().and_then(|result| result.id)
    }

    fn discard_if_stale(&self, token: &RequestToken) -> bool {
        let stale = !self.tokens.is_current(token);
        if stale {
            tracing::debug!(action = ?token.action(), "discarding superseded response");
        }
        stale
    }

    pub async fn handle_file_upload(&self, file: Option<SelectedFile>) -> Outcome {
        let Some(file) = file else {
            return Outcome::Skipped;
        };

        let token = self.tokens.issue(Action::Upload);
        tracing::debug!(file = %file.name, bytes = file.bytes.len(), "uploading resume");
        let result = self.api.upload_resume(&file).await;
        if self.discard_if_stale(&token) {
            return Outcome::Stale;
        }

        match result {
            Ok(uploaded) => {
                self.page.set_value(el::RESUME, &uploaded.text);
                self.latest_mut().upload = Some(uploaded);
                Outcome::Applied
            }
            Err(ClientError::Api {
                status,
                message: Some(message),
            }) => {
                tracing::warn!(status, %message, "resume upload rejected");
                self.dialogs
                    .alert(&format!("Error uploading file: {message}"));
                Outcome::Failed
            }
            Err(e) => {
                tracing::error!(error = %e, "resume upload failed");
                self.dialogs.alert("Error uploading file");
                Outcome::Failed
            }
        }
    }

    pub async fn handle_match_submit(&self) -> Outcome {
        let original = self.page.submit_control(el::MATCH_FORM);
        if !original.enabled {
            tracing::debug!("submit ignored while a match is in progress");
            return Outcome::Skipped;
        }

        let resume = self.page.value(el::RESUME).trim().to_string();
        let jd = self.page.value(el::JD).trim().to_string();
        let save = self.page.is_checked(el::SAVE_MATCH);

        if resume.is_empty() || jd.is_empty() {
            self.dialogs.alert(FILL_BOTH_MESSAGE);
            return Outcome::Rejected;
        }

        let _guard = SubmitControlGuard::engage(&self.page, original);
        let token = self.tokens.issue(Action::Match);
        let request = MatchRequest { resume, jd, save };

        let result = self.api.submit_match(&request).await;
        if self.discard_if_stale(&token) {
            return Outcome::Stale;
        }

        match result {
            Ok(result) => {
                if let Some(id) = result.id {
                    tracing::info!(id, "✓ match saved");
                }
                self.render_result(&result);
                self.latest_mut().result = Some(result);
                Outcome::Applied
            }
            Err(e) => {
                let message = match e.server_message() {
                    Some(message) => {
                        tracing::warn!(error = %e, "match request rejected");
                        message.to_string()
                    }
                    None => {
                        tracing::error!(error = %e, "match request failed");
                        "Matching failed".to_string()
                    }
                };
                self.dialogs.alert(&format!("Error: {message}"));
                Outcome::Failed
            }
        }
    }

    pub fn render_result(&self, result: &MatchResult) {
        let view = render::render_result(result);

        self.page.set_text(el::SCORE_VALUE, &view.score);
        self.page.set_text(el::SCORE_RATING, view.rating.label());
        self.page.set_text(el::EXPLANATION, &view.explanation);

        match view.recommendations_html {
            Some(html) => {
                self.page.set_html(el::RECOMMENDATIONS_LIST, &html);
                self.page.set_visible(el::RECOMMENDATIONS_BOX, true);
            }
            None => self.page.set_visible(el::RECOMMENDATIONS_BOX, false),
        }

        self.page.set_visible(el::RESULTS_SECTION, true);
        self.page.scroll_into_view(el::RESULTS_SECTION);
    }

    pub fn reset_form(&self) {
        self.page.reset_form(el::MATCH_FORM);
        self.page.set_visible(el::RESULTS_SECTION, false);
        self.page.set_visible(el::MATCHES_LIST, false);
    }

    pub async fn load_matches(&self) -> Outcome {
        let token = self.tokens.issue(Action::LoadMatches);
        let result = self.api.list_matches(&self.list_query).await;
        if self.discard_if_stale(&token) {
            return Outcome::Stale;
        }

        match result {
            Ok(page) => {
                self.render_matches(&page);
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!(error = %e, "loading matches failed");
                let reason = if e.is_expected() {
                    "Failed to load matches".to_string()
                } else {
                    e.to_string()
                };
                self.dialogs
                    .alert(&format!("Error loading matches: {reason}"));
                Outcome::Failed
            }
        }
    }

    pub fn render_matches(&self, matches: &MatchesPage) {
        let view = render::render_matches(matches, &self.timestamp_format);
        self.page.set_html(el::STATS_BOX, &view.stats_html);
        self.page.set_html(el::MATCHES_TABLE, &view.table_html);
        self.page.set_visible(el::MATCHES_LIST, true);
    }

    pub async fn view_match(&self, id: MatchId) -> Outcome {
        let token = self.tokens.issue(Action::ViewMatch);
        let result = self.api.get_match(id).await;
        if self.discard_if_stale(&token) {
            return Outcome::Stale;
        }

        match result {
            Ok(saved) => {
                self.dialogs.alert(&render::render_match_detail(&saved));
                self.latest_mut().detail = Some(saved);
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!(id, error = %e, "loading match failed");
                self.dialogs.alert("Error loading match details");
                Outcome::Failed
            }
        }
    }

    pub async fn delete_match(&self, id: MatchId) -> Outcome {
        if !self.dialogs.confirm(DELETE_CONFIRM_MESSAGE) {
            return Outcome::Cancelled;
        }

        if let Err(e) = self.api.delete_match(id).await {
            tracing::error!(id, error = %e, "deleting match failed");
            self.dialogs.alert("Error deleting match");
            return Outcome::Failed;
        }

        tracing::debug!(id, "match deleted, reloading list");
        self.load_matches().await;
        Outcome::Applied
    }
}
