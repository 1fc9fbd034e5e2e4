//! Event dispatch table from page events to controller handlers.

use crate::core::controller::{Outcome, UiController};
use crate::core::render::{ROW_ACTION_ATTR, ROW_ID_ATTR};
use crate::domain::model::{MatchId, SelectedFile};
use crate::domain::ports::{Dialogs, MatchApi, Page};
use scraper::{Html, Selector};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Change on the resume file input; `None` when the selection was cleared.
    FileSelected(Option<SelectedFile>),
    SubmitMatch,
    Reset,
    LoadMatches,
    ViewMatch(MatchId),
    DeleteMatch(MatchId),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::FileSelected(_) => "file_selected",
            UiEvent::SubmitMatch => "submit_match",
            UiEvent::Reset => "reset",
            UiEvent::LoadMatches => "load_matches",
            UiEvent::ViewMatch(_) => "view_match",
            UiEvent::DeleteMatch(_) => "delete_match",
        }
    }

    /// Event for a per-row action control, from its data attributes.
    pub fn from_row_action(action: &str, id: &str) -> Option<Self> {
        let id: MatchId = id.trim().parse().ok()?;
        match action {
            "view" => Some(UiEvent::ViewMatch(id)),
            "delete" => Some(UiEvent::DeleteMatch(id)),
            _ => None,
        }
    }
}

/// Events behind every action control in a rendered matches table, in document order.
pub fn row_controls(table_html: &str) -> Vec<UiEvent> {
    let selector_src = format!("button[{ROW_ACTION_ATTR}][{ROW_ID_ATTR}]");
    let Ok(selector) = Selector::parse(&selector_src) else {
        return Vec::new();
    };

    let fragment = Html::parse_fragment(table_html);
    fragment
        .select(&selector)
        .filter_map(|button| {
            let action = button.value().attr(ROW_ACTION_ATTR)?;
            let id = button.value().attr(ROW_ID_ATTR)?;
            UiEvent::from_row_action(action, id)
        })
        .collect()
}

pub async fn dispatch<A, P, D>(controller: &UiController<A, P, D>, event: UiEvent) -> Outcome
where
    A: MatchApi,
    P: Page,
    D: Dialogs,
{
    let name = event.name();
    tracing::debug!(event = name, "dispatching ui event");

    let outcome = match event {
        UiEvent::FileSelected(file) => controller.handle_file_upload(file).await,
        UiEvent::SubmitMatch => controller.handle_match_submit().await,
        UiEvent::Reset => {
            controller.reset_form();
            Outcome::Applied
        }
        UiEvent::LoadMatches => controller.load_matches().await,
        UiEvent::ViewMatch(id) => controller.view_match(id).await,
        UiEvent::DeleteMatch(id) => controller.delete_match(id).await,
    };

    tracing::debug!(event = name, ?outcome, "ui event handled");
    outcome
}
