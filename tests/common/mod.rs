#![allow(dead_code)]

use httpmock::MockServer;
use resume_match_client::domain::ports::Dialogs;
use resume_match_client::{HttpMatchApi, MemoryPage, UiController};
use std::sync::Mutex;

/// Records alerts and answers confirmations with a fixed value.
#[derive(Default)]
pub struct RecordingDialogs {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
}

impl RecordingDialogs {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }
}

pub type TestController = UiController<HttpMatchApi, MemoryPage, RecordingDialogs>;

pub fn controller(server: &MockServer, confirm: bool) -> TestController {
    let api = HttpMatchApi::new(&server.base_url(), None).unwrap();
    UiController::new(api, MemoryPage::new(), RecordingDialogs::answering(confirm))
}
