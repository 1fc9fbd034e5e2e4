use crate::adapters::page::MemoryPage;
use crate::core::render::ROW_ID_ATTR;
use crate::domain::elements as el;
use crate::domain::model::{MatchResult, SavedMatch, UploadedResume};
use crate::domain::ports::Dialogs;
use scraper::{ElementRef, Html, Selector};
use std::io::{self, BufRead, Write};

const RULE: &str = "============================================================";
const PREVIEW_CHARS: usize = 100;

/// Alerts go to stdout; confirmations read a line from stdin unless `assume_yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalDialogs {
    assume_yes: bool,
}

impl TerminalDialogs {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Dialogs for TerminalDialogs {
    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation");
                false
            }
        }
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn select_texts(fragment: &Html, css: &str) -> Vec<String> {
    let Some(sel) = selector(css) else {
        return Vec::new();
    };
    fragment.select(&sel).map(text_of).collect()
}

fn first_text(element: ElementRef<'_>, css: &str) -> String {
    selector(css)
        .and_then(|sel| element.select(&sel).next())
        .map(text_of)
        .unwrap_or_default()
}

/// Text rendering of the results section, if it is shown.
pub fn results_summary(page: &MemoryPage) -> Option<String> {
    if !page.is_visible(el::RESULTS_SECTION) {
        return None;
    }

    let mut out = format!(
        "{RULE}\nMATCH SCORE: {}/100 ({})\n{RULE}\n\nExplanation:\n{}\n",
        page.text(el::SCORE_VALUE),
        page.text(el::SCORE_RATING),
        page.text(el::EXPLANATION)
    );

    if page.is_visible(el::RECOMMENDATIONS_BOX) {
        let list = Html::parse_fragment(&page.html(el::RECOMMENDATIONS_LIST));
        out.push_str("\nRecommendations to Improve Match:\n");
        for (i, rec) in select_texts(&list, "li").iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, rec));
        }
    }

    Some(out)
}

pub fn saved_notice(result: &MatchResult) -> Option<String> {
    result.id.map(|id| format!("✓ Match saved with ID: {id}"))
}

pub fn upload_details(uploaded: &UploadedResume) -> String {
    format!(
        "Uploaded file: {}",
        uploaded.filename.as_deref().unwrap_or("N/A")
    )
}

fn preview(text: Option<&str>) -> String {
    text.unwrap_or("N/A").chars().take(PREVIEW_CHARS).collect()
}

/// Resume and job description previews of a stored match, cut to 100 characters.
pub fn preview_details(saved: &SavedMatch) -> String {
    format!(
        "Resume Preview: {}...\nJD Preview: {}...",
        preview(saved.resume_preview.as_deref()),
        preview(saved.jd_preview.as_deref())
    )
}

/// Text rendering of the saved-matches section, if it is shown.
pub fn matches_summary(page: &MemoryPage) -> Option<String> {
    if !page.is_visible(el::MATCHES_LIST) {
        return None;
    }

    let stats = Html::parse_fragment(&page.html(el::STATS_BOX));
    let values = select_texts(&stats, ".stat-value");
    let mut out = format!("{RULE}\nSTORED MATCHES\n{RULE}\n");
    if let [total, average] = values.as_slice() {
        out.push_str(&format!("Total matches: {total}\nAverage score: {average}/100\n"));
    }

    let table = Html::parse_fragment(&page.html(el::MATCHES_TABLE));
    let placeholder = select_texts(&table, ".empty-state");
    if let Some(notice) = placeholder.first() {
        out.push_str(&format!("\n{notice}\n"));
        return Some(out);
    }

    out.push_str(&format!("{}\n", "-".repeat(RULE.len())));
    if let Some(rows) = selector(".match-row") {
        for (i, row) in table.select(&rows).enumerate() {
            let id = row.value().attr(ROW_ID_ATTR).unwrap_or("?");
            out.push_str(&format!(
                "{}. ID: {} | {} | {}\n   {}\n",
                i + 1,
                id,
                first_text(row, ".match-score"),
                first_text(row, ".match-time"),
                first_text(row, ".match-explanation"),
            ));
        }
    }

    Some(out)
}
