//! Pure rendering: response payloads in, view-models and escaped HTML out.
//!
//! Nothing in here touches the page or the network; the controller applies
//! the returned views through the `Page` port.

use crate::domain::model::{MatchResult, MatchesPage, Rating, SavedMatch};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use std::fmt::Write;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
pub const EMPTY_MATCHES_TEXT: &str = "No matches saved yet";
pub const INVALID_DATE_TEXT: &str = "Invalid Date";

/// Attribute naming the per-row action (`view` / `delete`).
pub const ROW_ACTION_ATTR: &str = "data-action";
/// Attribute carrying the saved match id on rows and their action controls.
pub const ROW_ID_ATTR: &str = "data-match-id";

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub score: String,
    pub rating: Rating,
    pub explanation: String,
    /// `None` hides the recommendations box.
    pub recommendations_html: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchesView {
    pub stats_html: String,
    pub table_html: String,
    pub row_count: usize,
}

pub fn rating(score: f64) -> Rating {
    Rating::from_score(score)
}

/// Rounds half up, so 82.5 shows as 83 and -0.5 as 0.
pub fn display_score(score: f64) -> i64 {
    (score + 0.5).floor() as i64
}

/// One decimal, ties rounded up like `display_score`.
pub fn format_average(average: f64) -> String {
    format!("{:.1}", (average * 10.0 + 0.5).floor() / 10.0)
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Timestamps without an offset are wall-clock local time; date-only values are UTC midnight.
fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return local_wall_clock(&Local, naive);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local))
}

/// Wall-clock times skipped by a DST jump move forward by the size of the gap.
fn local_wall_clock<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return Some(dt);
    }
    let before = naive.checked_sub_signed(TimeDelta::days(1))?;
    let after = naive.checked_add_signed(TimeDelta::days(1))?;
    let offset_before = tz.from_local_datetime(&before).earliest()?.offset().fix();
    let offset_after = tz.from_local_datetime(&after).earliest()?.offset().fix();
    let gap = offset_after.local_minus_utc() - offset_before.local_minus_utc();
    let shifted = naive.checked_add_signed(TimeDelta::seconds(i64::from(gap)))?;
    tz.from_local_datetime(&shifted).earliest()
}

pub fn format_timestamp(raw: &str, format: &str) -> String {
    let Some(dt) = parse_timestamp(raw) else {
        return INVALID_DATE_TEXT.to_string();
    };

    let mut out = String::new();
    if write!(out, "{}", dt.format(format)).is_err() {
        // 格式字串無效時退回預設格式
        out.clear();
        let _ = write!(out, "{}", dt.format(DEFAULT_TIMESTAMP_FORMAT));
    }
    out
}

pub fn render_result(result: &MatchResult) -> ResultView {
    let recommendations_html = result
        .recommendations
        .as_deref()
        .filter(|recs| !recs.is_empty())
        .map(|recs| {
            recs.iter()
                .map(|rec| format!("<li>{}</li>", escape_html(rec)))
                .collect::<String>()
        });

    ResultView {
        score: display_score(result.score).to_string(),
        rating: rating(result.score),
        explanation: result.explanation.clone(),
        recommendations_html,
    }
}

fn render_stats(page: &MatchesPage) -> String {
    format!(
        concat!(
            "<div class=\"stat-item\">",
            "<div class=\"stat-value\">{}</div>",
            "<div class=\"stat-label\">Total Matches</div>",
            "</div>",
            "<div class=\"stat-item\">",
            "<div class=\"stat-value\">{}</div>",
            "<div class=\"stat-label\">Average Score</div>",
            "</div>"
        ),
        page.stats.total,
        format_average(page.stats.average_score)
    )
}

fn render_row(saved: &SavedMatch, timestamp_format: &str) -> String {
    format!(
        concat!(
            "<div class=\"match-row\" {attr_id}=\"{id}\">",
            "<div class=\"match-info\">",
            "<div class=\"match-score\">Score: {score}/100</div>",
            "<div class=\"match-explanation\">{explanation}</div>",
            "<div class=\"match-time\">{time}</div>",
            "</div>",
            "<div class=\"match-actions\">",
            "<button class=\"btn-small\" {attr_action}=\"view\" {attr_id}=\"{id}\">View</button>",
            "<button class=\"btn-small\" {attr_action}=\"delete\" {attr_id}=\"{id}\">Delete</button>",
            "</div>",
            "</div>"
        ),
        attr_id = ROW_ID_ATTR,
        attr_action = ROW_ACTION_ATTR,
        id = saved.id,
        score = display_score(saved.score),
        explanation = escape_html(&saved.explanation),
        time = escape_html(&format_timestamp(&saved.timestamp, timestamp_format)),
    )
}

pub fn render_matches(page: &MatchesPage, timestamp_format: &str) -> MatchesView {
    let table_html = if page.matches.is_empty() {
        format!(
            "<div class=\"empty-state\" style=\"padding: 20px; text-align: center; color: #999;\">{}</div>",
            EMPTY_MATCHES_TEXT
        )
    } else {
        page.matches
            .iter()
            .map(|saved| render_row(saved, timestamp_format))
            .collect()
    };

    MatchesView {
        stats_html: render_stats(page),
        table_html,
        row_count: page.matches.len(),
    }
}

/// Plain-text body of the match detail dialog.
pub fn render_match_detail(saved: &SavedMatch) -> String {
    let recommendations = if saved.recommendations.is_empty() {
        "None".to_string()
    } else {
        saved
            .recommendations
            .iter()
            .map(|rec| format!("• {rec}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Score: {}/100\n\nExplanation:\n{}\n\nRecommendations:\n{}",
        display_score(saved.score),
        saved.explanation,
        recommendations
    )
}
