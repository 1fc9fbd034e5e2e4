use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend identifier of a saved match.
pub type MatchId = i64;

/// Response of `POST /api/match`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    pub explanation: String,
    /// Absent and `null` both decode to `None`.
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
    /// Only set when the request asked for the match to be saved.
    #[serde(default)]
    pub id: Option<MatchId>,
}

/// A match persisted server-side, as returned by the list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMatch {
    pub id: MatchId,
    pub score: f64,
    pub explanation: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// ISO datetime, usually without an offset.
    pub timestamp: String,
    #[serde(default)]
    pub resume_preview: Option<String>,
    #[serde(default)]
    pub jd_preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub total: u64,
    pub average_score: f64,
}

/// Response of `GET /api/matches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchesPage {
    pub stats: MatchStats,
    #[serde(default)]
    pub matches: Vec<SavedMatch>,
}

/// Response of `POST /api/upload-resume`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedResume {
    pub text: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Body of `POST /api/match`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub resume: String,
    pub jd: String,
    pub save: bool,
}

/// A file picked in the resume file input.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        let extension = std::path::Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => "application/pdf",
            Some("txt") => "text/plain",
            Some("md") => "text/markdown",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOrder {
    #[default]
    Score,
    Timestamp,
}

impl MatchOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOrder::Score => "score",
            MatchOrder::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for MatchOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" => Ok(MatchOrder::Score),
            "timestamp" => Ok(MatchOrder::Timestamp),
            other => Err(format!("unknown order '{other}', expected score or timestamp")),
        }
    }
}

/// Query parameters of `GET /api/matches`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u32,
    pub order: MatchOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            order: MatchOrder::Score,
        }
    }
}

/// Categorical label derived from a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Good,
    Moderate,
    BelowAverage,
    Poor,
}

impl Rating {
    /// Lower bounds are inclusive: 75 is Excellent, 74.99 is Good.
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            Rating::Excellent
        } else if score >= 60.0 {
            Rating::Good
        } else if score >= 45.0 {
            Rating::Moderate
        } else if score >= 30.0 {
            Rating::BelowAverage
        } else {
            Rating::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent Fit!",
            Rating::Good => "Good Fit",
            Rating::Moderate => "Moderate Fit",
            Rating::BelowAverage => "Below Average Fit",
            Rating::Poor => "Poor Fit",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
