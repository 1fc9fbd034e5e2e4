//! Element ids the controller binds to.

pub const RESUME_FILE: &str = "resumeFile";
pub const RESUME: &str = "resume";
pub const JD: &str = "jd";
pub const SAVE_MATCH: &str = "saveMatch";
pub const MATCH_FORM: &str = "matchForm";

pub const SCORE_VALUE: &str = "scoreValue";
pub const SCORE_RATING: &str = "scoreRating";
pub const EXPLANATION: &str = "explanation";
pub const RECOMMENDATIONS_BOX: &str = "recommendationsBox";
pub const RECOMMENDATIONS_LIST: &str = "recommendationsList";
pub const RESULTS_SECTION: &str = "resultsSection";

pub const MATCHES_LIST: &str = "matchesList";
pub const STATS_BOX: &str = "statsBox";
pub const MATCHES_TABLE: &str = "matchesTable";

/// Fields owned by the match form, reset together.
pub const FORM_FIELDS: [&str; 4] = [RESUME_FILE, RESUME, JD, SAVE_MATCH];

pub const SUBMIT_LABEL: &str = "Analyze Match";
pub const SUBMIT_BUSY_LABEL: &str = "Analyzing...";
