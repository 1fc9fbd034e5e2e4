use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::model::{MatchId, MatchOrder};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "match-console")]
#[command(about = "Client for the resume / job description matching service")]
pub struct CliConfig {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds; waits indefinitely when unset
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// strftime format for saved-match timestamps
    #[arg(long, global = true)]
    pub timestamp_format: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Write the rendered page to this HTML file
    #[arg(long, global = true)]
    pub html_out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Upload a resume file and print the extracted text
    Upload { file: PathBuf },

    /// Score a resume against a job description
    Match {
        /// Resume file (uploaded for text extraction) or raw text
        #[arg(long)]
        resume: String,

        /// Job description file or raw text
        #[arg(long)]
        jd: String,

        /// Persist the match on the server
        #[arg(long)]
        save: bool,
    },

    /// List saved matches with aggregate stats
    List {
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        order: Option<MatchOrder>,
    },

    /// Show one saved match with its recommendations
    #[command(alias = "recommend")]
    View { id: MatchId },

    /// Delete a saved match
    Delete {
        id: MatchId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Where a resume or job description argument comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    File(PathBuf),
    Inline(String),
}

impl TextSource {
    /// An argument naming an existing file is a file, anything else is raw text.
    pub fn resolve(arg: &str) -> Self {
        let path = Path::new(arg);
        if path.is_file() {
            TextSource::File(path.to_path_buf())
        } else {
            TextSource::Inline(arg.to_string())
        }
    }
}

impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_toml(&TomlConfig::from_file(path)?)?,
            None => Settings::default(),
        };

        // 命令列參數優先於設定檔
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.timeout = Some(Duration::from_secs(timeout));
        }
        if let Some(format) = &self.timestamp_format {
            settings.timestamp_format = format.clone();
        }
        if let Command::List { limit, order } = &self.command {
            if let Some(limit) = limit {
                settings.list_query.limit = *limit;
            }
            if let Some(order) = order {
                settings.list_query.order = *order;
            }
        }

        settings.validate()?;
        Ok(settings)
    }
}
