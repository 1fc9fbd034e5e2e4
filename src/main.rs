use anyhow::Context;
use clap::Parser;
use resume_match_client::adapters::terminal::{
    matches_summary, preview_details, results_summary, saved_notice, upload_details,
};
use resume_match_client::config::cli::{Command, TextSource};
use resume_match_client::domain::elements as el;
use resume_match_client::domain::model::SelectedFile;
use resume_match_client::domain::ports::{ConfigProvider, Page};
use resume_match_client::utils::error::{ClientError, ErrorSeverity};
use resume_match_client::utils::logger;
use resume_match_client::{
    dispatch, CliConfig, HttpMatchApi, MemoryPage, Outcome, TerminalDialogs, UiController, UiEvent,
};
use std::path::Path;

type Controller = UiController<HttpMatchApi, MemoryPage, TerminalDialogs>;

async fn read_selected_file(path: &Path) -> resume_match_client::Result<SelectedFile> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile::new(name, bytes))
}

async fn run(controller: &Controller, command: &Command) -> resume_match_client::Result<Outcome> {
    let page = controller.page();

    let outcome = match command {
        Command::Upload { file } => {
            let selected = read_selected_file(file).await?;
            let outcome = dispatch(controller, UiEvent::FileSelected(Some(selected))).await;
            if outcome == Outcome::Applied {
                println!("{}", page.value(el::RESUME));
            }
            outcome
        }
        Command::Match { resume, jd, save } => {
            // 履歷檔案交給後端擷取文字，與網頁的檔案選取相同
            match TextSource::resolve(resume) {
                TextSource::File(path) => {
                    let selected = read_selected_file(&path).await?;
                    let outcome = dispatch(controller, UiEvent::FileSelected(Some(selected))).await;
                    if outcome != Outcome::Applied {
                        return Ok(outcome);
                    }
                }
                TextSource::Inline(text) => page.set_value(el::RESUME, &text),
            }

            let jd_text = match TextSource::resolve(jd) {
                TextSource::File(path) => tokio::fs::read_to_string(&path).await?,
                TextSource::Inline(text) => text,
            };
            page.set_value(el::JD, &jd_text);
            page.set_checked(el::SAVE_MATCH, *save);

            dispatch(controller, UiEvent::SubmitMatch).await
        }
        Command::List { .. } => dispatch(controller, UiEvent::LoadMatches).await,
        Command::View { id } => dispatch(controller, UiEvent::ViewMatch(*id)).await,
        Command::Delete { id, .. } => dispatch(controller, UiEvent::DeleteMatch(*id)).await,
    };

    Ok(outcome)
}

fn exit_code(error: &ClientError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(error: ClientError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(exit_code(&error));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let settings = cli.settings().unwrap_or_else(|e| fail(e));
    let api = HttpMatchApi::from_config(&settings).unwrap_or_else(|e| fail(e));
    tracing::info!(base_url = %api.base_url(), "using matching server");

    let assume_yes = matches!(cli.command, Command::Delete { yes: true, .. });
    let controller = UiController::new(api, MemoryPage::new(), TerminalDialogs::new(assume_yes))
        .with_timestamp_format(settings.timestamp_format())
        .with_list_query(settings.list_query());

    let outcome = run(&controller, &cli.command)
        .await
        .unwrap_or_else(|e| fail(e));

    let page = controller.page();
    if let Some(summary) = results_summary(page) {
        println!("{summary}");
    }
    if let Some(summary) = matches_summary(page) {
        println!("{summary}");
    }

    let latest = controller.latest();
    if let Some(notice) = latest.result.as_ref().and_then(saved_notice) {
        println!("{notice}");
    }
    if cli.verbose {
        if let Some(uploaded) = &latest.upload {
            println!("{}", upload_details(uploaded));
        }
        if let Some(saved) = &latest.detail {
            println!("{}", preview_details(saved));
        }
    }

    if let Some(path) = &cli.html_out {
        tokio::fs::write(path, page.export_html())
            .await
            .with_context(|| format!("writing page to {}", path.display()))?;
        println!("📁 Page saved to: {}", path.display());
    }

    if outcome.is_failure() {
        std::process::exit(1);
    }

    Ok(())
}
