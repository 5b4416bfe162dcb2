use super::{aggregate, render};
use crate::config::Config;
use crate::repository::IssueRepository;
use crate::types::Report;
use anyhow::{Context, bail};
use tracing::{debug, error, info};

/// Fetch the root issue, validate it with its related issues, and emit the report
///
/// Returns `Ok(None)` when the root issue cannot be fetched.
pub async fn check_and_report(
    key: &str,
    config: &Config,
    repository: &dyn IssueRepository,
    output: Option<&str>,
) -> anyhow::Result<Option<Report>> {
    debug!("Fetching root issue {}", key);
    let Some(root) = repository.fetch_issue(key).await else {
        error!("Issue {} could not be fetched", key);
        return Ok(None);
    };

    let report = aggregate::validate(&root, config, repository).await;
    info!("Check complete: {} violation(s)", report.len());

    if let Some(path) = output {
        write_output(path, &report)?;
    } else {
        print_report(&report);
    }

    Ok(Some(report))
}

fn print_report(report: &Report) {
    if !report.has_violations() {
        info!("No violations found");
        return;
    }

    for line in render::format_lines(report) {
        info!("{}", line);
    }
}

fn write_output(path: &str, report: &Report) -> anyhow::Result<()> {
    let content = if path.ends_with(".json") {
        serde_json::to_string_pretty(report)?
    } else if path.ends_with(".md") {
        render::format_report(report)
    } else {
        bail!("Output file must end with .md or .json");
    };

    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path))?;
    info!("Results written to {}", path);
    Ok(())
}
