use crate::types::Report;

/// Format a report as Markdown, one section per issue in evaluation order
pub fn format_report(report: &Report) -> String {
    if !report.has_violations() {
        return format!("No violations found in {}", report.root_key);
    }

    let mut output = format!(
        "# {} violation(s) for {}\n",
        report.len(),
        report.root_key
    );
    let mut current: Option<&str> = None;
    for violation in &report.violations {
        let issue = violation.issue_key.as_deref().unwrap_or(&report.root_key);
        if current != Some(issue) {
            output.push_str(&format!("\n## {}\n\n", issue));
            current = Some(issue);
        }
        output.push_str(&format!("- {}\n", violation.message));
    }
    output.trim_end().to_string()
}

/// One line per violation, `[KEY] ` prefixed for related issues
pub fn format_lines(report: &Report) -> Vec<String> {
    report.violations.iter().map(|v| v.rendered()).collect()
}
