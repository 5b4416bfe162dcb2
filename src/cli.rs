use clap::{Parser, Subcommand};

// Display order for API token option (placed at top of help text)
const API_TOKEN_DISPLAY_ORDER: usize = 0;
// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(name = "issue-checker", version, about = "Check Jira issues and their sub-issues for missing data and workflow problems", long_about = None)]
pub struct Cli {
    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: ISSUE_CHECKER_LOG=] [default: info]
    #[arg(
        long,
        env = "ISSUE_CHECKER_LOG",
        default_value = "info",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a default issue-checker.toml config file
    Init(InitArgs),
    /// Check an issue and its related issues against the rules
    Check(CheckArgs),
    /// Print the JSON Schema of the check report
    Schema,
}

/// Arguments for the init command
#[derive(Parser)]
pub struct InitArgs {
    /// Path to config file
    #[arg(long, default_value = "issue-checker.toml")]
    pub config: String,

    /// Override existing config file
    #[arg(long)]
    pub r#override: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Issue key to check (e.g. ABC-123)
    pub key: String,

    /// Path to config file (initialize with `issue-checker init`)
    #[arg(long, default_value = "issue-checker.toml")]
    pub config: String,

    /// Override config values using dot notation (e.g. rules.assignee_on_epics=true)
    #[arg(long = "config-override")]
    pub config_overrides: Vec<String>,

    /// Jira API token
    #[arg(long, env = "ISSUE_CHECKER_JIRA_TOKEN", hide_env_values = true, display_order = API_TOKEN_DISPLAY_ORDER)]
    pub api_token: Option<String>,

    /// Output file path (.md or .json)
    #[arg(long)]
    pub output: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_args() {
        let cli = Cli::try_parse_from([
            "issue-checker",
            "check",
            "ABC-1",
            "--config-override",
            "rules.description_on_tasks=true",
            "--output",
            "out.md",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.key, "ABC-1");
        assert_eq!(args.config, "issue-checker.toml");
        assert_eq!(args.config_overrides, vec!["rules.description_on_tasks=true"]);
        assert_eq!(args.output.as_deref(), Some("out.md"));
    }

    #[test]
    fn test_check_requires_key() {
        assert!(Cli::try_parse_from(["issue-checker", "check"]).is_err());
    }
}
