mod check;
mod cli;
mod config;
mod issue;
mod jira;
mod repository;
mod rule;
mod types;

use clap::Parser;
use cli::{CheckArgs, Cli, Commands, InitArgs};
use config::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Init(args) => init(args),
        Commands::Check(args) => check(args).await,
        Commands::Schema => schema(),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(EXIT_FAILURE);
    }
}

fn init(args: &InitArgs) -> anyhow::Result<()> {
    if std::path::Path::new(&args.config).exists() && !args.r#override {
        anyhow::bail!(
            "{} already exists (use --override to replace it)",
            args.config
        );
    }
    std::fs::write(&args.config, Config::scaffold()?)?;
    info!("Wrote default config to {}", args.config);
    Ok(())
}

async fn check(args: &CheckArgs) -> anyhow::Result<()> {
    let config = Config::load_with_overrides(&args.config, &args.config_overrides)?;
    let client = jira::JiraClient::new(&config.jira, &config.fields, args.api_token.clone());

    let Some(report) =
        check::run::check_and_report(&args.key, &config, &client, args.output.as_deref()).await?
    else {
        std::process::exit(EXIT_FAILURE);
    };

    // Violations are blocking
    if report.has_violations() {
        info!(
            "If rules are misapplied, adjust the toggles in {}",
            args.config
        );
        std::process::exit(EXIT_FAILURE);
    }
    Ok(())
}

fn schema() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(types::Report);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
