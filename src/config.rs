use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub fields: FieldsConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct JiraConfig {
    /// Jira site root, e.g. https://example.atlassian.net
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Account email for Basic auth; bearer auth is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            email: None,
        }
    }
}

/// Jira field ids for site-specific custom fields
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FieldsConfig {
    #[serde(default = "default_financial_category")]
    pub financial_category: String,
    /// Checked in order; the first populated field wins
    #[serde(default = "default_story_points")]
    pub story_points: Vec<String>,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            financial_category: default_financial_category(),
            story_points: default_story_points(),
        }
    }
}

/// Toggles for optional rules
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RulesConfig {
    #[serde(default)]
    pub description_on_subtasks: bool,
    #[serde(default)]
    pub description_on_epics: bool,
    #[serde(default)]
    pub description_on_tasks: bool,
    #[serde(default)]
    pub assignee_on_epics: bool,
    #[serde(default)]
    pub priority_on_epics: bool,
}

/// Timesheet reminder settings, consumed by schedulers rather than the checker
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RemindersConfig {
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: u32,
    #[serde(default = "default_timelog_message")]
    pub timelog_message: String,
    #[serde(default = "default_timesheet_message")]
    pub timesheet_message: String,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            weekly_hours: default_weekly_hours(),
            timelog_message: default_timelog_message(),
            timesheet_message: default_timesheet_message(),
        }
    }
}

fn default_base_url() -> String {
    "https://your-domain.atlassian.net".to_string()
}

fn default_financial_category() -> String {
    "customfield_10350".to_string()
}

fn default_story_points() -> Vec<String> {
    vec!["customfield_10016".into(), "customfield_10026".into()]
}

fn default_weekly_hours() -> u32 {
    40
}

fn default_timelog_message() -> String {
    "Please log your hours for this week!".to_string()
}

fn default_timesheet_message() -> String {
    "Please submit your timesheet for this month!".to_string()
}

impl Config {
    /// Load the config file and apply `key.path=value` overrides on top
    pub fn load_with_overrides(path: &str, overrides: &[String]) -> anyhow::Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
        Self::parse(&content, overrides).with_context(|| format!("Invalid config {}", path))
    }

    pub fn parse(content: &str, overrides: &[String]) -> anyhow::Result<Self> {
        let mut table: toml::Table = toml::from_str(content)?;
        for entry in overrides {
            apply_override(&mut table, entry)?;
        }
        Ok(toml::Value::Table(table).try_into()?)
    }

    /// Default config rendered as TOML
    pub fn scaffold() -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }
}

fn apply_override(table: &mut toml::Table, entry: &str) -> anyhow::Result<()> {
    let Some((path, raw)) = entry.split_once('=') else {
        bail!("Override '{}' must be in key.path=value form", entry);
    };
    let keys: Vec<&str> = path.trim().split('.').collect();
    if keys.iter().any(|k| k.is_empty()) {
        bail!("Override '{}' has an empty key", entry);
    }

    let (last, parents) = keys.split_last().context("empty override key")?;
    let mut current = table;
    for key in parents {
        let next = current
            .entry(key.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        current = match next {
            toml::Value::Table(t) => t,
            _ => bail!("Override '{}': '{}' is not a table", entry, key),
        };
    }
    current.insert(last.to_string(), parse_value(raw.trim()));
    Ok(())
}

/// Parse as a TOML value, or keep the raw text as a string
fn parse_value(raw: &str) -> toml::Value {
    toml::from_str::<toml::Table>(&format!("value = {}", raw))
        .ok()
        .and_then(|mut t| t.remove("value"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}
