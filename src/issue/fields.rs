use super::IssueKind;
use crate::config::FieldsConfig;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

/// Date format used by Jira for fix version release dates
const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Status name substrings that mean work has not started
const STATUS_TO_DO: [&str; 3] = ["to do", "backlog", "open"];
/// Status name substrings that mean work is underway
const STATUS_IN_PROGRESS: [&str; 2] = ["in progress", "progress"];
/// Status name of the initial workflow state
const STATUS_INITIAL: &str = "new";

/// Issue as returned by the repository: a key plus untyped field data
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    pub key: String,
    #[serde(default)]
    pub fields: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    New,
    Indeterminate,
    Done,
    Unknown,
}

impl StatusCategory {
    /// Accepts either the category key ("new", "indeterminate", "done") or its display name
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "new" | "to do" => Self::New,
            "indeterminate" | "in progress" => Self::Indeterminate,
            "done" => Self::Done,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixVersion {
    pub released: bool,
    pub release_date: Option<NaiveDate>,
}

/// Typed view over one issue's fields
#[derive(Debug, Clone, PartialEq)]
pub struct IssueFields {
    pub kind: IssueKind,
    /// Lowercased status name
    pub status: String,
    pub status_category: StatusCategory,
    pub has_description: bool,
    pub has_assignee: bool,
    pub has_priority: bool,
    pub financial_category: Option<Value>,
    pub story_points: Option<f64>,
    /// Seconds
    pub original_estimate: Option<u64>,
    /// Seconds
    pub aggregate_original_estimate: u64,
    /// Seconds
    pub time_spent: u64,
    pub fix_versions: Vec<FixVersion>,
}

impl IssueFields {
    /// Read typed fields from raw issue data. Never fails: missing or
    /// malformed values become false, zero or `None`.
    pub fn from_raw(fields: &Value, field_ids: &FieldsConfig) -> Self {
        let status = fields
            .pointer("/status/name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();

        Self {
            kind: IssueKind::classify(
                fields
                    .pointer("/issuetype/name")
                    .and_then(Value::as_str)
                    .unwrap_or_default(),
            ),
            status,
            status_category: status_category(fields),
            has_description: is_truthy(fields.get("description")),
            has_assignee: is_truthy(fields.get("assignee")),
            has_priority: is_truthy(fields.get("priority")),
            financial_category: fields
                .get(&field_ids.financial_category)
                .filter(|v| is_truthy(Some(*v)))
                .cloned(),
            story_points: story_points(fields, &field_ids.story_points),
            original_estimate: original_estimate(fields),
            aggregate_original_estimate: aggregate_original_estimate(fields),
            time_spent: time_spent(fields),
            fix_versions: fix_versions(fields),
        }
    }

    /// Still in the initial "New" status
    pub fn is_initial(&self) -> bool {
        self.status == STATUS_INITIAL
    }

    pub fn is_to_do(&self) -> bool {
        STATUS_TO_DO.iter().any(|s| self.status.contains(s))
    }

    pub fn is_in_progress(&self) -> bool {
        STATUS_IN_PROGRESS.iter().any(|s| self.status.contains(s))
    }

    pub fn is_done(&self) -> bool {
        self.status_category == StatusCategory::Done
    }
}

/// `null`, `false`, `0` and `""` count as absent; everything else is present
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn seconds(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
}

/// First truthy value among `sources`, in order
pub fn story_points(fields: &Value, sources: &[String]) -> Option<f64> {
    sources
        .iter()
        .map(|id| fields.get(id))
        .find(|v| is_truthy(*v))
        .flatten()
        .and_then(number)
}

/// `timeoriginalestimate`, treating zero as unset
pub fn original_estimate(fields: &Value) -> Option<u64> {
    seconds(fields.get("timeoriginalestimate")).filter(|s| *s > 0)
}

/// `aggregatetimeoriginalestimate`, then `timeoriginalestimate`, then zero
pub fn aggregate_original_estimate(fields: &Value) -> u64 {
    seconds(fields.get("aggregatetimeoriginalestimate"))
        .filter(|s| *s > 0)
        .or_else(|| original_estimate(fields))
        .unwrap_or(0)
}

/// `timespent`, defaulting to zero
pub fn time_spent(fields: &Value) -> u64 {
    seconds(fields.get("timespent")).unwrap_or(0)
}

fn status_category(fields: &Value) -> StatusCategory {
    let category = fields
        .pointer("/status/statusCategory/key")
        .or_else(|| fields.pointer("/status/statusCategory/name"))
        .or_else(|| fields.get("statusCategory"))
        .and_then(Value::as_str);
    category.map_or(StatusCategory::Unknown, StatusCategory::parse)
}

fn fix_versions(fields: &Value) -> Vec<FixVersion> {
    let Some(versions) = fields.get("fixVersions").and_then(Value::as_array) else {
        return vec![];
    };
    versions
        .iter()
        .map(|v| FixVersion {
            released: v.get("released").and_then(Value::as_bool).unwrap_or(false),
            release_date: v
                .get("releaseDate")
                .and_then(Value::as_str)
                .and_then(|d| NaiveDate::parse_from_str(d, RELEASE_DATE_FORMAT).ok()),
        })
        .collect()
}
