use crate::config::{FieldsConfig, JiraConfig};
use crate::issue::RawIssue;
use crate::repository::{IssueRepository, Relation};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, trace, warn};

/// Standard fields read by the checker
const STANDARD_FIELDS: [&str; 9] = [
    "issuetype",
    "status",
    "assignee",
    "priority",
    "description",
    "timeoriginalestimate",
    "aggregatetimeoriginalestimate",
    "timespent",
    "fixVersions",
];

/// Issues requested per search page
const PAGE_SIZE: usize = 50;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<RawIssue>,
    #[serde(default)]
    total: usize,
}

impl SearchResponse {
    /// No further pages after this one, given `fetched` issues from earlier pages
    fn is_last_page(&self, fetched: usize) -> bool {
        self.issues.is_empty() || fetched + self.issues.len() >= self.total
    }
}

/// Jira REST API v2 client
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    email: Option<String>,
    api_token: Option<String>,
    fields: String,
}

impl JiraClient {
    pub fn new(config: &JiraConfig, field_ids: &FieldsConfig, api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            email: config.email.clone(),
            api_token,
            fields: field_list(field_ids),
        }
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.client.get(url).header("Accept", "application/json");
        match (&self.email, &self.api_token) {
            (Some(email), Some(token)) => request.basic_auth(email, Some(token)),
            (None, Some(token)) => request.bearer_auth(token),
            _ => request,
        }
    }

    /// Base URL extended with REST path segments, each one percent-encoded
    fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = Url::parse(&self.base_url).context("Invalid Jira base URL")?;
        let base_url = &self.base_url;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Jira base URL cannot have a path: {}", base_url))?
            .pop_if_empty()
            .extend(["rest", "api", "2"])
            .extend(segments);
        Ok(url)
    }

    fn issue_url(&self, key: &str) -> anyhow::Result<Url> {
        self.endpoint(&["issue", key])
    }

    fn search_url(&self, jql: &str, start_at: usize) -> anyhow::Result<Url> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut()
            .append_pair("jql", jql)
            .append_pair("fields", &self.fields)
            .append_pair("startAt", &start_at.to_string())
            .append_pair("maxResults", &PAGE_SIZE.to_string());
        Ok(url)
    }

    async fn try_fetch_issue(&self, key: &str) -> anyhow::Result<RawIssue> {
        let url = self.issue_url(key)?;
        debug!("GET {}", url);
        let response = self.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn try_search(&self, jql: &str) -> anyhow::Result<Vec<RawIssue>> {
        let mut issues: Vec<RawIssue> = Vec::new();
        loop {
            let url = self.search_url(jql, issues.len())?;
            debug!("GET {}", url);
            let response = self.get(url).send().await?.error_for_status()?;
            let page: SearchResponse = response.json().await?;
            let last = page.is_last_page(issues.len());
            trace!("Search page: {} of {} issues", page.issues.len(), page.total);
            issues.extend(page.issues);
            if last {
                return Ok(issues);
            }
        }
    }
}

#[async_trait]
impl IssueRepository for JiraClient {
    async fn fetch_issue(&self, key: &str) -> Option<RawIssue> {
        match self.try_fetch_issue(key).await {
            Ok(issue) => Some(issue),
            Err(e) => {
                warn!("Failed to fetch issue {}: {:#}", key, e);
                None
            }
        }
    }

    async fn fetch_related(&self, key: &str, relation: Relation) -> Vec<RawIssue> {
        let jql = relation.jql(key);
        trace!("Searching related issues with JQL: {}", jql);
        self.try_search(&jql).await.unwrap_or_else(|e| {
            warn!("Failed to fetch related issues for {}: {:#}", key, e);
            Vec::new()
        })
    }
}

/// Comma-separated field list for search requests
fn field_list(field_ids: &FieldsConfig) -> String {
    let mut fields: Vec<&str> = STANDARD_FIELDS.to_vec();
    fields.push(&field_ids.financial_category);
    fields.extend(field_ids.story_points.iter().map(String::as_str));
    fields.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_list_includes_custom_fields() {
        let fields = field_list(&FieldsConfig::default());
        assert!(fields.starts_with("issuetype,status,"));
        assert!(fields.ends_with("customfield_10350,customfield_10016,customfield_10026"));
        assert!(!fields.split(',').any(|f| f == "parent"));
    }

    #[test]
    fn test_search_response_tolerates_missing_issues() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.issues.is_empty());
    }

    #[test]
    fn test_raw_issue_without_fields() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"issues": [{"key": "ABC-1"}]}"#).unwrap();
        assert_eq!(response.issues[0].key, "ABC-1");
        assert!(response.issues[0].fields.is_null());
    }

    #[test]
    fn test_search_pages() {
        let first: SearchResponse = serde_json::from_str(
            r#"{"startAt": 0, "maxResults": 2, "total": 3,
                "issues": [{"key": "ABC-1"}, {"key": "ABC-2"}]}"#,
        )
        .unwrap();
        assert_eq!(first.total, 3);
        assert!(!first.is_last_page(0));

        let second: SearchResponse = serde_json::from_str(
            r#"{"startAt": 2, "maxResults": 2, "total": 3, "issues": [{"key": "ABC-3"}]}"#,
        )
        .unwrap();
        assert!(second.is_last_page(2));

        let empty: SearchResponse =
            serde_json::from_str(r#"{"startAt": 4, "total": 9, "issues": []}"#).unwrap();
        assert!(empty.is_last_page(4));

        let untotalled: SearchResponse =
            serde_json::from_str(r#"{"issues": [{"key": "ABC-1"}]}"#).unwrap();
        assert!(untotalled.is_last_page(0));
    }

    fn client(base_url: &str) -> JiraClient {
        let config = JiraConfig {
            base_url: base_url.into(),
            email: None,
        };
        JiraClient::new(&config, &FieldsConfig::default(), None)
    }

    #[test]
    fn test_issue_key_is_escaped_in_path() {
        let url = client("https://jira.example.com/").issue_url("A/B?x").unwrap();
        assert_eq!(url.path(), "/rest/api/2/issue/A%2FB%3Fx");
        assert_eq!(url.query(), None);

        let url = client("https://example.com/jira").issue_url("ABC-1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/jira/rest/api/2/issue/ABC-1");
    }

    #[test]
    fn test_search_url_carries_paging() {
        let url = client("https://jira.example.com")
            .search_url("parent = ABC-1", 50)
            .unwrap();
        assert_eq!(url.path(), "/rest/api/2/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("jql".into(), "parent = ABC-1".into())));
        assert!(pairs.contains(&("startAt".into(), "50".into())));
        assert!(pairs.contains(&("maxResults".into(), PAGE_SIZE.to_string())));
    }

    #[tokio::test]
    async fn test_unreachable_server_collapses_to_empty() {
        let config = JiraConfig {
            base_url: "http://127.0.0.1:1".into(),
            email: None,
        };
        let client = JiraClient::new(&config, &FieldsConfig::default(), None);
        assert!(client.fetch_issue("ABC-1").await.is_none());
        assert!(
            client
                .fetch_related("ABC-1", Relation::ChildrenOfParent)
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_invalid_base_url_collapses_to_empty() {
        let config = JiraConfig {
            base_url: "not a url".into(),
            email: None,
        };
        let client = JiraClient::new(&config, &FieldsConfig::default(), None);
        assert!(client.fetch_issue("ABC-1").await.is_none());
        assert!(client.fetch_related("ABC-1", Relation::EpicMembers).await.is_empty());
    }
}
