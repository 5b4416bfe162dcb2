use crate::rule::catalog::RuleKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A rule failure attributed to one issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    /// Rule that failed
    pub rule: RuleKind,
    /// Human-readable message for the rule
    pub message: String,
    /// Key of the related issue, or `None` for the root issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_key: Option<String>,
}

impl Violation {
    pub fn new(rule: RuleKind) -> Self {
        Self {
            rule,
            message: rule.message().to_string(),
            issue_key: None,
        }
    }

    /// Attribute this violation to a related issue
    pub fn keyed(mut self, key: &str) -> Self {
        self.issue_key = Some(key.to_string());
        self
    }

    /// Message with a `[KEY] ` prefix for related issues
    pub fn rendered(&self) -> String {
        match &self.issue_key {
            Some(key) => format!("[{}] {}", key, self.message),
            None => self.message.clone(),
        }
    }
}

/// Violations of one validation pass, root issue first then related issues
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    /// Key of the root issue
    pub root_key: String,
    /// Violations in evaluation order
    pub violations: Vec<Violation>,
}

impl Report {
    pub fn new(root_key: &str) -> Self {
        Self {
            root_key: root_key.to_string(),
            violations: Vec::new(),
        }
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_prefixes_related_issue_key() {
        let root = Violation::new(RuleKind::AssigneeMissing);
        assert_eq!(root.rendered(), "Assignee not assigned");
        let related = root.clone().keyed("ABC-12");
        assert_eq!(related.rendered(), "[ABC-12] Assignee not assigned");
        assert_ne!(root, related);
    }

    #[test]
    fn test_report_counts() {
        let mut report = Report::new("ABC-1");
        assert!(!report.has_violations());
        assert_eq!(report.len(), 0);
        report.violations.push(Violation::new(RuleKind::PriorityMissing));
        assert!(report.has_violations());
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_root_violation_omits_issue_key_in_json() {
        let json = serde_json::to_value(Violation::new(RuleKind::DescriptionMissing)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rule": "description_missing",
                "message": "Description is missing",
            })
        );
    }
}
