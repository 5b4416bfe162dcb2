use crate::issue::RawIssue;
use async_trait::async_trait;

/// How related issues hang off a root issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Sub-tasks whose parent is the root
    ChildrenOfParent,
    /// Issues whose parent or epic link is the root
    EpicMembers,
}

impl Relation {
    /// JQL selecting the related issues of `key`
    pub fn jql(self, key: &str) -> String {
        match self {
            Self::ChildrenOfParent => format!("parent={}", key),
            Self::EpicMembers => format!("parent={} OR \"Epic Link\"={}", key, key),
        }
    }
}

/// Source of issue data.
///
/// Implementations must not fail: transport or parse errors surface as
/// `None` or an empty list.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    async fn fetch_issue(&self, key: &str) -> Option<RawIssue>;

    /// Related issues in repository order
    async fn fetch_related(&self, key: &str, relation: Relation) -> Vec<RawIssue>;
}
