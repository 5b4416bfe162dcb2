pub mod fields;
pub mod kind;

pub use fields::{IssueFields, RawIssue};
pub use kind::IssueKind;
