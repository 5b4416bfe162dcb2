use crate::config::Config;
use crate::issue::{IssueFields, IssueKind, RawIssue};
use crate::repository::{IssueRepository, Relation};
use crate::rule::catalog::RuleKind;
use crate::rule::evaluate::evaluate;
use crate::types::{Report, Violation};
use chrono::{Local, NaiveDate};
use tracing::{debug, info, trace};

/// Validate a root issue and its related issues as of today
pub async fn validate(
    root: &RawIssue,
    config: &Config,
    repository: &dyn IssueRepository,
) -> Report {
    validate_on(root, config, repository, Local::now().date_naive()).await
}

/// Validate a root issue and its related issues as of `today`
///
/// - Root violations come first and carry no issue key
/// - Epics pull in every issue whose parent or epic link is the root
/// - Stories pull in their sub-tasks; a started story with none is itself a violation
/// - Other kinds are validated alone
///
/// Related violations follow in repository order, keyed by the related issue.
pub async fn validate_on(
    root: &RawIssue,
    config: &Config,
    repository: &dyn IssueRepository,
    today: NaiveDate,
) -> Report {
    let mut report = Report::new(&root.key);
    let fields = IssueFields::from_raw(&root.fields, &config.fields);
    debug!("Validating {} as {:?} ({})", root.key, fields.kind, fields.status);

    report
        .violations
        .extend(evaluate(&fields, &config.rules, today));
    trace!("{} root violations for {}", report.len(), root.key);

    let relation = match fields.kind {
        IssueKind::Epic => Relation::EpicMembers,
        IssueKind::Story => Relation::ChildrenOfParent,
        _ => {
            debug!("{} has no related issues to check", root.key);
            return report;
        }
    };

    let related = repository.fetch_related(&root.key, relation).await;
    info!(
        "Found {} related issues for {} ({:?})",
        related.len(),
        root.key,
        relation
    );

    if fields.kind == IssueKind::Story && !fields.is_initial() && related.is_empty() {
        report
            .violations
            .push(Violation::new(RuleKind::StoryWithoutSubtasks));
        return report;
    }

    for issue in &related {
        let issue_fields = IssueFields::from_raw(&issue.fields, &config.fields);
        let violations = evaluate(&issue_fields, &config.rules, today);
        trace!("{} violations for {}", violations.len(), issue.key);
        report
            .violations
            .extend(violations.into_iter().map(|v| v.keyed(&issue.key)));
    }

    report
}
