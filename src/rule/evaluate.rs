use super::catalog::RuleKind;
use crate::config::RulesConfig;
use crate::issue::{IssueFields, IssueKind};
use crate::types::Violation;
use chrono::NaiveDate;

/// Evaluate one issue against the rule catalog as of `today`.
///
/// Returned violations are unkeyed; the caller attributes them to an issue.
/// Each rule appears at most once.
pub fn evaluate(fields: &IssueFields, rules: &RulesConfig, today: NaiveDate) -> Vec<Violation> {
    violated_rules(fields, rules, today)
        .into_iter()
        .map(Violation::new)
        .collect()
}

fn violated_rules(fields: &IssueFields, rules: &RulesConfig, today: NaiveDate) -> Vec<RuleKind> {
    let kind = fields.kind;
    let mut violated = Vec::new();

    if !fields.has_description && description_required(kind, rules) {
        violated.push(RuleKind::DescriptionMissing);
    }

    if !fields.has_assignee && (kind != IssueKind::Epic || rules.assignee_on_epics) {
        violated.push(RuleKind::AssigneeMissing);
    }

    if !fields.has_priority && (kind != IssueKind::Epic || rules.priority_on_epics) {
        violated.push(RuleKind::PriorityMissing);
    }

    let needs_financial_category = matches!(
        kind,
        IssueKind::Story | IssueKind::Task | IssueKind::Bug | IssueKind::SubTask
    );
    if needs_financial_category && fields.financial_category.is_none() {
        violated.push(RuleKind::FinancialCategoryMissing);
    }

    if kind == IssueKind::Story && !fields.is_initial() && fields.story_points.is_none() {
        violated.push(RuleKind::StoryPointsMissing);
    }

    if kind == IssueKind::SubTask && fields.original_estimate.is_none() {
        violated.push(RuleKind::OriginalEstimateMissing);
    }

    let time_logged = fields.time_spent > 0;
    if time_logged && kind.is_aggregate() {
        violated.push(RuleKind::TimeLoggedOnAggregate);
    }

    if time_logged && fields.is_to_do() {
        violated.push(RuleKind::TimeLoggedInToDo);
    }

    if kind == IssueKind::SubTask && fields.is_in_progress() {
        let estimate = fields.aggregate_original_estimate;
        if estimate > 0 && fields.time_spent >= estimate {
            violated.push(RuleKind::SubtaskFullyLoggedInProgress);
        }
    }

    if !fields.is_done() && fields.fix_versions.iter().any(|v| v.released) {
        violated.push(RuleKind::ReleasedButNotDone);
    }

    let overdue = fields
        .fix_versions
        .iter()
        .any(|v| !v.released && v.release_date.is_some_and(|d| d < today));
    if overdue {
        violated.push(RuleKind::ReleaseDatePassedUnreleased);
    }

    violated
}

fn description_required(kind: IssueKind, rules: &RulesConfig) -> bool {
    match kind {
        IssueKind::Story | IssueKind::Bug => true,
        IssueKind::SubTask => rules.description_on_subtasks,
        IssueKind::Epic => rules.description_on_epics,
        IssueKind::Task => rules.description_on_tasks,
        IssueKind::Other => false,
    }
}
