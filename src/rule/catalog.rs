use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Every rule the checker knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    DescriptionMissing,
    AssigneeMissing,
    PriorityMissing,
    FinancialCategoryMissing,
    StoryPointsMissing,
    OriginalEstimateMissing,
    TimeLoggedOnAggregate,
    TimeLoggedInToDo,
    SubtaskFullyLoggedInProgress,
    StoryWithoutSubtasks,
    ReleasedButNotDone,
    ReleaseDatePassedUnreleased,
}

impl RuleKind {
    pub fn message(self) -> &'static str {
        match self {
            Self::DescriptionMissing => "Description is missing",
            Self::AssigneeMissing => "Assignee not assigned",
            Self::PriorityMissing => "Priority not set",
            Self::FinancialCategoryMissing => "Financial Category is missing",
            Self::StoryPointsMissing => "Story points not estimated (required for Stories)",
            Self::OriginalEstimateMissing => "Original Estimate missing (required for Sub-tasks)",
            Self::TimeLoggedOnAggregate => {
                "Time logged in Epic/Story (only allowed in Sub-tasks and Bugs)"
            }
            Self::TimeLoggedInToDo => "Time logged but issue still in To Do status",
            Self::SubtaskFullyLoggedInProgress => "Sub-task 100% logged - still open",
            Self::StoryWithoutSubtasks => "Story is past its initial status but has no Sub-tasks",
            Self::ReleasedButNotDone => "Fix version is released but issue is not Done",
            Self::ReleaseDatePassedUnreleased => {
                "Fix version release date has passed but it is not released"
            }
        }
    }
}
