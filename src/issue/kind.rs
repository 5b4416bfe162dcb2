/// Coarse issue family derived from a free-text issue type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Epic,
    Story,
    Task,
    SubTask,
    Bug,
    Other,
}

impl IssueKind {
    /// Classify an issue type name by case-insensitive substring.
    ///
    /// The sub-task family is matched first so "Sub-task" never lands in `Task`.
    pub fn classify(type_name: &str) -> Self {
        let name = type_name.to_lowercase();
        if name.contains("sub") {
            Self::SubTask
        } else if name.contains("epic") {
            Self::Epic
        } else if name.contains("story") {
            Self::Story
        } else if name.contains("task") {
            Self::Task
        } else if name.contains("bug") {
            Self::Bug
        } else {
            Self::Other
        }
    }

    /// Epics and stories own related issues and should not accrue time themselves
    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::Epic | Self::Story)
    }
}
