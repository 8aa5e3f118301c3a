use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct CourseId {
    id: u64,
}

impl CourseId {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn as_u64(self) -> u64 {
        self.id
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.id.fmt(f)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    id: CourseId,
    name: String,
    workflow_state: WorkflowState,
}

impl Course {
    pub fn new(id: CourseId, name: String, workflow_state: WorkflowState) -> Self {
        Self {
            id,
            name,
            workflow_state,
        }
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn workflow_state(&self) -> WorkflowState {
        self.workflow_state
    }

    pub fn is_available(&self) -> bool {
        self.workflow_state == WorkflowState::Available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Available,
    Unpublished,
    Completed,
    Deleted,
    #[serde(other)]
    Unknown,
}
