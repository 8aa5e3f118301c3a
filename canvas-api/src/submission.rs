use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use serde::Deserialize;

use crate::error::{CanvasError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId {
    id: u64,
}

impl SubmissionId {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.id.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId {
    id: u64,
}

impl AssignmentId {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.id.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct AssignmentGroupId {
    id: u64,
}

impl AssignmentGroupId {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

impl fmt::Display for AssignmentGroupId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.id.fmt(f)
    }
}

/// A student's submission for one assignment. `score` is absent until the
/// submission has been graded.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    id: SubmissionId,
    score: Option<f64>,
    assignment: Assignment,
}

impl Submission {
    pub fn new(id: SubmissionId, score: Option<f64>, assignment: Assignment) -> Self {
        Self {
            id,
            score,
            assignment,
        }
    }

    pub fn id(&self) -> SubmissionId {
        self.id
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    id: AssignmentId,
    name: String,
    points_possible: f64,
    assignment_group_id: AssignmentGroupId,
    #[serde(default)]
    group: Option<AssignmentGroup>,
}

impl Assignment {
    pub fn new(
        id: AssignmentId,
        name: String,
        points_possible: f64,
        assignment_group_id: AssignmentGroupId,
    ) -> Self {
        Self {
            id,
            name,
            points_possible,
            assignment_group_id,
            group: None,
        }
    }

    pub fn id(&self) -> AssignmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points_possible(&self) -> f64 {
        self.points_possible
    }

    pub fn assignment_group_id(&self) -> AssignmentGroupId {
        self.assignment_group_id
    }

    /// The assignment group this assignment belongs to. Populated by
    /// `resolve_groups`; `None` on a freshly decoded submission.
    pub fn group(&self) -> Option<&AssignmentGroup> {
        self.group.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssignmentGroup {
    id: AssignmentGroupId,
    name: String,
    group_weight: f64,
}

impl AssignmentGroup {
    pub fn new(id: AssignmentGroupId, name: String, group_weight: f64) -> Self {
        Self {
            id,
            name,
            group_weight,
        }
    }

    pub fn id(&self) -> AssignmentGroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group_weight(&self) -> f64 {
        self.group_weight
    }
}

/// Copies each submission's assignment group out of the fetched group
/// list. Submissions and groups come from two independent fetches, so a
/// group id with no matching group is a data-consistency violation and
/// fails the whole resolution.
pub fn resolve_groups(
    submissions: Vec<Submission>,
    groups: &[AssignmentGroup],
) -> Result<Vec<Submission>> {
    let group_map: HashMap<AssignmentGroupId, &AssignmentGroup> =
        groups.iter().map(|group| (group.id(), group)).collect();

    submissions
        .into_iter()
        .map(|mut submission| {
            let group_id = submission.assignment.assignment_group_id;
            match group_map.get(&group_id) {
                Some(group) => {
                    submission.assignment.group = Some((*group).clone());
                    Ok(submission)
                }
                None => Err(CanvasError::Consistency {
                    submission_id: submission.id,
                    group_id,
                }),
            }
        })
        .try_collect()
}
