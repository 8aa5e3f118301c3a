use std::fmt;

use canvas_api::course::Course;
use canvas_api::submission::Submission;

/// Keeps only courses the student can actually work in.
pub fn filter_available_courses(courses: Vec<Course>) -> Vec<Course> {
    courses
        .into_iter()
        .filter(|course| course.is_available())
        .collect()
}

/// Weighted running totals over the graded submissions of one course.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsSummary {
    points_possible: f64,
    points_obtained: f64,
}

impl PointsSummary {
    pub fn points_possible(&self) -> f64 {
        self.points_possible
    }

    pub fn points_obtained(&self) -> f64 {
        self.points_obtained
    }

    /// The current grade as a rounded percentage, or `None` when nothing
    /// has been graded yet.
    pub fn current_grade(&self) -> Option<f64> {
        if self.points_possible == 0.0 {
            return None;
        }
        Some((100.0 * self.points_obtained / self.points_possible).round())
    }
}

impl fmt::Display for PointsSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Points possible so far: {}", self.points_possible)?;
        writeln!(f, "Points obtained: {}", self.points_obtained)?;
        match self.current_grade() {
            Some(grade) => write!(f, "Current grade: {grade}"),
            None => write!(f, "Current grade: no graded submissions yet"),
        }
    }
}

/// Sums score and points-possible over graded submissions, each side
/// weighted by the assignment group's weight. Ungraded submissions count
/// toward neither side. Submissions whose groups were never resolved
/// carry weight 1.
pub fn summarize_points(submissions: &[Submission]) -> PointsSummary {
    let mut points_possible = 0.0;
    let mut points_obtained = 0.0;

    for submission in submissions {
        let Some(score) = submission.score() else {
            continue;
        };
        let weight = submission
            .assignment()
            .group()
            .map(|group| group.group_weight())
            .unwrap_or(1.0);
        points_possible += submission.assignment().points_possible() * weight;
        points_obtained += score * weight;
    }

    PointsSummary {
        points_possible,
        points_obtained,
    }
}
