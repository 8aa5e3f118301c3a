use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{CanvasError, Result};

lazy_static! {
    static ref SUBMISSIONS_LISTING: Regex =
        Regex::new(r"^courses/\d{2,}/students/submissions").unwrap();
}

/// A REST path identifying a remote resource, held in normalized form:
/// at most one trailing slash stripped, then lowercased. Normalization
/// happens up front so cache lookups and live requests agree on the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    path: String,
}

impl Endpoint {
    pub fn new(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(CanvasError::InvalidArgument { what: "endpoint" });
        }
        let path = path.strip_suffix('/').unwrap_or(path);
        Ok(Self {
            path: path.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Whether this endpoint lists student submissions for a course, in
    /// which case the live request also asks for assignment details.
    pub fn is_submissions_listing(&self) -> bool {
        SUBMISSIONS_LISTING.is_match(&self.path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.path.fmt(f)
    }
}
