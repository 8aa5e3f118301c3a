use crate::course::CourseId;

pub const DEFAULT_BASE_URL: &str = "https://vt.instructure.com/api/v1/";
pub const USER_PROFILE_PATH: &str = "users/self/profile";
pub const COURSES_PATH: &str = "courses";

/// Canvas caps `per_page` at 100; ask for the maximum to minimize paging.
pub const PER_PAGE: &str = "100";

pub fn submissions_path(course_id: CourseId) -> String {
    format!("courses/{course_id}/students/submissions")
}

pub fn assignment_groups_path(course_id: CourseId) -> String {
    format!("courses/{course_id}/assignment_groups")
}

/// Extracts the `rel="next"` target from an HTTP `Link` header, e.g.
/// `<https://x/api?page=2>; rel="next", <https://x/api?page=9>; rel="last"`.
pub fn next_link(header: &str) -> Option<&str> {
    header.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        let is_next = params
            .split(';')
            .any(|param| param.trim() == "rel=\"next\"");
        if !is_next {
            return None;
        }
        target.trim().strip_prefix('<')?.strip_suffix('>')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_link_found_among_other_rels() {
        let header = "<https://example.com/api/v1/courses?page=3>; rel=\"prev\", \
                      <https://example.com/api/v1/courses?page=5>; rel=\"next\", \
                      <https://example.com/api/v1/courses?page=9>; rel=\"last\"";
        assert_eq!(
            next_link(header),
            Some("https://example.com/api/v1/courses?page=5")
        );
    }

    #[test]
    fn no_next_rel_means_no_link() {
        let header = "<https://example.com/api/v1/courses?page=9>; rel=\"last\"";
        assert_eq!(next_link(header), None);
    }

    #[test]
    fn garbage_header_yields_none() {
        assert_eq!(next_link("not a link header"), None);
    }
}
