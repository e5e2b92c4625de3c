// AppInventory - core/location.rs
//
// Install-location predicate deciding which records are kept.

/// System-wide applications directory prefix.
const SYSTEM_APPLICATIONS: &str = "/Applications/";

/// Per-user applications directory, relative to the home directory.
const USER_APPLICATIONS: &str = "Applications/";

/// True if `path` is inside `/Applications/` or a single user's
/// `/Users/<name>/Applications/`.
///
/// The user segment must be exactly one non-empty path component;
/// `/Users/alice/sub/Applications/` does not qualify.
pub fn is_under_applications_dir(path: &str) -> bool {
    if path.starts_with(SYSTEM_APPLICATIONS) {
        return true;
    }

    path.strip_prefix("/Users/")
        .and_then(|rest| rest.split_once('/'))
        .is_some_and(|(user, rest)| !user.is_empty() && rest.starts_with(USER_APPLICATIONS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_applications() {
        assert!(is_under_applications_dir("/Applications/Foo.app"));
        assert!(is_under_applications_dir("/Applications/Utilities/Terminal.app"));
    }

    #[test]
    fn test_user_applications() {
        assert!(is_under_applications_dir("/Users/alice/Applications/Bar.app"));
    }

    #[test]
    fn test_outside_applications() {
        assert!(!is_under_applications_dir("/Users/alice/Library/Bar.app"));
        assert!(!is_under_applications_dir("/System/Library/CoreServices/Finder.app"));
        assert!(!is_under_applications_dir("/Library/Application Support/x.app"));
        assert!(!is_under_applications_dir(""));
    }

    #[test]
    fn test_extra_user_segment_disqualifies() {
        assert!(!is_under_applications_dir("/Users/alice/sub/Applications/Bar.app"));
    }

    #[test]
    fn test_empty_user_segment_disqualifies() {
        assert!(!is_under_applications_dir("/Users//Applications/Bar.app"));
    }

    #[test]
    fn test_prefix_must_include_trailing_slash() {
        assert!(!is_under_applications_dir("/Applications"));
        assert!(!is_under_applications_dir("/ApplicationsOld/Foo.app"));
        assert!(!is_under_applications_dir("/Users/alice/Applications"));
    }
}
