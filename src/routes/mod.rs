//! Page paths
//!
//! Paths the profile page navigates to, and extraction of the profile
//! identifier from the current path.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Shown when the profile identifier is missing or unknown
pub const NOT_FOUND: &str = "/404";

/// Where the visitor lands after deleting their account
pub const LANDING: &str = "/landing";

const PROFILE_PREFIX: &str = "profile";

/// Characters escaped in a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn profile_path(profile_id: &str) -> String {
    format!(
        "/{}/{}",
        PROFILE_PREFIX,
        utf8_percent_encode(profile_id, SEGMENT)
    )
}

/// Extract the identifier from `/profile/{id}`. Query and fragment are ignored.
///
/// The segment is percent-decoded; one that does not decode to UTF-8 counts
/// as missing.
pub fn profile_id(path: &str) -> Option<String> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').filter(|s| !s.is_empty());

    match (segments.next(), segments.next(), segments.next()) {
        (Some(PROFILE_PREFIX), Some(id), None) => percent_decode_str(id)
            .decode_utf8()
            .ok()
            .map(|id| id.into_owned()),
        _ => None,
    }
}

/// Whether a path takes the visitor off the profile page for good.
pub fn leaves_page(path: &str) -> bool {
    path == NOT_FOUND || path == LANDING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_identifier_from_profile_paths() {
        assert_eq!(profile_id("/profile/u-42"), Some("u-42".to_string()));
        assert_eq!(profile_id("/profile/u-42/"), Some("u-42".to_string()));
        assert_eq!(profile_id("/profile/u-42?tab=about"), Some("u-42".to_string()));
        assert_eq!(profile_id(&profile_path("abc")), Some("abc".to_string()));
    }

    #[test]
    fn missing_identifier_yields_none() {
        assert_eq!(profile_id("/profile"), None);
        assert_eq!(profile_id("/profile/"), None);
        assert_eq!(profile_id("/profile/u-42/edit"), None);
        assert_eq!(profile_id("/landing"), None);
        assert_eq!(profile_id(""), None);
    }

    #[test]
    fn identifier_is_percent_decoded() {
        assert_eq!(profile_id("/profile/ann%20lee"), Some("ann lee".to_string()));
        assert_eq!(profile_id("/profile/a%2Fb"), Some("a/b".to_string()));
        assert_eq!(profile_id("/profile/caf%C3%A9"), Some("café".to_string()));
        // '+' is literal in a path
        assert_eq!(profile_id("/profile/a+b"), Some("a+b".to_string()));
        assert_eq!(profile_id("/profile/%FF"), None);
    }

    #[test]
    fn built_paths_carry_the_identifier_intact() {
        assert_eq!(profile_path("ann lee"), "/profile/ann%20lee");
        for id in ["ann lee", "a/b", "100%", "q?x#y", "café"] {
            assert_eq!(profile_id(&profile_path(id)), Some(id.to_string()), "{}", id);
        }
    }

    #[test]
    fn exit_paths() {
        assert!(leaves_page(NOT_FOUND));
        assert!(leaves_page(LANDING));
        assert!(!leaves_page("/profile/u-42"));
    }
}
