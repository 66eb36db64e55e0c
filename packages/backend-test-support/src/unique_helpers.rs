//! Test helpers for generating unique test data
//!
//! Usernames, emails and course names are unique columns, so fixtures that
//! share a database need collision-free values.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use birdie_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique email address with the given prefix
///
/// # Examples
/// ```
/// use birdie_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("golfer");
/// assert!(email.ends_with("@example.test"));
/// assert!(email.starts_with("golfer-"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix.to_lowercase(), Ulid::new())
}
