//! New-owner lookup.

use crate::Result;
use crate::error::TabRotateError;
use crate::models::User;
use tracing::debug;

/// Returns the id of the only user whose name is exactly `name`.
///
/// Matching is case-sensitive. Zero matches yields
/// [`TabRotateError::OwnerNotFound`], two or more
/// [`TabRotateError::AmbiguousOwner`]; neither is retryable.
pub fn resolve_owner<'a>(users: &'a [User], name: &str, site: &str) -> Result<&'a str> {
    let mut matches = users.iter().filter(|user| user.name == name);

    match (matches.next(), matches.next()) {
        (None, _) => Err(TabRotateError::OwnerNotFound {
            owner: name.to_string(),
            site: site.to_string(),
        }),
        (Some(user), None) => {
            debug!("Resolved new owner '{}' to {}", name, user.id);
            Ok(&user.id)
        }
        (Some(_), Some(_)) => Err(TabRotateError::AmbiguousOwner {
            owner: name.to_string(),
            matches: users.iter().filter(|user| user.name == name).count(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn users(names: &[&str]) -> Vec<User> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| User::new(format!("id-{i}"), *name))
            .collect()
    }

    #[test]
    fn test_single_match() {
        let users = users(&["alice", "bob", "carol"]);
        assert_eq!(resolve_owner(&users, "bob", "finance").unwrap(), "id-1");
    }

    #[test]
    fn test_no_match() {
        let users = users(&["alice", "bob"]);
        let error = resolve_owner(&users, "dave", "finance").unwrap_err();
        assert!(matches!(error, TabRotateError::OwnerNotFound { ref site, .. } if site == "finance"));
        assert!(error.to_string().contains("does not exist"));
    }

    #[test]
    fn test_case_sensitive() {
        let users = users(&["Alice"]);
        assert!(matches!(
            resolve_owner(&users, "alice", "s"),
            Err(TabRotateError::OwnerNotFound { .. })
        ));
    }

    #[test]
    fn test_multiple_matches() {
        let users = users(&["alice", "bob", "alice", "alice"]);
        let error = resolve_owner(&users, "alice", "s").unwrap_err();
        assert!(matches!(error, TabRotateError::AmbiguousOwner { matches: 3, .. }));
        assert!(error.to_string().contains("multiple users"));
    }

    #[test]
    fn test_empty_user_list() {
        assert!(resolve_owner(&[], "alice", "s").is_err());
    }

    proptest! {
        #[test]
        fn prop_resolves_iff_exactly_one_match(
            names in proptest::collection::vec("[ab]{1,2}", 0..12),
            target in "[ab]{1,2}",
        ) {
            let users: Vec<User> = names
                .iter()
                .enumerate()
                .map(|(i, name)| User::new(format!("id-{i}"), name.clone()))
                .collect();
            let expected: Vec<usize> = names
                .iter()
                .enumerate()
                .filter(|(_, name)| **name == target)
                .map(|(i, _)| i)
                .collect();

            let result = resolve_owner(&users, &target, "site");
            match expected.as_slice() {
                [] => {
                    let not_found = matches!(result, Err(TabRotateError::OwnerNotFound { .. }));
                    prop_assert!(not_found, "expected OwnerNotFound, got {:?}", result);
                }
                [index] => prop_assert_eq!(result.unwrap(), format!("id-{index}")),
                many => {
                    let ambiguous = matches!(
                        result,
                        Err(TabRotateError::AmbiguousOwner { matches, .. }) if matches == many.len()
                    );
                    prop_assert!(ambiguous, "expected AmbiguousOwner, got {:?}", result);
                }
            }
        }
    }
}
