use std::collections::BTreeMap;

use crate::store::Programmer;

const MAX_NICKNAME_CHARS: usize = 100;
const AVATAR_RANGE: std::ops::RangeInclusive<i64> = 1..=6;

/// Validate a programmer entity, returning one message per offending field.
///
/// Validation runs against the entity rather than the raw request so that
/// partial updates are checked in their merged state. An empty map means the
/// entity is valid.
pub fn validate_programmer(programmer: &Programmer) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    if programmer.nickname.trim().is_empty() {
        errors.insert(
            "nickname".to_string(),
            "Please enter a clever nickname".to_string(),
        );
    } else if programmer.nickname.chars().count() > MAX_NICKNAME_CHARS {
        errors.insert(
            "nickname".to_string(),
            format!("Nickname cannot be longer than {} characters", MAX_NICKNAME_CHARS),
        );
    } else if !is_valid_nickname(&programmer.nickname) {
        errors.insert(
            "nickname".to_string(),
            "Nickname may only contain letters, numbers, underscores and dashes"
                .to_string(),
        );
    }

    if !AVATAR_RANGE.contains(&programmer.avatar_number) {
        errors.insert(
            "avatarNumber".to_string(),
            format!(
                "Choose an avatar between {} and {}",
                AVATAR_RANGE.start(),
                AVATAR_RANGE.end()
            ),
        );
    }

    errors
}

/// The nickname doubles as a URL path segment and a storage key, so it is
/// restricted to characters that need no escaping in either place.
fn is_valid_nickname(nickname: &str) -> bool {
    nickname
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
