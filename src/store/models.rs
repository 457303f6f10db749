use serde::{Deserialize, Serialize};

/// Persisted programmer record.
///
/// `id` is `None` until the first save assigns one; handlers use that to tell
/// a freshly-built entity from one loaded out of the store. `nickname` doubles
/// as the storage key, so it never changes after creation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Programmer {
    pub id: Option<i64>,
    pub nickname: String,
    pub avatar_number: i64,
    pub tag_line: Option<String>,
    pub power_level: i64,
    pub user_id: i64,
}

impl Programmer {
    /// Power level every programmer starts out with. Only server-side
    /// mechanics may change it afterwards; it is never client-settable.
    pub const STARTING_POWER_LEVEL: i64 = 5;

    pub fn new(nickname: String, user_id: i64) -> Self {
        Self {
            id: None,
            nickname,
            avatar_number: 0,
            tag_line: None,
            power_level: Self::STARTING_POWER_LEVEL,
            user_id,
        }
    }
}

/// Owning account for programmers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_programmer_has_no_id() {
        let programmer = Programmer::new("unit_tester".to_string(), 1);
        assert!(programmer.id.is_none());
        assert_eq!(programmer.power_level, Programmer::STARTING_POWER_LEVEL);
        assert_eq!(programmer.user_id, 1);
    }
}
