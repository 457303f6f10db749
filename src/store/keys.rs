/// Key layout for the Fjall partitions
///
/// Partition structure:
/// - `programmers`: programmer:{nickname} -> Programmer (JSON)
/// - `users`: user:{username} -> User (JSON)
/// - `metadata`: meta:{key} -> value (string)

/// Encode a programmer key: programmer:{nickname}
pub fn encode_programmer_key(nickname: &str) -> Vec<u8> {
    format!("programmer:{}", nickname).into_bytes()
}

/// Decode a programmer key: programmer:{nickname} -> nickname
pub fn decode_programmer_key(key: &[u8]) -> Option<String> {
    let key_str = std::str::from_utf8(key).ok()?;
    key_str.strip_prefix("programmer:").map(String::from)
}

/// Encode a user key: user:{username}
pub fn encode_user_key(username: &str) -> Vec<u8> {
    format!("user:{}", username).into_bytes()
}

/// Encode a metadata key: meta:{key}
pub fn encode_meta_key(key: &str) -> Vec<u8> {
    format!("meta:{}", key).into_bytes()
}

/// Metadata key holding the next unallocated surrogate id
pub const NEXT_ID_META_KEY: &str = "next_id";
