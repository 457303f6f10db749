use std::path::Path;
use std::sync::{Arc, Mutex};

use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle};
use tracing::{debug, info};

use super::error::Result;
use super::keys::{
    encode_meta_key, encode_programmer_key, encode_user_key, NEXT_ID_META_KEY,
};
use super::models::{Programmer, User};

/// Fjall-backed storage for programmers and their owning users.
///
/// Surrogate ids for both entities come from a single monotonic sequence.
/// The next value is cached behind a mutex and written back to the
/// `metadata` partition inside the same critical section, so a restart can
/// never observe a stale sequence position and hand out a reused id.
#[derive(Clone)]
pub struct Repository {
    keyspace: Keyspace,
    programmers: PartitionHandle,
    users: PartitionHandle,
    metadata: PartitionHandle,
    next_id: Arc<Mutex<i64>>,
}

impl Repository {
    /// Open or create a repository at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening programmer store at: {}", path.display());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let keyspace = Config::new(path).open()?;

        let programmers =
            keyspace.open_partition("programmers", PartitionCreateOptions::default())?;
        let users = keyspace.open_partition("users", PartitionCreateOptions::default())?;
        let metadata =
            keyspace.open_partition("metadata", PartitionCreateOptions::default())?;

        let next_id = match metadata.get(encode_meta_key(NEXT_ID_META_KEY))? {
            Some(value) => String::from_utf8_lossy(&value).parse().unwrap_or(1),
            None => 1,
        };

        info!(next_id, "Programmer store opened");
        Ok(Self {
            keyspace,
            programmers,
            users,
            metadata,
            next_id: Arc::new(Mutex::new(next_id)),
        })
    }

    /// Allocate the next surrogate id and persist the sequence position
    fn allocate_id(&self) -> Result<i64> {
        let mut next_id = self.next_id.lock().expect("id sequence lock poisoned");
        let id = *next_id;
        *next_id += 1;
        self.metadata.insert(
            encode_meta_key(NEXT_ID_META_KEY),
            next_id.to_string().as_bytes(),
        )?;
        Ok(id)
    }

    /// Save a programmer, assigning an id on first save
    pub fn save_programmer(&self, programmer: &mut Programmer) -> Result<()> {
        if programmer.id.is_none() {
            programmer.id = Some(self.allocate_id()?);
        }
        let key = encode_programmer_key(&programmer.nickname);
        let value = serde_json::to_vec(programmer)?;
        self.programmers.insert(key, value)?;
        debug!(nickname = %programmer.nickname, "Saved programmer");
        Ok(())
    }

    /// Look up a programmer by nickname
    pub fn find_one_by_nickname(&self, nickname: &str) -> Result<Option<Programmer>> {
        let key = encode_programmer_key(nickname);
        match self.programmers.get(key)? {
            Some(value) => {
                let programmer = serde_json::from_slice(&value)?;
                Ok(Some(programmer))
            }
            None => Ok(None),
        }
    }

    /// All programmers in nickname order (the partition key order)
    pub fn find_all(&self) -> Result<Vec<Programmer>> {
        let mut programmers = Vec::new();
        for item in self.programmers.iter() {
            let (_key, value) = item?;
            programmers.push(serde_json::from_slice(&value)?);
        }
        Ok(programmers)
    }

    /// Delete a programmer by nickname; returns whether it existed
    pub fn delete_programmer(&self, nickname: &str) -> Result<bool> {
        let key = encode_programmer_key(nickname);
        let existed = self.programmers.get(&key)?.is_some();
        if existed {
            self.programmers.remove(key)?;
            debug!(nickname, "Deleted programmer");
        }
        Ok(existed)
    }

    /// Look up a user by username, creating it on first reference
    pub fn find_or_create_user(&self, username: &str) -> Result<User> {
        let key = encode_user_key(username);
        if let Some(value) = self.users.get(&key)? {
            return Ok(serde_json::from_slice(&value)?);
        }

        let user = User {
            id: self.allocate_id()?,
            username: username.to_string(),
        };
        self.users.insert(key, serde_json::to_vec(&user)?)?;
        info!(username, id = user.id, "Created user");
        Ok(user)
    }

    /// Persist all pending writes to disk
    pub fn persist(&self) -> Result<()> {
        self.keyspace.persist(fjall::PersistMode::SyncAll)?;
        Ok(())
    }
}
