/// Fjall-based persistence layer for programmers and users
///
/// This is the repository the HTTP handlers talk to. It uses Fjall (an
/// embedded LSM key-value store) to persist:
///
/// - Programmer records, keyed by nickname
/// - User records, keyed by username
/// - Metadata (the surrogate-id sequence position)
///
/// ## Usage
///
/// ```rust,ignore
/// use codebattle::store::Repository;
///
/// let store = Repository::open("data/store")?;
/// store.save_programmer(&mut programmer)?;
/// let found = store.find_one_by_nickname("weaverryan")?;
/// ```
pub mod error;
pub mod keys;
pub mod models;
pub mod repository;

pub use error::{Result, StoreError};
pub use models::{Programmer, User};
pub use repository::Repository;
