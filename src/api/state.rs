use std::sync::Arc;

use crate::config::Config;
use crate::observability::Metrics;
use crate::store::{Repository, User};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<Repository>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, store: Repository) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            metrics: Arc::new(Metrics::new()),
        }
    }
}

/// The authenticated account a request acts on behalf of.
///
/// Resolved once at startup from `[principal]` in the configuration and
/// injected into handlers as an `Extension`, so ownership assignment is an
/// explicit handler input rather than a hidden global lookup.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}
