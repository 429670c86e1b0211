//! Shared session identity.
//!
//! A process-scoped handle passed to every page that needs to know who is
//! viewing. Clones share the same underlying state.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::domain::session::SessionUser;

#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<SessionUser>>>,
}

impl SessionContext {
    pub fn new(user: Option<SessionUser>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(user)),
        }
    }

    /// Snapshot of the current visitor, `None` when logged out.
    pub fn current(&self) -> Option<SessionUser> {
        self.inner.read().clone()
    }

    /// Whether the visitor's identity equals `user_uuid`.
    pub fn is_viewer(&self, user_uuid: &str) -> bool {
        self.inner
            .read()
            .as_ref()
            .is_some_and(|user| user.user_uuid == user_uuid)
    }

    /// Apply `f` to the visitor if their identity is `user_uuid`.
    pub fn update_viewer(&self, user_uuid: &str, f: impl FnOnce(&mut SessionUser)) -> bool {
        let mut guard = self.inner.write();
        match guard.as_mut() {
            Some(user) if user.user_uuid == user_uuid => {
                f(user);
                true
            }
            _ => false,
        }
    }

    /// Drop the session identity (logged out / no active account).
    pub fn clear(&self) {
        if self.inner.write().take().is_some() {
            tracing::info!("Session identity cleared");
        }
    }
}
