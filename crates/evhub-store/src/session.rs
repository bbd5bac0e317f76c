use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, instrument, warn};

use evhub_auth::CredentialVerifier;
use evhub_core::users::{User, UserRole};

use crate::slot::SessionSlot;

/// Holds at most one authenticated identity.
///
/// `is_authenticated() ⇔ current_user().is_some()` by construction; there is
/// no separate flag to fall out of sync.
pub struct SessionStore {
    current: RwLock<Option<User>>,
    slot: SessionSlot,
    verifier: Arc<dyn CredentialVerifier>,
}

impl SessionStore {
    /// Rehydrate from the durable slot if present, else start
    /// unauthenticated.
    pub fn open(slot: SessionSlot, verifier: Arc<dyn CredentialVerifier>) -> Self {
        let current = slot.load();
        if let Some(user) = &current {
            info!(user_id = %user.id, "session rehydrated from slot");
        }
        Self {
            current: RwLock::new(current),
            slot,
            verifier,
        }
    }

    /// Attempt login. On success the identity is persisted to the slot and
    /// the session swaps to it atomically; on any failure the session is
    /// left untouched.
    #[instrument(skip(self, password), fields(%role))]
    pub async fn login(&self, email: &str, password: &str, role: UserRole) -> bool {
        let Some(user) = self.verifier.verify(email, password, role).await else {
            return false;
        };

        // Persist first so a reload after a successful login always
        // rehydrates; a failed write is reported as a failed login.
        if let Err(e) = self.slot.save(&user) {
            warn!(user_id = %user.id, "failed to persist session: {e}");
            return false;
        }

        info!(user_id = %user.id, "login succeeded");
        *self.current.write() = Some(user);
        true
    }

    /// Clear the session unconditionally. Idempotent.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        *self.current.write() = None;
        if let Err(e) = self.slot.clear() {
            warn!("failed to clear session slot: {e}");
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }
}
