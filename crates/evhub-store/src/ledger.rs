use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use evhub_core::ids::{EventId, RegistrationId, UserId};
use evhub_core::registrations::{Registration, RegistrationStatus};

/// Per-user intent-to-attend records.
///
/// Deliberately not linked to `Event.registrations`: the portal maintains
/// the aggregate counter and this ledger independently, and they can drift.
pub struct RegistrationLedger {
    entries: RwLock<Vec<Registration>>,
}

impl Default for RegistrationLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationLedger {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Record intent to attend. Registering twice for the same event
    /// returns the existing entry unchanged.
    #[instrument(skip(self), fields(user_id = %user_id, event_id = %event_id))]
    pub fn register(&self, user_id: &UserId, event_id: &EventId) -> Registration {
        let mut entries = self.entries.write();
        if let Some(existing) = entries
            .iter()
            .find(|r| &r.user_id == user_id && &r.event_id == event_id)
        {
            debug!("already registered");
            return existing.clone();
        }

        let registration = Registration {
            id: RegistrationId::new(),
            user_id: user_id.clone(),
            event_id: event_id.clone(),
            status: RegistrationStatus::Confirmed,
            registered_at: Utc::now().to_rfc3339(),
        };
        entries.push(registration.clone());
        registration
    }

    /// Mark a registration as attended. Unknown ids are ignored.
    #[instrument(skip(self), fields(registration_id = %id))]
    pub fn mark_completed(&self, id: &RegistrationId) {
        let mut entries = self.entries.write();
        if let Some(entry) = entries.iter_mut().find(|r| &r.id == id) {
            entry.status = RegistrationStatus::Completed;
        }
    }

    pub fn list_for_user(&self, user_id: &UserId) -> Vec<Registration> {
        self.entries
            .read()
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn is_registered(&self, user_id: &UserId, event_id: &EventId) -> bool {
        self.entries
            .read()
            .iter()
            .any(|r| &r.user_id == user_id && &r.event_id == event_id)
    }

    pub fn count_for_user(&self, user_id: &UserId) -> usize {
        self.entries
            .read()
            .iter()
            .filter(|r| &r.user_id == user_id)
            .count()
    }
}
