//! Dashboard summaries computed from store snapshots on demand.

use serde::Serialize;

use evhub_core::events::EventStatus;
use evhub_core::ids::UserId;
use evhub_core::registrations::RegistrationStatus;

use crate::events::EventStore;
use crate::ledger::RegistrationLedger;

/// The admin dashboard cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total_events: usize,
    pub draft: usize,
    pub published: usize,
    pub cancelled: usize,
    pub completed: usize,
    pub total_registrations: u64,
    pub total_capacity: u64,
}

impl AdminStats {
    pub fn collect(events: &EventStore) -> Self {
        let mut stats = Self::default();
        for event in events.all() {
            stats.total_events += 1;
            match event.status {
                EventStatus::Draft => stats.draft += 1,
                EventStatus::Published => stats.published += 1,
                EventStatus::Cancelled => stats.cancelled += 1,
                EventStatus::Completed => stats.completed += 1,
            }
            stats.total_registrations += u64::from(event.registrations);
            stats.total_capacity += u64::from(event.max_registrations);
        }
        stats
    }
}

/// The student dashboard cards. Counts come from the ledger, so they may
/// disagree with the aggregate counters on the events themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub events_registered: usize,
    pub events_attended: usize,
    pub upcoming_events: usize,
}

impl UserStats {
    pub fn collect(ledger: &RegistrationLedger, events: &EventStore, user_id: &UserId) -> Self {
        let mut stats = Self::default();
        for registration in ledger.list_for_user(user_id) {
            stats.events_registered += 1;
            match registration.status {
                RegistrationStatus::Completed => stats.events_attended += 1,
                RegistrationStatus::Confirmed => {
                    // Upcoming only while the event is still published.
                    let published = events
                        .get(&registration.event_id)
                        .is_some_and(|e| e.status == EventStatus::Published);
                    if published {
                        stats.upcoming_events += 1;
                    }
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventPatch;

    #[test]
    fn admin_stats_over_seed_data() {
        let events = EventStore::new();
        events.seed_demo();

        let stats = AdminStats::collect(&events);
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.published, 3);
        assert_eq!(stats.draft, 0);
        assert_eq!(stats.total_registrations, 156 + 234 + 45);
        assert_eq!(stats.total_capacity, 200 + 300 + 50);
    }

    #[test]
    fn user_stats_track_the_ledger() {
        let events = EventStore::new();
        events.seed_demo();
        let all = events.all();
        let ledger = RegistrationLedger::new();
        let user = UserId::from_raw("usr_student");

        let attended = ledger.register(&user, &all[0].id);
        ledger.mark_completed(&attended.id);
        ledger.register(&user, &all[1].id);
        ledger.register(&user, &all[2].id);

        // Cancel one of the upcoming events.
        events.update(
            &all[2].id,
            EventPatch {
                status: Some(evhub_core::events::EventStatus::Cancelled),
                ..Default::default()
            },
        );

        let stats = UserStats::collect(&ledger, &events, &user);
        assert_eq!(stats.events_registered, 3);
        assert_eq!(stats.events_attended, 1);
        assert_eq!(stats.upcoming_events, 1);
    }

    #[test]
    fn stats_for_unknown_user_are_zero() {
        let events = EventStore::new();
        let ledger = RegistrationLedger::new();
        let stats = UserStats::collect(&ledger, &events, &UserId::from_raw("usr_nobody"));
        assert_eq!(stats, UserStats::default());
    }
}
