use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use evhub_core::events::{Event, EventCategory, EventStatus};
use evhub_core::ids::EventId;

/// Fields the caller supplies when creating an event. Id, registration
/// counter, and timestamps are assigned by the store.
#[derive(Clone, Debug)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub date: String,
    pub time: String,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub location: String,
    pub category: EventCategory,
    pub organizer: String,
    pub max_registrations: u32,
    pub status: EventStatus,
    pub is_featured: bool,
    pub image: Option<String>,
    pub requirements: Vec<String>,
    pub prizes: Vec<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub registration_deadline: Option<String>,
}

/// Partial update. `None` fields are left as they are; optional event
/// fields cannot be cleared through a patch, matching the edit form.
#[derive(Clone, Debug, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub organizer: Option<String>,
    pub max_registrations: Option<u32>,
    pub registrations: Option<u32>,
    pub status: Option<EventStatus>,
    pub is_featured: Option<bool>,
    pub image: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub prizes: Option<Vec<String>>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub registration_deadline: Option<String>,
}

/// Combinable query over the collection. All present clauses must match.
#[derive(Clone, Debug, Default)]
pub struct EventQuery {
    /// Case-insensitive substring over title, description, and organizer.
    pub text: Option<String>,
    pub status: Option<EventStatus>,
    pub category: Option<EventCategory>,
}

/// The ordered event collection. Owns the list exclusively; accessors hand
/// out snapshots, never references into the store.
pub struct EventStore {
    events: RwLock<Vec<Event>>,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    /// Create an event: fresh id, zero registrations, timestamps stamped to
    /// now, appended at the end so insertion order is the display order.
    #[instrument(skip(self, new), fields(title = %new.title))]
    pub fn add(&self, new: NewEvent) -> Event {
        let now = Utc::now().to_rfc3339();
        let event = Event {
            id: EventId::new(),
            title: new.title,
            description: new.description,
            long_description: new.long_description,
            date: new.date,
            time: new.time,
            end_date: new.end_date,
            end_time: new.end_time,
            location: new.location,
            category: new.category,
            organizer: new.organizer,
            max_registrations: new.max_registrations,
            registrations: 0,
            status: new.status,
            is_featured: new.is_featured,
            image: new.image,
            requirements: new.requirements,
            prizes: new.prizes,
            contact_email: new.contact_email,
            contact_phone: new.contact_phone,
            registration_deadline: new.registration_deadline,
            created_at: now.clone(),
            updated_at: now,
        };
        self.events.write().push(event.clone());
        event
    }

    /// Merge a partial update into the matching record and stamp
    /// `updated_at`. Unknown ids are ignored.
    #[instrument(skip(self, patch), fields(event_id = %id))]
    pub fn update(&self, id: &EventId, patch: EventPatch) {
        let mut events = self.events.write();
        let Some(event) = events.iter_mut().find(|e| &e.id == id) else {
            debug!("update for unknown event ignored");
            return;
        };

        macro_rules! apply {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(value) = patch.$field {
                    event.$field = value;
                })+
            };
        }
        apply!(
            title,
            description,
            date,
            time,
            location,
            category,
            organizer,
            max_registrations,
            registrations,
            status,
            is_featured,
            requirements,
            prizes,
            contact_email,
        );
        if patch.long_description.is_some() {
            event.long_description = patch.long_description;
        }
        if patch.end_date.is_some() {
            event.end_date = patch.end_date;
        }
        if patch.end_time.is_some() {
            event.end_time = patch.end_time;
        }
        if patch.image.is_some() {
            event.image = patch.image;
        }
        if patch.contact_phone.is_some() {
            event.contact_phone = patch.contact_phone;
        }
        if patch.registration_deadline.is_some() {
            event.registration_deadline = patch.registration_deadline;
        }

        event.updated_at = Utc::now().to_rfc3339();
    }

    /// Remove the matching record. Unknown ids are ignored.
    #[instrument(skip(self), fields(event_id = %id))]
    pub fn delete(&self, id: &EventId) {
        self.events.write().retain(|e| &e.id != id);
    }

    pub fn get(&self, id: &EventId) -> Option<Event> {
        self.events.read().iter().find(|e| &e.id == id).cloned()
    }

    pub fn all(&self) -> Vec<Event> {
        self.events.read().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Non-mutating projection, order preserved.
    pub fn by_status(&self, status: EventStatus) -> Vec<Event> {
        self.events
            .read()
            .iter()
            .filter(|e| e.status == status)
            .cloned()
            .collect()
    }

    /// Non-mutating projection, order preserved.
    pub fn by_category(&self, category: EventCategory) -> Vec<Event> {
        self.events
            .read()
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect()
    }

    /// The admin list-page query: free text AND status AND category.
    pub fn search(&self, query: &EventQuery) -> Vec<Event> {
        let needle = query.text.as_ref().map(|t| t.to_lowercase());
        self.events
            .read()
            .iter()
            .filter(|e| {
                let matches_text = match &needle {
                    Some(needle) => {
                        e.title.to_lowercase().contains(needle)
                            || e.description.to_lowercase().contains(needle)
                            || e.organizer.to_lowercase().contains(needle)
                    }
                    None => true,
                };
                matches_text
                    && query.status.is_none_or(|s| e.status == s)
                    && query.category.is_none_or(|c| e.category == c)
            })
            .cloned()
            .collect()
    }

    /// Load the three demo events the portal ships with.
    pub fn seed_demo(&self) {
        let mut events = self.events.write();
        events.push(Event {
            id: EventId::new(),
            title: "Tech Symposium 2024".into(),
            description:
                "Annual technical symposium featuring latest trends in technology, AI, and innovation."
                    .into(),
            long_description: Some(
                "Join us for the most anticipated technical event of the year! This symposium \
                 will feature keynote speakers from leading tech companies, hands-on workshops, \
                 and networking opportunities with industry professionals."
                    .into(),
            ),
            date: "2024-01-15".into(),
            time: "09:00".into(),
            end_date: Some("2024-01-15".into()),
            end_time: Some("17:00".into()),
            location: "Main Auditorium".into(),
            category: EventCategory::Technical,
            organizer: "Computer Science Department".into(),
            max_registrations: 200,
            registrations: 156,
            status: EventStatus::Published,
            is_featured: true,
            image: None,
            requirements: vec!["Laptop required".into(), "Basic programming knowledge".into()],
            prizes: vec![
                "₹50,000 for winner".into(),
                "₹25,000 for runner-up".into(),
                "Certificates for all participants".into(),
            ],
            contact_email: "techsymposium@kec.edu".into(),
            contact_phone: Some("+91 9876543210".into()),
            registration_deadline: Some("2024-01-10".into()),
            created_at: "2024-01-01T10:00:00Z".into(),
            updated_at: "2024-01-05T15:30:00Z".into(),
        });
        events.push(Event {
            id: EventId::new(),
            title: "Cultural Fest - Kaleidoscope".into(),
            description: "Celebrate diversity through music, dance, drama, and art competitions."
                .into(),
            long_description: Some(
                "Experience the vibrant cultural heritage of our college through this spectacular \
                 fest featuring competitions in music, dance, drama, art, and literature."
                    .into(),
            ),
            date: "2024-01-20".into(),
            time: "14:00".into(),
            end_date: Some("2024-01-22".into()),
            end_time: Some("22:00".into()),
            location: "Open Ground".into(),
            category: EventCategory::Cultural,
            organizer: "Cultural Committee".into(),
            max_registrations: 300,
            registrations: 234,
            status: EventStatus::Published,
            is_featured: false,
            image: None,
            requirements: vec![
                "Costume required for performances".into(),
                "Registration per event".into(),
            ],
            prizes: vec![
                "Trophy and cash prizes for winners".into(),
                "Participation certificates".into(),
            ],
            contact_email: "cultural@kec.edu".into(),
            contact_phone: None,
            registration_deadline: Some("2024-01-15".into()),
            created_at: "2024-01-02T09:00:00Z".into(),
            updated_at: "2024-01-06T11:20:00Z".into(),
        });
        events.push(Event {
            id: EventId::new(),
            title: "Workshop on Machine Learning".into(),
            description: "Hands-on workshop covering fundamentals of ML and practical applications."
                .into(),
            long_description: None,
            date: "2024-01-18".into(),
            time: "10:00".into(),
            end_date: Some("2024-01-18".into()),
            end_time: Some("16:00".into()),
            location: "CS Lab 1".into(),
            category: EventCategory::Workshop,
            organizer: "AI/ML Club".into(),
            max_registrations: 50,
            registrations: 45,
            status: EventStatus::Published,
            is_featured: false,
            image: None,
            requirements: vec![
                "Laptop with Python installed".into(),
                "Basic programming knowledge".into(),
            ],
            prizes: vec![],
            contact_email: "aimlclub@kec.edu".into(),
            contact_phone: None,
            registration_deadline: Some("2024-01-16".into()),
            created_at: "2024-01-03T14:00:00Z".into(),
            updated_at: "2024-01-07T09:15:00Z".into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, category: EventCategory) -> NewEvent {
        NewEvent {
            title: title.into(),
            description: format!("{title} description"),
            long_description: None,
            date: "2024-02-01".into(),
            time: "10:00".into(),
            end_date: None,
            end_time: None,
            location: "Main Auditorium".into(),
            category,
            organizer: "Student Council".into(),
            max_registrations: 100,
            status: EventStatus::Draft,
            is_featured: false,
            image: None,
            requirements: vec![],
            prizes: vec![],
            contact_email: "council@kec.edu".into(),
            contact_phone: None,
            registration_deadline: None,
        }
    }

    #[test]
    fn add_assigns_id_counter_and_timestamps() {
        let store = EventStore::new();
        let event = store.add(draft("Hackathon 2024", EventCategory::Technical));

        assert!(event.id.as_str().starts_with("evt_"));
        assert_eq!(event.registrations, 0);
        assert_eq!(event.created_at, event.updated_at);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let store = EventStore::new();
        store.add(draft("A", EventCategory::Technical));
        store.add(draft("B", EventCategory::Cultural));
        store.add(draft("C", EventCategory::Sports));

        let titles: Vec<_> = store.all().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    fn add_then_delete_is_identity_on_the_rest() {
        let store = EventStore::new();
        store.add(draft("A", EventCategory::Technical));
        store.add(draft("B", EventCategory::Cultural));
        let before = store.all();

        let added = store.add(draft("C", EventCategory::Sports));
        store.delete(&added.id);

        assert_eq!(store.all(), before);
    }

    #[test]
    fn update_touches_only_named_fields_and_updated_at() {
        let store = EventStore::new();
        let target = store.add(draft("A", EventCategory::Technical));
        let other = store.add(draft("B", EventCategory::Cultural));

        store.update(
            &target.id,
            EventPatch {
                title: Some("X".into()),
                ..Default::default()
            },
        );

        let updated = store.get(&target.id).unwrap();
        assert_eq!(updated.title, "X");
        assert_eq!(updated.description, target.description);
        assert_eq!(updated.status, target.status);
        assert_eq!(updated.created_at, target.created_at);

        // Other records untouched.
        assert_eq!(store.get(&other.id).unwrap(), other);
    }

    #[test]
    fn update_unknown_id_is_a_silent_noop() {
        let store = EventStore::new();
        store.add(draft("A", EventCategory::Technical));
        let before = store.all();

        store.update(
            &EventId::from_raw("evt_missing"),
            EventPatch {
                title: Some("X".into()),
                ..Default::default()
            },
        );
        assert_eq!(store.all(), before);
    }

    #[test]
    fn delete_unknown_id_is_a_silent_noop() {
        let store = EventStore::new();
        store.add(draft("A", EventCategory::Technical));
        store.delete(&EventId::from_raw("evt_missing"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn status_can_jump_anywhere() {
        // The lifecycle is advisory; no transition is rejected.
        let store = EventStore::new();
        let event = store.add(draft("A", EventCategory::Technical));

        for status in [
            EventStatus::Completed,
            EventStatus::Draft,
            EventStatus::Cancelled,
            EventStatus::Published,
        ] {
            store.update(
                &event.id,
                EventPatch {
                    status: Some(status),
                    ..Default::default()
                },
            );
            assert_eq!(store.get(&event.id).unwrap().status, status);
        }
    }

    #[test]
    fn by_status_returns_matches_in_order() {
        let store = EventStore::new();
        let a = store.add(draft("A", EventCategory::Technical));
        store.add(draft("B", EventCategory::Cultural));
        let c = store.add(draft("C", EventCategory::Sports));
        for id in [&a.id, &c.id] {
            store.update(
                id,
                EventPatch {
                    status: Some(EventStatus::Published),
                    ..Default::default()
                },
            );
        }

        let published = store.by_status(EventStatus::Published);
        let titles: Vec<_> = published.into_iter().map(|e| e.title).collect();
        assert_eq!(titles, ["A", "C"]);
        assert_eq!(store.by_status(EventStatus::Draft).len(), 1);
    }

    #[test]
    fn by_category_filters() {
        let store = EventStore::new();
        store.add(draft("A", EventCategory::Technical));
        store.add(draft("B", EventCategory::Technical));
        store.add(draft("C", EventCategory::Sports));

        assert_eq!(store.by_category(EventCategory::Technical).len(), 2);
        assert_eq!(store.by_category(EventCategory::Cultural).len(), 0);
    }

    #[test]
    fn search_is_case_insensitive_over_three_fields() {
        let store = EventStore::new();
        store.seed_demo();

        let by_title = store.search(&EventQuery {
            text: Some("SYMPOSIUM".into()),
            ..Default::default()
        });
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Tech Symposium 2024");

        let by_organizer = store.search(&EventQuery {
            text: Some("ai/ml".into()),
            ..Default::default()
        });
        assert_eq!(by_organizer.len(), 1);

        let by_description = store.search(&EventQuery {
            text: Some("diversity".into()),
            ..Default::default()
        });
        assert_eq!(by_description.len(), 1);
    }

    #[test]
    fn search_clauses_combine_with_and() {
        let store = EventStore::new();
        store.seed_demo();
        store.add(draft("Tech Quiz", EventCategory::Technical));

        let hits = store.search(&EventQuery {
            text: Some("tech".into()),
            status: Some(EventStatus::Published),
            category: Some(EventCategory::Technical),
        });
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Tech Symposium 2024");

        // Empty query matches everything.
        assert_eq!(store.search(&EventQuery::default()).len(), 4);
    }

    #[test]
    fn seed_demo_matches_the_portal_fixtures() {
        let store = EventStore::new();
        store.seed_demo();

        let all = store.all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].registrations, 156);
        assert!(all[0].is_featured);
        assert_eq!(all[2].max_registrations, 50);
        assert!(!all[2].is_full());
    }
}
