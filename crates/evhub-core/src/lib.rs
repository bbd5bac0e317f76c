pub mod events;
pub mod ids;
pub mod registrations;
pub mod users;

pub use events::{Event, EventCategory, EventStatus};
pub use ids::{EventId, RegistrationId, UserId};
pub use registrations::{Registration, RegistrationStatus};
pub use users::{User, UserRole};
