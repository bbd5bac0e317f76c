pub mod error;
pub mod events;
pub mod ledger;
pub mod session;
pub mod slot;
pub mod stats;

pub use error::StoreError;
pub use events::{EventPatch, EventQuery, EventStore, NewEvent};
pub use ledger::RegistrationLedger;
pub use session::SessionStore;
pub use slot::SessionSlot;
pub use stats::{AdminStats, UserStats};
