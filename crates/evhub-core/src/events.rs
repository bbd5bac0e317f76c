use serde::{Deserialize, Serialize};

use crate::ids::EventId;

/// Lifecycle status of an event. Any status may be set to any other via
/// an update; legal-transition enforcement is deliberately absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Completed,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown event status: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Technical,
    Cultural,
    Sports,
    Workshop,
    Seminar,
    Competition,
    Other,
}

impl EventCategory {
    /// All categories, in the order the admin form offers them.
    pub const ALL: [EventCategory; 7] = [
        Self::Technical,
        Self::Cultural,
        Self::Sports,
        Self::Workshop,
        Self::Seminar,
        Self::Competition,
        Self::Other,
    ];
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Technical => write!(f, "technical"),
            Self::Cultural => write!(f, "cultural"),
            Self::Sports => write!(f, "sports"),
            Self::Workshop => write!(f, "workshop"),
            Self::Seminar => write!(f, "seminar"),
            Self::Competition => write!(f, "competition"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for EventCategory {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "technical" => Ok(Self::Technical),
            "cultural" => Ok(Self::Cultural),
            "sports" => Ok(Self::Sports),
            "workshop" => Ok(Self::Workshop),
            "seminar" => Ok(Self::Seminar),
            "competition" => Ok(Self::Competition),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown event category: {other}")),
        }
    }
}

/// A schedulable activity record with capacity and lifecycle status.
///
/// `registrations` is a plain counter. It is tracked independently of the
/// registration ledger and is not clamped to `max_registrations`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    pub date: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub location: String,
    pub category: EventCategory,
    pub organizer: String,
    pub max_registrations: u32,
    pub registrations: u32,
    pub status: EventStatus,
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prizes: Vec<String>,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Event {
    /// Full at exactly 100% of capacity, not before.
    pub fn is_full(&self) -> bool {
        self.registrations >= self.max_registrations
    }

    pub fn spots_left(&self) -> u32 {
        self.max_registrations.saturating_sub(self.registrations)
    }

    /// Fill percentage for progress displays. May exceed 100 when the
    /// counter has drifted past capacity.
    pub fn fill_percent(&self) -> f64 {
        if self.max_registrations == 0 {
            return 100.0;
        }
        f64::from(self.registrations) / f64::from(self.max_registrations) * 100.0
    }
}
