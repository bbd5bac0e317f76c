use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use evhub_core::ids::UserId;
use evhub_core::users::{User, UserRole};

/// Pluggable credential check. `verify` returns the matched identity with
/// the password stripped, or `None` on any mismatch.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str, role: UserRole) -> Option<User>;
}

struct CredentialRecord {
    user: User,
    password: SecretString,
}

/// Hardcoded credential table standing in for a real directory service.
/// Matches are exact and case-sensitive on email, password, and role.
pub struct DirectoryVerifier {
    records: Vec<CredentialRecord>,
    lookup_latency: Duration,
}

impl DirectoryVerifier {
    /// The demo directory: one admin, one student.
    pub fn seeded() -> Self {
        let records = vec![
            CredentialRecord {
                user: User {
                    id: UserId::from_raw("usr_admin"),
                    email: "admin@kec.edu".into(),
                    name: "Dr. Admin Kumar".into(),
                    role: UserRole::Admin,
                    department: Some("Computer Science".into()),
                    year: None,
                    roll_number: None,
                    avatar: Some("/admin-interface.png".into()),
                    created_at: "2024-01-01T00:00:00Z".into(),
                },
                password: SecretString::from("admin123"),
            },
            CredentialRecord {
                user: User {
                    id: UserId::from_raw("usr_student"),
                    email: "student@kec.edu".into(),
                    name: "Rajesh Kumar".into(),
                    role: UserRole::User,
                    department: Some("Computer Science".into()),
                    year: Some("3rd Year".into()),
                    roll_number: Some("21CS001".into()),
                    avatar: Some("/diverse-students-studying.png".into()),
                    created_at: "2024-01-15T00:00:00Z".into(),
                },
                password: SecretString::from("student123"),
            },
        ];
        Self {
            records,
            lookup_latency: Duration::ZERO,
        }
    }

    /// Simulate directory round-trip latency on each lookup.
    pub fn with_lookup_latency(mut self, latency: Duration) -> Self {
        self.lookup_latency = latency;
        self
    }
}

#[async_trait]
impl CredentialVerifier for DirectoryVerifier {
    async fn verify(&self, email: &str, password: &str, role: UserRole) -> Option<User> {
        if !self.lookup_latency.is_zero() {
            tokio::time::sleep(self.lookup_latency).await;
        }

        let matched = self.records.iter().find(|record| {
            record.user.email == email
                && record.user.role == role
                && record.password.expose_secret() == password
        });

        match matched {
            Some(record) => Some(record.user.clone()),
            None => {
                debug!(email, %role, "credential mismatch");
                None
            }
        }
    }
}
