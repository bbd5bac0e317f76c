//! The durable session slot.
//!
//! One file holds the serialized current identity inside a versioned JSON
//! envelope. Absence means unauthenticated; a corrupt or wrong-version file
//! is treated the same way rather than failing startup.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use evhub_core::users::User;

use crate::error::StoreError;

/// Current envelope schema version.
pub const SLOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SlotEnvelope {
    version: u32,
    user: User,
    saved_at: String,
}

pub struct SessionSlot {
    path: PathBuf,
}

impl SessionSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored identity, if any.
    pub fn load(&self) -> Option<User> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), "failed to read session slot: {e}");
                return None;
            }
        };

        match serde_json::from_str::<SlotEnvelope>(&data) {
            Ok(envelope) if envelope.version == SLOT_VERSION => Some(envelope.user),
            Ok(envelope) => {
                warn!(version = envelope.version, "unsupported session slot version");
                None
            }
            Err(e) => {
                warn!(path = %self.path.display(), "failed to parse session slot: {e}");
                None
            }
        }
    }

    /// Persist the identity. Creates parent directories if needed and sets
    /// the file to 0o600.
    pub fn save(&self, user: &User) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let envelope = SlotEnvelope {
            version: SLOT_VERSION,
            user: user.clone(),
            saved_at: Utc::now().to_rfc3339(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        std::fs::write(&self.path, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&self.path, perms);
        }

        Ok(())
    }

    /// Remove the stored identity. Idempotent.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
