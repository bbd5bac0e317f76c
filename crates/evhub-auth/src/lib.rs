//! Credential verification for the event hub.
//!
//! The session store only knows about the [`CredentialVerifier`] capability;
//! [`DirectoryVerifier`] is the demo implementation backed by a hardcoded
//! table. Swapping in a real directory service does not change the session
//! lifecycle contract.

pub mod verifier;

pub use verifier::{CredentialVerifier, DirectoryVerifier};
