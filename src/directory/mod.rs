//! Invite Directory
//!
//! The remote service that stores registrations. Two calls are used:
//! - `POST {base}/invites/create` to register an attendee
//! - `GET {base}/invites` to fetch every registration
//!
//! Nothing is cached or retried; each page load fetches the full list once.

mod client;

pub use client::HttpDirectory;

use async_trait::async_trait;
use thiserror::Error;

use crate::attendee::{AttendeeRecord, AttendeeStore, NewInvite};
use crate::registration::{RegistrationForm, ValidationError, SUBMIT_FAILED_MESSAGE};

/// Common trait for invite directories
#[async_trait]
pub trait Directory: Send + Sync {
    /// Register one attendee
    async fn create_invite(&self, invite: &NewInvite) -> Result<(), DirectoryError>;

    /// Fetch every registration, in the order the directory returns them
    async fn list_invites(&self) -> Result<Vec<AttendeeRecord>, DirectoryError>;
}

/// Errors that can occur when talking to the directory
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Invite directory unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Why a registration did not go through
#[derive(Error, Debug)]
pub enum RegisterError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Load the session snapshot
///
/// A failed fetch is logged and yields an empty store, so the dashboard
/// shows zero-state statistics instead of an error.
pub async fn load_store(directory: &dyn Directory) -> AttendeeStore {
    match directory.list_invites().await {
        Ok(records) => {
            tracing::info!(count = records.len(), "Loaded participants");
            AttendeeStore::from(records)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch participants");
            AttendeeStore::default()
        }
    }
}

/// Validate `form` and send it to the directory
///
/// On success the form is left `Confirmed`; on a directory failure it is
/// `Failed` with its fields untouched. A form already submitting is ignored.
pub async fn register(
    directory: &dyn Directory,
    form: &mut RegistrationForm,
) -> Result<(), RegisterError> {
    let invite = match form.begin_submit()? {
        Some(invite) => invite,
        None => {
            tracing::debug!("Registration already in flight");
            return Ok(());
        }
    };

    match directory.create_invite(&invite).await {
        Ok(()) => {
            tracing::info!(location = %invite.location, "Registered participant");
            form.confirm();
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to register participant");
            form.fail(SUBMIT_FAILED_MESSAGE);
            Err(e.into())
        }
    }
}
