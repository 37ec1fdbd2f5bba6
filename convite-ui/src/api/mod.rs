//! Invite directory access from the browser

mod client;

pub use client::{create_invite, fetch_invites, get_api_base};
