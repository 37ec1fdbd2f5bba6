//! HTTP API Client
//!
//! Functions for communicating with the invite directory.

use gloo_net::http::Request;

use convite::{AttendeeRecord, NewInvite};

/// Used when no base URL was given at build time
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Directory base URL, read from `CONVITE_API_BASE` at build time
pub fn get_api_base() -> String {
    normalize_base(option_env!("CONVITE_API_BASE").unwrap_or(DEFAULT_API_BASE))
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Register one attendee
pub async fn create_invite(invite: &NewInvite) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/invites/create", api_base))
        .json(invite)
        .map_err(|e| format!("Serialize error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(format!("API error {}: {}", response.status(), text));
    }

    Ok(())
}

/// Fetch every registration
pub async fn fetch_invites() -> Result<Vec<AttendeeRecord>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/invites", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(format!("API error {}: {}", response.status(), text));
    }

    response
        .json::<Vec<AttendeeRecord>>()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:3000/"), "http://localhost:3000");
        assert_eq!(normalize_base(" https://api.example.org//"), "https://api.example.org");
    }
}
