//! Attendee data types
//!
//! This module defines the records exchanged with the invite directory:
//! - `AttendeeRecord`: one confirmed registration
//! - `NewInvite`: the body of a registration request
//! - `AttendeeStore`: the snapshot of records loaded for one session

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder rendered wherever a record has no business
pub const EMPTY_FIELD: &str = "-";

/// Maximum number of digits accepted in a contact number
pub const CONTACT_MAX_DIGITS: usize = 9;

/// Neighborhoods offered as location suggestions by the registration form
pub const NEIGHBORHOODS: &[&str] = &[
    "Central",
    "Muahivire",
    "Muatala",
    "Muhala",
    "Mutauanha",
    "Namicopo",
    "Namutequeliua",
    "Napipine",
    "Natikiri",
    "Carrupeia",
];

/// Business types offered as suggestions by the registration form
pub const BUSINESS_TYPES: &[&str] = &[
    "Agricultura",
    "Comércio",
    "Restauração",
    "Serviços",
    "Transporte",
    "Outro",
];

/// A confirmed registration, as returned by the invite directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendeeRecord {
    /// Opaque identifier assigned by the directory
    pub id: String,
    pub name: String,
    pub location: String,
    /// Phone number as typed, digits only
    pub contact: String,
    /// Business name or type; `None` when left blank
    #[serde(default, deserialize_with = "blank_as_none")]
    pub business: Option<String>,
    /// ISO-8601 creation timestamp assigned server-side
    pub date: String,
}

impl AttendeeRecord {
    /// Create a record with no business
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        contact: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            contact: contact.into(),
            business: None,
            date: date.into(),
        }
    }

    /// Builder method: set the business
    pub fn business(mut self, business: impl Into<String>) -> Self {
        let business = business.into();
        self.business = if business.trim().is_empty() {
            None
        } else {
            Some(business)
        };
        self
    }

    /// Business for display, falling back to the placeholder dash
    pub fn business_label(&self) -> &str {
        self.business.as_deref().unwrap_or(EMPTY_FIELD)
    }

    /// Parsed registration timestamp, if the directory sent a readable one
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }

    /// Registration date in the pt-PT convention (dd/mm/yyyy)
    ///
    /// Dates that cannot be parsed are returned verbatim.
    pub fn date_label(&self) -> String {
        match self.registered_at() {
            Some(at) => format_date_pt(at.date_naive()),
            None => self.date.clone(),
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Request body for `POST /invites/create`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NewInvite {
    pub name: String,
    pub location: String,
    pub contact: String,
    /// Empty string when not provided
    pub business: String,
}

/// Parse an ISO-8601 timestamp the way a browser `Date` would
///
/// Accepts RFC 3339, zone-less date-times (read as UTC) and plain dates.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a calendar date as dd/mm/yyyy
pub fn format_date_pt(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Snapshot of the attendee list for one session
///
/// Loaded once and never mutated; a registration made after loading is not
/// visible until the snapshot is fetched again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendeeStore {
    records: Vec<AttendeeRecord>,
}

impl AttendeeStore {
    pub fn new(records: Vec<AttendeeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AttendeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<AttendeeRecord>> for AttendeeStore {
    fn from(records: Vec<AttendeeRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_directory_record() {
        let json = r#"{
            "id": "65f1c2",
            "name": "Ana Muthemba",
            "location": "Namicopo",
            "contact": "841234567",
            "business": "",
            "date": "2025-02-10T09:30:00.000Z"
        }"#;

        let record: AttendeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Ana Muthemba");
        assert_eq!(record.business, None);
        assert_eq!(record.business_label(), "-");
        assert_eq!(record.date_label(), "10/02/2025");
    }

    #[test]
    fn test_missing_business_defaults_to_none() {
        let json = r#"{"id":"1","name":"Bia","location":"Muhala","contact":"82","date":"2025-01-02"}"#;
        let record: AttendeeRecord = serde_json::from_str(json).unwrap();
        assert!(record.business.is_none());

        let json = r#"{"id":"1","name":"Bia","location":"Muhala","contact":"82","business":null,"date":"2025-01-02"}"#;
        let record: AttendeeRecord = serde_json::from_str(json).unwrap();
        assert!(record.business.is_none());
    }

    #[test]
    fn test_business_builder() {
        let record = AttendeeRecord::new("1", "Zeca", "Central", "84", "2025-01-03")
            .business("Comércio");
        assert_eq!(record.business_label(), "Comércio");

        let record = record.business("   ");
        assert_eq!(record.business_label(), "-");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        for s in [
            "2025-01-01",
            "2025-01-01T10:00:00Z",
            "2025-01-01T10:00:00.123Z",
            "2025-01-01T10:00:00",
            "2025-01-01T10:00:00+00:00",
        ] {
            let parsed = parse_timestamp(s).unwrap_or_else(|| panic!("failed to parse {}", s));
            assert_eq!(parsed.date_naive(), expected, "{}", s);
        }

        assert!(parse_timestamp("ontem").is_none());
    }

    #[test]
    fn test_unparseable_date_label_is_verbatim() {
        let record = AttendeeRecord::new("1", "Ana", "Central", "84", "sem data");
        assert_eq!(record.date_label(), "sem data");
    }

    #[test]
    fn test_store_snapshot() {
        let store = AttendeeStore::default();
        assert!(store.is_empty());

        let store = AttendeeStore::from(vec![AttendeeRecord::new(
            "1", "Ana", "Central", "84", "2025-01-01",
        )]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, "1");
    }
}
