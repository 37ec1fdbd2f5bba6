//! Participant list view
//!
//! Derives the filtered, sorted projection of the attendee store that the
//! dashboard table shows and the exporters serialize. All state changes go
//! through [`ViewState::apply`]; the projection itself is a pure function.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::attendee::AttendeeRecord;

/// Column the list is ordered by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Date,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Date => write!(f, "date"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" | "nome" => Ok(SortKey::Name),
            "date" | "data" => Ok(SortKey::Date),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Transitions accepted by [`ViewState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    /// Replace the search text
    SetQuery(String),
    /// Flip the direction of the current key, or switch to a new key ascending
    ToggleSort(SortKey),
}

/// Search and ordering state of the participant list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort_key: SortKey::Date,
            direction: SortDirection::Ascending,
        }
    }
}

impl ViewState {
    /// Apply a transition, returning the next state
    pub fn apply(self, action: ViewAction) -> Self {
        match action {
            ViewAction::SetQuery(query) => Self { query, ..self },
            ViewAction::ToggleSort(key) if key == self.sort_key => Self {
                direction: self.direction.flipped(),
                ..self
            },
            ViewAction::ToggleSort(key) => Self {
                sort_key: key,
                direction: SortDirection::Ascending,
                ..self
            },
        }
    }

    /// Whether a search is narrowing the list
    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty()
    }

    /// Project the records through this state's query and ordering
    pub fn project(&self, records: &[AttendeeRecord]) -> Vec<AttendeeRecord> {
        filter_and_sort(records, &self.query, self.sort_key, self.direction)
    }

    /// Count line shown above the table
    pub fn caption(&self, shown: usize, total: usize) -> String {
        if self.is_filtered() {
            format!("Total de participantes: {} (filtrados de {})", shown, total)
        } else {
            format!("Total de participantes: {}", shown)
        }
    }
}

/// Keep records whose name contains `query` (case-insensitive) and order them
///
/// The sort is stable, so records with equal keys keep their store order in
/// both directions.
pub fn filter_and_sort(
    records: &[AttendeeRecord],
    query: &str,
    key: SortKey,
    direction: SortDirection,
) -> Vec<AttendeeRecord> {
    let needle = query.to_lowercase();

    let mut view: Vec<AttendeeRecord> = records
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => locale_compare(&a.name, &b.name),
            SortKey::Date => a.date.cmp(&b.date),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    view
}

/// Collation for Portuguese names
///
/// Letters compare without accents or case first, then accented after plain,
/// then lowercase before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| -> String { s.chars().map(|c| fold_accent(c).to_ascii_lowercase()).collect() };

    primary(a)
        .cmp(&primary(b))
        .then_with(|| {
            let accents = |s: &str| -> Vec<bool> { s.chars().map(|c| fold_accent(c) != c).collect() };
            accents(a).cmp(&accents(b))
        })
        .then_with(|| {
            let upper = |s: &str| -> Vec<bool> { s.chars().map(char::is_uppercase).collect() };
            upper(a).cmp(&upper(b))
        })
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, date: &str) -> AttendeeRecord {
        AttendeeRecord::new(id, name, "Central", "841234567", date)
    }

    fn names(view: &[AttendeeRecord]) -> Vec<&str> {
        view.iter().map(|r| r.name.as_str()).collect()
    }

    fn sample() -> Vec<AttendeeRecord> {
        vec![
            record("1", "Ana", "2025-01-01"),
            record("2", "Zeca", "2025-01-03"),
            record("3", "Bia", "2025-01-02"),
        ]
    }

    #[test]
    fn test_date_ascending_then_toggled() {
        let records = sample();
        let state = ViewState::default();

        assert_eq!(names(&state.project(&records)), vec!["Ana", "Bia", "Zeca"]);

        let state = state.apply(ViewAction::ToggleSort(SortKey::Date));
        assert_eq!(state.direction, SortDirection::Descending);
        assert_eq!(names(&state.project(&records)), vec!["Zeca", "Bia", "Ana"]);
    }

    #[test]
    fn test_new_key_resets_direction() {
        let state = ViewState::default()
            .apply(ViewAction::ToggleSort(SortKey::Date))
            .apply(ViewAction::ToggleSort(SortKey::Name));

        assert_eq!(state.sort_key, SortKey::Name);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring_on_name() {
        let records = vec![
            record("1", "Ana Muthemba", "2025-01-01"),
            record("2", "Mariana", "2025-01-02"),
            record("3", "Bia", "2025-01-03"),
        ];

        let view = filter_and_sort(&records, "ANA", SortKey::Date, SortDirection::Ascending);
        assert_eq!(names(&view), vec!["Ana Muthemba", "Mariana"]);

        // location does not take part in the search
        let view = filter_and_sort(&records, "central", SortKey::Date, SortDirection::Ascending);
        assert!(view.is_empty());

        let view = filter_and_sort(&records, "", SortKey::Date, SortDirection::Ascending);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_name_descending_is_reverse_of_ascending() {
        let records = vec![
            record("1", "Carlos", "2025-01-01"),
            record("2", "ana", "2025-01-02"),
            record("3", "Bruno", "2025-01-03"),
            record("4", "Álvaro", "2025-01-04"),
        ];

        let asc = filter_and_sort(&records, "", SortKey::Name, SortDirection::Ascending);
        let mut desc = filter_and_sort(&records, "", SortKey::Name, SortDirection::Descending);
        desc.reverse();

        assert_eq!(asc, desc);
        assert_eq!(names(&asc), vec!["Álvaro", "ana", "Bruno", "Carlos"]);
    }

    #[test]
    fn test_equal_keys_keep_store_order() {
        let records = vec![
            record("1", "Ana", "2025-01-02"),
            record("2", "Bia", "2025-01-01"),
            record("3", "Ana", "2025-01-01"),
        ];

        let asc = filter_and_sort(&records, "", SortKey::Name, SortDirection::Ascending);
        let ids: Vec<&str> = asc.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "2"]);

        let desc = filter_and_sort(&records, "", SortKey::Name, SortDirection::Descending);
        let ids: Vec<&str> = desc.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let records = sample();
        let state = ViewState {
            query: "a".to_string(),
            sort_key: SortKey::Name,
            direction: SortDirection::Descending,
        };

        assert_eq!(state.project(&records), state.project(&records));
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("ana", "Ana"), Ordering::Less);
        assert_eq!(locale_compare("Ana", "Ána"), Ordering::Less);
        assert_eq!(locale_compare("Álvaro", "Bruno"), Ordering::Less);
        assert_eq!(locale_compare("Conceição", "Conceicao"), Ordering::Greater);
        assert_eq!(locale_compare("Zeca", "Zeca"), Ordering::Equal);
    }

    #[test]
    fn test_caption() {
        let state = ViewState::default();
        assert_eq!(state.caption(3, 3), "Total de participantes: 3");

        let state = state.apply(ViewAction::SetQuery("an".to_string()));
        assert_eq!(state.caption(1, 3), "Total de participantes: 1 (filtrados de 3)");
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("Nome".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!("date".parse::<SortKey>().unwrap(), SortKey::Date);
        assert!("location".parse::<SortKey>().is_err());
    }
}
