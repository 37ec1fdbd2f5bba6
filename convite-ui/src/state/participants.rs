//! Participants Page State
//!
//! Owned by the participants page: created empty when the page mounts and
//! dropped with it, so nothing carries over between visits.

use leptos::*;

use convite::stats::{summarize, top_locations, LocationCount, Summary, TOP_LOCATIONS};
use convite::{AttendeeRecord, ViewAction, ViewState};

#[derive(Clone, Copy)]
pub struct ParticipantsState {
    /// Snapshot fetched on mount
    pub records: RwSignal<Vec<AttendeeRecord>>,
    /// Search and ordering of the participant list
    pub view: RwSignal<ViewState>,
    /// Participant fetch in flight
    pub loading: RwSignal<bool>,
}

/// Create the page state and provide it to the page's components
pub fn provide_participants_state() -> ParticipantsState {
    let state = ParticipantsState::new();
    provide_context(state);
    state
}

impl ParticipantsState {
    pub fn new() -> Self {
        Self {
            records: create_rw_signal(Vec::new()),
            view: create_rw_signal(ViewState::default()),
            loading: create_rw_signal(false),
        }
    }

    /// Apply a search or sort change
    pub fn dispatch(&self, action: ViewAction) {
        self.view.update(|view| *view = view.clone().apply(action));
    }

    /// Record the outcome of the fetch; a failure leaves the list empty
    pub fn finish_load<E>(&self, result: Result<Vec<AttendeeRecord>, E>) {
        self.records.set(result.unwrap_or_default());
        self.loading.set(false);
    }

    /// Filtered and sorted participants
    pub fn visible(&self) -> Vec<AttendeeRecord> {
        self.records.with(|records| self.view.get().project(records))
    }

    pub fn summary(&self, target: u32) -> Summary {
        self.records
            .with(|records| summarize(records, target, chrono::Utc::now()))
    }

    pub fn top_locations(&self) -> Vec<LocationCount> {
        self.records.with(|records| top_locations(records, TOP_LOCATIONS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> AttendeeRecord {
        AttendeeRecord::new(id, name, "Muhala", "841234567", "2025-01-01")
    }

    #[test]
    fn test_new_state_is_empty() {
        let runtime = create_runtime();

        let state = ParticipantsState::new();
        assert!(state.records.get_untracked().is_empty());
        assert_eq!(state.view.get_untracked(), ViewState::default());
        assert!(!state.loading.get_untracked());

        runtime.dispose();
    }

    #[test]
    fn test_failed_load_shows_zero_state() {
        let runtime = create_runtime();

        let state = ParticipantsState::new();
        state.loading.set(true);
        state.finish_load::<String>(Err("Network error".to_string()));

        assert!(state.records.get_untracked().is_empty());
        assert!(!state.loading.get_untracked());
        assert_eq!(state.summary(1000).count, 0);

        runtime.dispose();
    }

    #[test]
    fn test_each_mount_starts_fresh() {
        let runtime = create_runtime();

        let first = ParticipantsState::new();
        first.finish_load::<String>(Ok(vec![record("1", "Ana"), record("2", "Bruno")]));
        first.dispatch(ViewAction::SetQuery("ana".to_string()));
        assert_eq!(first.visible().len(), 1);

        let second = ParticipantsState::new();
        assert!(second.records.get_untracked().is_empty());
        assert!(second.view.get_untracked().query.is_empty());

        runtime.dispose();
    }
}
