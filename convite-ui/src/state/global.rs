//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use convite::stats::DEFAULT_TARGET;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Expected attendance
    pub target: RwSignal<u32>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        target: create_rw_signal(DEFAULT_TARGET),
        error: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
