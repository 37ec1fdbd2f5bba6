//! State Management
//!
//! App-wide state shared by the pages, and the participants page's own state.

pub mod global;
pub mod participants;

pub use global::{provide_global_state, GlobalState};
pub use participants::{provide_participants_state, ParticipantsState};
