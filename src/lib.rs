//! # Convite
//!
//! Event registration and participant dashboard for the Mega Evento MCB.
//!
//! ## Features
//!
//! - **Registration**: validated invite form posted to a remote directory
//! - **Participant view**: search and sort over the loaded attendee list
//! - **Statistics**: progress against the attendance target and growth rate
//! - **Charts**: target vs. actual and top locations, as backend-neutral
//!   draw commands
//! - **Export**: spreadsheet and PDF copies of the visible list
//!
//! ## Modules
//!
//! - [`attendee`]: Records exchanged with the directory
//! - [`view`]: Filter and sort pipeline
//! - [`stats`]: Summary figures and location ranking
//! - [`chart`]: Chart layout
//! - [`export`]: XLSX and PDF output
//! - [`registration`]: Form state and validation
//! - [`event`]: Date, hours and venue shown on the invitation
//! - `directory`: HTTP client for the invite directory (native only)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use convite::directory::{load_store, HttpDirectory};
//! use convite::stats::{summarize, DEFAULT_TARGET};
//! use convite::view::{SortKey, ViewAction, ViewState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = HttpDirectory::new("http://localhost:3000", None)?;
//!     let store = load_store(&directory).await;
//!
//!     let summary = summarize(store.records(), DEFAULT_TARGET, chrono::Utc::now());
//!     println!("{:.1}% of the target reached", summary.percentage_reached);
//!
//!     let view = ViewState::default()
//!         .apply(ViewAction::SetQuery("muhala".to_string()))
//!         .apply(ViewAction::ToggleSort(SortKey::Name));
//!     for record in view.project(store.records()) {
//!         println!("{} ({})", record.name, record.location);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod attendee;
pub mod chart;
pub mod config;
#[cfg(feature = "native")]
pub mod directory;
pub mod event;
pub mod export;
pub mod registration;
pub mod stats;
pub mod view;

// Re-export top-level types for convenience
pub use attendee::{AttendeeRecord, AttendeeStore, NewInvite};

pub use view::{filter_and_sort, SortDirection, SortKey, ViewAction, ViewState};

pub use stats::{summarize, top_locations, LocationCount, Summary};

pub use chart::{comparison_chart, ranking_chart, ChartError, DrawCommand, Surface, TextMeasure};

pub use export::{ExportError, ExportFormat, ExportOptions};

pub use registration::{FormAction, FormField, RegistrationForm, SubmitStatus, ValidationError};

pub use event::{EventDetails, EVENT};

pub use config::{Config, ConfigError};

#[cfg(feature = "native")]
pub use directory::{Directory, DirectoryError, HttpDirectory};
