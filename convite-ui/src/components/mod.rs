//! UI Components
//!
//! Reusable Leptos components for the registration page and dashboard.

pub mod chart;
pub mod loading;
pub mod nav;
pub mod stat_card;
pub mod toast;

pub use chart::{ChartCanvas, ChartKind};
pub use loading::Loading;
pub use nav::Nav;
pub use stat_card::StatCard;
pub use toast::Toast;
