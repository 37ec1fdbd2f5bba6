//! Application Pages

pub mod participants;
pub mod registration;

pub use participants::Participants;
pub use registration::Registration;
