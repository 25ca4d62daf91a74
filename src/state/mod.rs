//! Event wiring between page controls and the filter controller

pub mod dispatcher;
pub mod events;

pub use dispatcher::FilterSession;
pub use events::FilterEvent;
