//! Application state and core logic

pub mod events;
pub mod screen;
pub mod session;
pub mod state;

pub use events::EventLog;
pub use screen::AppCoordinator;
