//! # TUI Module
//!
//! Terminal front end: the reminder list, the add sheet and foreground
//! notification banners.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod app;
pub mod event;
pub mod ui;

pub use app::{App, Screen};
pub use event::{Event, EventHandler};
