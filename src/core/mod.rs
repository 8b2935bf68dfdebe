//! # Core Module
//!
//! Configuration, localized strings and the time source shared by every feature.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod clock;
pub mod config;
pub mod strings;

// Re-export commonly used items
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigError, Permission};
pub use strings::{Locale, Strings};
