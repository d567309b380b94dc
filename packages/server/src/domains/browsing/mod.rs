//! Browsing domain - tabs, per-tab history and the web/reader session machine.
//!
//! SessionController owns all mutable session state. Transitions are applied
//! synchronously and hand back a SessionCommand for the slow part.

pub mod commands;
pub mod controller;
pub mod models;
pub mod reader;
pub mod storage;
pub mod tab_store;

pub use commands::SessionCommand;
pub use controller::{SessionConfig, SessionController, SessionSnapshot, DEFAULT_SETTLE_DELAY};
pub use models::*;
pub use storage::{BrowserSettings, BrowserStorage, ClearTarget};
pub use tab_store::TabStore;
