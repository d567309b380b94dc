// Shared types and pure helpers used by both the session and the server
pub mod id;
pub mod site_gate;
pub mod url_classifier;

pub use id::Id;
pub use site_gate::*;
pub use url_classifier::*;
